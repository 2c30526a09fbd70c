//! LearnBase MCP Server - Review Scheduling for a Personal Knowledge Base
//!
//! Exposes the LearnBase scheduling engine as Model Context Protocol tools
//! over stdio, so an assistant managing notes can compute review dates.
//!
//! Tools:
//! - `calculate_next_review`: apply a 1-4 rating to a note's scheduling state
//! - `preview_review`: the outcome of every rating, uncommitted
//! - `parse_schedule_pattern`: expand a pattern like `1d,1w,2w,1m`
//! - `list_schedule_presets`: aggressive, moderate and relaxed patterns

mod protocol;
mod server;
mod tools;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use learnbase_core::Scheduler;
use learnbase_mcp::config::{self, LogFormat};

use crate::protocol::stdio::StdioTransport;
use crate::server::McpServer;

/// Options accepted on the command line
struct Args {
    config_path: Option<PathBuf>,
    log_format: Option<LogFormat>,
}

fn parse_log_format(value: &str) -> LogFormat {
    LogFormat::parse_name(value).unwrap_or_else(|| {
        eprintln!("error: unknown log format '{}' (expected text or json)", value);
        std::process::exit(1);
    })
}

/// Parse command-line arguments.
/// Exits the process if `--help` or `--version` is requested.
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut log_format: Option<LogFormat> = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("LearnBase MCP Server v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Spaced repetition scheduling (SM-2 and fixed patterns) over the Model Context Protocol.");
                println!();
                println!("USAGE:");
                println!("    learnbase-mcp [OPTIONS]");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help              Print help information");
                println!("    -V, --version           Print version information");
                println!("    --config <PATH>         Scheduler config file (JSON)");
                println!("    --log-format <FORMAT>   Log output on stderr: text (default) or json");
                println!();
                println!("ENVIRONMENT:");
                println!("    {}       Scheduler config file, used when --config is absent", config::CONFIG_ENV);
                println!("    {}   Log format, used when --log-format is absent", config::LOG_FORMAT_ENV);
                println!("    RUST_LOG               Log level filter (e.g., debug, info, warn, error)");
                println!();
                println!("EXAMPLES:");
                println!("    learnbase-mcp");
                println!("    learnbase-mcp --config ~/.config/learnbase/scheduler.json");
                println!("    RUST_LOG=debug learnbase-mcp --log-format json");
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("learnbase-mcp {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    eprintln!("Usage: learnbase-mcp --config <PATH>");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with("--config=") => {
                let path = arg.strip_prefix("--config=").unwrap_or("");
                if path.is_empty() {
                    eprintln!("error: --config requires a path argument");
                    eprintln!("Usage: learnbase-mcp --config <PATH>");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(path));
            }
            "--log-format" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --log-format requires text or json");
                    std::process::exit(1);
                }
                log_format = Some(parse_log_format(&args[i]));
            }
            arg if arg.starts_with("--log-format=") => {
                log_format = Some(parse_log_format(arg.strip_prefix("--log-format=").unwrap_or("")));
            }
            arg => {
                eprintln!("error: unknown argument '{}'", arg);
                eprintln!("Usage: learnbase-mcp [OPTIONS]");
                eprintln!("Try 'learnbase-mcp --help' for more information.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        config_path,
        log_format,
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments first (before logging init, so --help/--version work cleanly)
    let Args {
        config_path,
        log_format,
    } = parse_args();
    let env_format = std::env::var(config::LOG_FORMAT_ENV).ok();

    // Initialize logging to stderr (stdout is for JSON-RPC)
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    match LogFormat::resolve(log_format, env_format.as_deref()) {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_ansi(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_current_span(false)
            .init(),
    }

    info!("LearnBase MCP Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let scheduler_config = match config::load(config_path.as_deref()) {
        Ok(c) => {
            info!(
                default_preset = %c.default_preset,
                ease_default = c.adaptive.ease_default,
                "Scheduler configuration loaded"
            );
            c
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let scheduler = Arc::new(Scheduler::new(scheduler_config));
    let server = McpServer::new(scheduler);

    // Create stdio transport
    let transport = StdioTransport::new();

    info!("Starting MCP server on stdio...");

    if let Err(e) = transport.run(server).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("LearnBase MCP Server shutting down");
}
