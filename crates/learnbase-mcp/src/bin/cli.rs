//! LearnBase CLI
//!
//! Command-line interface for the review scheduler: compute single steps,
//! inspect patterns and presets, and simulate a sequence of reviews.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use learnbase_core::{
    format_days, FixedClock, Rating, ReviewMode, ReviewResult, ReviewStats, SchedulePattern,
    SchedulePreset, Scheduler, SchedulerConfig, SchedulingState,
};
use learnbase_mcp::config;

/// LearnBase - Review Scheduling CLI
#[derive(Parser)]
#[command(name = "learnbase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the LearnBase review scheduler")]
#[command(long_about = "LearnBase schedules note reviews with a simplified SM-2 algorithm (spaced mode)\nor a fixed interval pattern such as 1d,1w,2w,1m (scheduled mode).")]
struct Cli {
    /// Scheduler config file (JSON); falls back to $LEARNBASE_CONFIG, then the platform config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the next adaptive (SM-2) review
    Adaptive {
        /// Recall rating: 1=Again, 2=Hard, 3=Good, 4=Easy
        #[arg(long)]
        rating: i64,
        /// Current interval in days
        #[arg(long, default_value = "1")]
        interval: u32,
        /// Current ease factor (defaults to the configured default)
        #[arg(long)]
        ease: Option<f64>,
        /// Completed reviews so far
        #[arg(long, default_value = "0")]
        reviews: u32,
    },

    /// Compute the next fixed-pattern review
    Fixed {
        /// Recall rating: 1=Again, 2=Hard, 3=Good, 4=Easy
        #[arg(long)]
        rating: i64,
        /// Interval pattern, e.g. 1d,1w,2w,1m
        #[arg(long, conflicts_with = "preset")]
        pattern: Option<String>,
        /// Preset name: aggressive, moderate or relaxed
        #[arg(long)]
        preset: Option<String>,
        /// Completed reviews so far
        #[arg(long, default_value = "0")]
        reviews: u32,
    },

    /// Parse a schedule pattern and show its steps
    Parse {
        /// Pattern text, e.g. "1d,1w,2w,1m,3m,6m"
        pattern: String,
    },

    /// List schedule presets
    Presets,

    /// Show what each rating would do to a note
    Preview {
        /// Review mode: spaced (adaptive) or scheduled (fixed)
        #[arg(long, default_value = "spaced")]
        mode: String,
        /// Interval pattern for scheduled mode (defaults to the configured preset)
        #[arg(long)]
        pattern: Option<String>,
        /// Current interval in days
        #[arg(long, default_value = "1")]
        interval: u32,
        /// Current ease factor
        #[arg(long)]
        ease: Option<f64>,
        /// Completed reviews so far
        #[arg(long, default_value = "0")]
        reviews: u32,
    },

    /// Walk a sequence of ratings through a new note, reviewing each time it falls due
    Simulate {
        /// Ratings, comma-separated (e.g. 3,3,4,1,3)
        ratings: String,
        /// Review mode: spaced (adaptive) or scheduled (fixed)
        #[arg(long, default_value = "spaced")]
        mode: String,
        /// Interval pattern for scheduled mode (defaults to the configured preset)
        #[arg(long)]
        pattern: Option<String>,
        /// Date of the first review (YYYY-MM-DD), defaults to now
        #[arg(long)]
        start: Option<String>,
    },

    /// Summarize a JSON array of scheduling states exported from a note store
    Stats {
        /// Path to the JSON file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Adaptive {
            rating,
            interval,
            ease,
            reviews,
        } => run_adaptive(config, rating, interval, ease, reviews),
        Commands::Fixed {
            rating,
            pattern,
            preset,
            reviews,
        } => run_fixed(config, rating, pattern, preset, reviews),
        Commands::Parse { pattern } => run_parse(&pattern),
        Commands::Presets => run_presets(&config),
        Commands::Preview {
            mode,
            pattern,
            interval,
            ease,
            reviews,
        } => run_preview(config, &mode, pattern, interval, ease, reviews),
        Commands::Simulate {
            ratings,
            mode,
            pattern,
            start,
        } => run_simulate(config, &ratings, &mode, pattern, start),
        Commands::Stats { file } => run_stats(&file),
    }
}

/// Resolve a mode name, using the configured preset when scheduled mode has no pattern
fn resolve_mode(config: &SchedulerConfig, mode: &str, pattern: Option<String>) -> anyhow::Result<ReviewMode> {
    let pattern = pattern.or_else(|| Some(config.default_preset.pattern().to_string()));
    Ok(ReviewMode::from_parts(mode, pattern.as_deref())?)
}

fn print_result(result: &ReviewResult) {
    println!("{}: {} ({})", "Rating".white().bold(), result.rating.name(), result.rating.as_i32());
    println!("{}: {} day(s)", "Interval".white().bold(), result.interval_days);
    println!(
        "{}: {:.2} -> {:.2}",
        "Ease Factor".white().bold(),
        result.previous_ease_factor,
        result.state.ease_factor
    );
    if let Some(step) = result.step_index {
        println!("{}: {}", "Pattern Step".white().bold(), step);
    }
    println!("{}: {}", "Review Count".white().bold(), result.state.review_count);
    println!(
        "{}: {}",
        "Next Review".white().bold(),
        result.state.next_review.format("%Y-%m-%d %H:%M:%S")
    );
}

fn run_adaptive(
    config: SchedulerConfig,
    rating: i64,
    interval: u32,
    ease: Option<f64>,
    reviews: u32,
) -> anyhow::Result<()> {
    let rating = Rating::try_from(rating)?;
    let scheduler = Scheduler::new(config);

    let mut state = scheduler.new_state(ReviewMode::Adaptive);
    state.interval_days = interval.max(1);
    state.review_count = reviews;
    if let Some(ease) = ease {
        state.ease_factor = ease;
    }

    println!("{}", "=== Adaptive Review ===".cyan().bold());
    println!();
    print_result(&scheduler.review(&state, rating));
    Ok(())
}

fn run_fixed(
    config: SchedulerConfig,
    rating: i64,
    pattern: Option<String>,
    preset: Option<String>,
    reviews: u32,
) -> anyhow::Result<()> {
    let rating = Rating::try_from(rating)?;

    let pattern = match (pattern, preset) {
        (Some(p), _) => p,
        (None, Some(name)) => SchedulePreset::parse_name(&name)
            .ok_or_else(|| anyhow::anyhow!("Unknown preset '{}'. Use aggressive, moderate or relaxed.", name))?
            .pattern()
            .to_string(),
        (None, None) => config.default_preset.pattern().to_string(),
    };

    let parsed = SchedulePattern::parse(&pattern);
    let scheduler = Scheduler::new(config);
    let mut state = scheduler.new_state(ReviewMode::fixed(pattern));
    state.review_count = reviews;

    println!("{}", "=== Fixed Review ===".cyan().bold());
    println!();
    println!("{}: {}", "Pattern".white().bold(), parsed);
    if parsed.is_fallback() {
        println!("{}", "No valid intervals in pattern, using fallback".yellow());
    }
    print_result(&scheduler.review(&state, rating));
    Ok(())
}

fn run_parse(pattern: &str) -> anyhow::Result<()> {
    let parsed = SchedulePattern::parse(pattern);

    println!("{}", "=== Schedule Pattern ===".cyan().bold());
    println!();
    println!("{}: {}", "Input".white().bold(), pattern);
    println!("{}: {}", "Normalized".white().bold(), parsed);
    if parsed.is_fallback() {
        println!("{}", "No valid intervals, using fallback".yellow());
    }
    println!();

    let mut total: u64 = 0;
    for (index, &days) in parsed.intervals().iter().enumerate() {
        total += u64::from(days);
        println!(
            "  {:>2}. {:>6}  {:>5} day(s)  {}",
            index,
            format_days(days),
            days,
            format!("(day {})", total).dimmed()
        );
    }
    Ok(())
}

fn run_presets(config: &SchedulerConfig) -> anyhow::Result<()> {
    println!("{}", "=== Schedule Presets ===".cyan().bold());
    println!();

    for preset in SchedulePreset::ALL {
        let marker = if preset == config.default_preset {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!("{}{}", preset.as_str().white().bold(), marker);
        println!("  {}", preset.pattern());
        println!("  {}", preset.description().dimmed());
    }
    Ok(())
}

fn run_preview(
    config: SchedulerConfig,
    mode: &str,
    pattern: Option<String>,
    interval: u32,
    ease: Option<f64>,
    reviews: u32,
) -> anyhow::Result<()> {
    let mode = resolve_mode(&config, mode, pattern)?;
    let scheduler = Scheduler::new(config);

    let mut state = scheduler.new_state(mode);
    state.interval_days = interval.max(1);
    state.review_count = reviews;
    if let Some(ease) = ease {
        state.ease_factor = ease;
    }

    println!("{}", "=== Review Preview ===".cyan().bold());
    println!("{}: {}", "Mode".white().bold(), state.mode);
    println!();

    for result in scheduler.preview(&state).iter() {
        let label = match result.rating {
            Rating::Again => result.rating.name().red(),
            Rating::Hard => result.rating.name().yellow(),
            Rating::Good => result.rating.name().green(),
            Rating::Easy => result.rating.name().cyan(),
        };
        println!(
            "  {:6} {:>5} day(s)  ease {:.2}  due {}",
            label,
            result.interval_days,
            result.state.ease_factor,
            result.state.next_review.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn parse_start(start: Option<String>) -> anyhow::Result<DateTime<Utc>> {
    match start {
        Some(date_str) => {
            let naive = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}. Use YYYY-MM-DD format.", date_str, e))?;
            naive
                .and_hms_opt(9, 0, 0)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| anyhow::anyhow!("Invalid start time"))
        }
        None => Ok(Utc::now()),
    }
}

fn run_simulate(
    config: SchedulerConfig,
    ratings: &str,
    mode: &str,
    pattern: Option<String>,
    start: Option<String>,
) -> anyhow::Result<()> {
    let ratings: Vec<Rating> = ratings
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| -> anyhow::Result<Rating> {
            let value: i64 = s
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid rating '{}'. Use 1-4.", s))?;
            Ok(Rating::try_from(value)?)
        })
        .collect::<anyhow::Result<_>>()?;

    if ratings.is_empty() {
        anyhow::bail!("No ratings given. Example: learnbase simulate 3,3,4,1");
    }

    let mode = resolve_mode(&config, mode, pattern)?;
    let start = parse_start(start)?;

    let mut state = Scheduler::with_clock(config.clone(), FixedClock::new(start)).new_state(mode);

    println!("{}", "=== Review Simulation ===".cyan().bold());
    println!("{}: {}", "Mode".white().bold(), state.mode);
    println!();
    println!(
        "  {:>3}  {:10}  {:6}  {:>8}  {:>5}  {}",
        "#", "Reviewed", "Rating", "Interval", "Ease", "Next"
    );

    for (i, rating) in ratings.into_iter().enumerate() {
        // Each review happens exactly when the note falls due
        let scheduler = Scheduler::with_clock(config.clone(), FixedClock::new(state.next_review));
        let result = scheduler.review(&state, rating);
        println!(
            "  {:>3}  {:10}  {:6}  {:>7}d  {:>5.2}  {}",
            i + 1,
            scheduler.now().format("%Y-%m-%d"),
            rating.name(),
            result.interval_days,
            result.state.ease_factor,
            result.state.next_review.format("%Y-%m-%d")
        );
        state = result.state;
    }

    let elapsed = state.next_review.signed_duration_since(start).num_days();
    println!();
    println!("{}: {} day(s) of coverage", "Total".white().bold(), elapsed);
    Ok(())
}

fn run_stats(file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;
    let states: Vec<SchedulingState> = serde_json::from_str(&text)?;
    let stats = ReviewStats::collect(&states, Utc::now());

    println!("{}", "=== LearnBase Review Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Total Notes".white().bold(), stats.total);
    println!("{}: {}", "Due Today".white().bold(), stats.due_today);
    println!("{}: {}", "Due This Week".white().bold(), stats.due_this_week);
    println!("{}: {}", "Reviewed Today".white().bold(), stats.reviewed_today);
    println!("{}: {:.2}", "Average Ease".white().bold(), stats.average_ease);
    println!(
        "{}: {} spaced, {} scheduled",
        "Modes".white().bold(),
        stats.adaptive_count,
        stats.fixed_count
    );
    Ok(())
}
