//! stdio Transport for MCP
//!
//! Line-delimited JSON-RPC: one message per stdin line, one reply per stdout
//! line. Notifications and blank lines produce no output.

use std::io::{self, BufRead, Write};
use tracing::{debug, error, warn};

use super::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;

/// Sent when a response cannot be serialized, so the client does not hang
const FALLBACK_ERROR: &str = r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#;

/// stdio Transport for MCP server
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Run the MCP server over stdio until stdin closes
    pub async fn run(self, server: McpServer) -> Result<(), io::Error> {
        serve(server, io::stdin().lock(), io::stdout().lock()).await
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Pump messages from `input` to `output` until end of input or a read error
async fn serve(mut server: McpServer, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read line: {}", e);
                break;
            }
        };

        if let Some(reply) = reply_to_line(&mut server, &line).await {
            writeln!(output, "{}", reply)?;
            output.flush()?;
        }
    }
    Ok(())
}

/// The serialized reply for one input line, if it warrants one
async fn reply_to_line(server: &mut McpServer, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    debug!("Received: {} bytes", line.len());

    let response = match serde_json::from_str::<JsonRpcRequest>(line) {
        Ok(request) => server.handle_request(request).await?,
        Err(e) => {
            warn!("Failed to parse request: {}", e);
            JsonRpcResponse::error(None, JsonRpcError::parse_error())
        }
    };

    let reply = serde_json::to_string(&response).unwrap_or_else(|e| {
        error!("Failed to serialize response: {}", e);
        FALLBACK_ERROR.to_string()
    });
    debug!("Sending: {} bytes", reply.len());
    Some(reply)
}
