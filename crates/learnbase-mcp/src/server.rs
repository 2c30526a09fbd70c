//! MCP Server Core
//!
//! Handles the MCP session lifecycle and routes tool calls to the
//! scheduling tools.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::protocol::messages::{
    CallToolRequest, CallToolResult, InitializeRequest, InitializeResult, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolDescription,
};
use crate::protocol::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_VERSION};
use crate::tools;
use learnbase_core::Scheduler;

/// Tools in the order `tools/list` reports them
const TOOL_NAMES: [&str; 4] = [
    "calculate_next_review",
    "preview_review",
    "parse_schedule_pattern",
    "list_schedule_presets",
];

/// MCP Server implementation
pub struct McpServer {
    scheduler: Arc<Scheduler>,
    initialized: bool,
}

impl McpServer {
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self {
            scheduler,
            initialized: false,
        }
    }

    /// Handle an incoming JSON-RPC message. Notifications never get a reply,
    /// whether or not the method is known.
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, initialized = self.initialized, "Notification received");
            return None;
        }

        debug!("Handling request: {}", request.method);

        if !self.initialized && request.method != "initialize" {
            warn!("Rejecting request '{}': server not initialized", request.method);
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::server_not_initialized(),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params).await,
            "tools/list" => self.handle_tools_list().await,
            "tools/call" => self.handle_tools_call(request.params).await,
            "ping" => Ok(serde_json::json!({})),
            method => {
                warn!("Unknown method: {}", method);
                Err(JsonRpcError::method_not_found())
            }
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(error) => JsonRpcResponse::error(request.id, error),
        })
    }

    /// Handle initialize request
    async fn handle_initialize(
        &mut self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let request: InitializeRequest = match params {
            Some(p) => serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(&e.to_string()))?,
            None => InitializeRequest::default(),
        };

        // Version negotiation: answer with the client's version when it is older
        let negotiated_version = if request.protocol_version.as_str() < MCP_VERSION {
            info!("Client requested older protocol version {}, using it", request.protocol_version);
            request.protocol_version.clone()
        } else {
            MCP_VERSION.to_string()
        };

        self.initialized = true;
        info!("MCP session initialized with protocol version {}", negotiated_version);

        let result = InitializeResult {
            protocol_version: negotiated_version,
            server_info: ServerInfo {
                name: "learnbase".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some({
                    let mut map = HashMap::new();
                    map.insert("listChanged".to_string(), serde_json::json!(false));
                    map
                }),
            },
            instructions: Some(
                "LearnBase schedules note reviews. After the user reviews a note, call \
                 calculate_next_review with the note's stored scheduling state and their 1-4 \
                 recall rating, then persist the returned interval, ease factor, review count \
                 and next review date. Spaced notes adapt with SM-2; scheduled notes walk a \
                 fixed pattern such as '1d,1w,2w,1m'."
                    .to_string(),
            ),
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
    }

    /// Handle tools/list request
    async fn handle_tools_list(&self) -> Result<serde_json::Value, JsonRpcError> {
        let tools = vec![
            ToolDescription {
                name: TOOL_NAMES[0].to_string(),
                description: Some("Apply a 1-4 recall rating (1=Again, 2=Hard, 3=Good, 4=Easy) to a note's scheduling state. Returns the next interval, ease factor, review count and due date to persist. Spaced mode adapts the ease factor (SM-2); scheduled mode walks the note's fixed pattern.".to_string()),
                input_schema: tools::next_review::schema(),
            },
            ToolDescription {
                name: TOOL_NAMES[1].to_string(),
                description: Some("Show the outcome of each of the four ratings for a note without committing any of them.".to_string()),
                input_schema: tools::preview::schema(),
            },
            ToolDescription {
                name: TOOL_NAMES[2].to_string(),
                description: Some("Parse a fixed schedule pattern like '1d,1w,2w,1m,3m,6m' into day intervals. Reports when no token is valid and the fallback pattern is used.".to_string()),
                input_schema: tools::pattern::schema(),
            },
            ToolDescription {
                name: TOOL_NAMES[3].to_string(),
                description: Some("List the named schedule patterns (aggressive, moderate, relaxed) and which one is the default.".to_string()),
                input_schema: tools::presets::schema(),
            },
        ];

        let result = ListToolsResult { tools };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
    }

    /// Handle tools/call request
    async fn handle_tools_call(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let request: CallToolRequest = match params {
            Some(p) => serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(&e.to_string()))?,
            None => return Err(JsonRpcError::invalid_params("Missing tool call parameters")),
        };

        let result = match request.name.as_str() {
            "calculate_next_review" => tools::next_review::execute(&self.scheduler, request.arguments).await,
            "preview_review" => tools::preview::execute(&self.scheduler, request.arguments).await,
            "parse_schedule_pattern" => tools::pattern::execute(&self.scheduler, request.arguments).await,
            "list_schedule_presets" => tools::presets::execute(&self.scheduler, request.arguments).await,

            name => return Err(JsonRpcError::unknown_tool(name, &TOOL_NAMES)),
        };

        let call_result = match result {
            Ok(content) => CallToolResult::text(
                serde_json::to_string_pretty(&content).unwrap_or_else(|_| content.to_string()),
                false,
            ),
            Err(e) => {
                debug!(tool = %request.name, "Tool call failed: {}", e);
                CallToolResult::text(serde_json::json!({ "error": e }).to_string(), true)
            }
        };

        serde_json::to_value(call_result).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
