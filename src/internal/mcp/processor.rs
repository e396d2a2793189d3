use std::sync::Arc;

use rmcp::model::{CallToolRequestParam, ListToolsResult, ServerInfo};
use tracing::debug;

use crate::internal::mcp::{
    protocol::{JsonRpcRequest, JsonRpcResponse, McpMethod},
    registry::ToolRegistry,
};

/// Pure MCP message processor - no I/O, just transforms. Shared by the HTTP
/// mode and the protocol tests.
pub struct McpProcessor {
    server_info: ServerInfo,
    tool_registry: Arc<ToolRegistry>,
}

impl McpProcessor {
    pub fn new(server_info: ServerInfo, tool_registry: Arc<ToolRegistry>) -> Self {
        Self {
            server_info,
            tool_registry,
        }
    }

    /// Process a raw JSON-RPC request and return a response.
    pub async fn process_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let mcp_method = McpMethod::from(request.method.as_str());
        debug!("processing request for method: {:?}", mcp_method);

        match mcp_method {
            McpMethod::Initialize => JsonRpcResponse::result(
                request.id.clone(),
                serde_json::to_value(&self.server_info).unwrap_or_default(),
            ),
            // Notifications get no response; the runner drops this.
            McpMethod::Initialized => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: None,
            },
            McpMethod::ToolsList => {
                let result = ListToolsResult {
                    tools: self.tool_registry.list_metadata(),
                    next_cursor: None,
                    meta: None,
                };
                JsonRpcResponse::result(
                    request.id.clone(),
                    serde_json::to_value(result).unwrap_or_default(),
                )
            }
            McpMethod::ToolsCall => self.process_tool_call(request).await,
            McpMethod::Ping => {
                JsonRpcResponse::result(request.id.clone(), serde_json::json!({}))
            }
            McpMethod::Unknown(_) => JsonRpcResponse::error(
                request.id.clone(),
                -32601,
                "Method not found".to_string(),
            ),
        }
    }

    async fn process_tool_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params: CallToolRequestParam =
            match serde_json::from_value(request.params.clone().unwrap_or_default()) {
                Ok(params) => params,
                Err(_) => {
                    return JsonRpcResponse::error(
                        request.id.clone(),
                        -32602,
                        "Invalid params".to_string(),
                    )
                }
            };

        let Some(tool) = self.tool_registry.get(&params.name) else {
            return JsonRpcResponse::error(
                request.id.clone(),
                -32601,
                "Tool not found".to_string(),
            );
        };

        let call_request = rmcp::model::CallToolRequest {
            method: rmcp::model::CallToolRequestMethod,
            params,
            extensions: Default::default(),
        };

        match (tool.executor)(call_request).await {
            Ok(result) => JsonRpcResponse::result(
                request.id.clone(),
                serde_json::to_value(result).unwrap_or_default(),
            ),
            Err(e) => JsonRpcResponse::error(request.id.clone(), -32000, e.to_string()),
        }
    }

    /// Parse raw bytes into a request (handles line-delimited JSON)
    pub fn parse_request(input: &[u8]) -> Result<JsonRpcRequest, serde_json::Error> {
        serde_json::from_slice(input)
    }

    /// Serialize response to bytes
    pub fn serialize_response(response: &JsonRpcResponse) -> Vec<u8> {
        serde_json::to_vec(response).unwrap_or_default()
    }
}
