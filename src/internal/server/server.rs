// src/internal/server/server.rs

use anyhow::{Context, Result};
use rmcp::{
    model::*,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use crate::internal::config::{AppConfig, ServerMode};
use crate::internal::mcp::processor::McpProcessor;
use crate::internal::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::internal::mcp::registry::{RegisteredTool, ToolExecutor, ToolRegistry};
use crate::internal::tools::{tool_definitions, ToolDispatcher};
use crate::internal::yapi::EnvSettings;

/// The MCP server instance: holds the tool registry and the YApi dispatcher
/// and serves them over STDIO (primary) or HTTP JSON-RPC.
#[derive(Clone)]
pub struct Server {
    pub config: AppConfig,
    dispatcher: Arc<ToolDispatcher>,
    registry: Arc<ToolRegistry>,
}

impl ServerHandler for Server {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.list_metadata(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_name = request.name.clone();

        let Some(tool) = self.registry.get(tool_name.as_ref()) else {
            return Err(McpError {
                code: ErrorCode(-32601),
                message: format!("Tool '{}' not found", tool_name).into(),
                data: None,
            });
        };

        let call_request = CallToolRequest {
            method: CallToolRequestMethod,
            params: request,
            extensions: Extensions::default(),
        };

        (tool.executor)(call_request).await.map_err(|e| McpError {
            code: ErrorCode(-32600),
            message: e.to_string().into(),
            data: None,
        })
    }

    fn get_info(&self) -> ServerInfo {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "YApi MCP server - exposes YApi interface documentation as read-only tools"
                    .into(),
            ),
        }
    }
}

impl Server {
    pub fn new(config: AppConfig, dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            config,
            dispatcher,
            registry: Arc::new(ToolRegistry::new()),
        }
    }

    /// Register the YApi tools. Each executor routes the call through the
    /// dispatcher, which never errors - failures come back as error-flagged
    /// results.
    pub fn setup_tools(&self) -> Result<()> {
        for tool in tool_definitions() {
            let dispatcher = Arc::clone(&self.dispatcher);
            let tool_name = tool.name.to_string();

            let executor: ToolExecutor = Arc::new(move |request: CallToolRequest| {
                let dispatcher = Arc::clone(&dispatcher);
                Box::pin(async move {
                    let name = request.params.name.to_string();
                    let result = dispatcher
                        .dispatch(&name, request.params.arguments.as_ref())
                        .await;
                    Ok(result)
                })
            });

            self.registry.register(
                tool_name.clone(),
                RegisteredTool {
                    metadata: tool,
                    executor,
                },
            );
            info!("Registered tool: {}", tool_name);
        }

        info!("Successfully registered {} tools", self.registry.count());
        Ok(())
    }

    /// Serve in STDIO mode (primary MCP mode)
    async fn serve_stdio(&self) -> Result<()> {
        info!("MCP server ready on stdio with {} tools", self.tool_count());

        let transport = (tokio::io::stdin(), tokio::io::stdout());
        let service = self.clone().serve(transport).await?;

        service.waiting().await?;

        Ok(())
    }

    /// Serve MCP JSON-RPC over HTTP
    async fn serve_http(&self) -> Result<()> {
        use axum::{
            extract::State,
            routing::{get, post},
            Json, Router,
        };
        use serde_json::Value;
        use tower_http::cors::CorsLayer;

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        info!(
            "Starting HTTP MCP server on {} with {} tools",
            addr,
            self.tool_count()
        );

        let processor = Arc::new(McpProcessor::new(
            self.get_info(),
            Arc::clone(&self.registry),
        ));

        async fn handle_mcp_request(
            State(processor): State<Arc<McpProcessor>>,
            Json(payload): Json<Value>,
        ) -> Json<Value> {
            let request: JsonRpcRequest = match serde_json::from_value(payload) {
                Ok(request) => request,
                Err(e) => {
                    let response =
                        JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e));
                    return Json(serde_json::to_value(response).unwrap_or_default());
                }
            };

            let is_initialize = request.method == "initialize";
            let is_notification = request.id.is_none();
            let response = processor.process_request(&request).await;

            if is_notification {
                return Json(Value::Null);
            }

            let mut body = serde_json::to_value(&response).unwrap_or_default();
            if is_initialize {
                // Hand the client a session id it can echo in x-session-id
                if let Some(result) = body.get_mut("result").and_then(|v| v.as_object_mut()) {
                    result.insert(
                        "sessionId".to_string(),
                        Value::String(uuid::Uuid::new_v4().to_string()),
                    );
                }
            }

            Json(body)
        }

        async fn handle_health() -> &'static str {
            "ok"
        }

        let router = Router::new()
            .route("/mcp", post(handle_mcp_request))
            .route("/health", get(handle_health))
            .layer(CorsLayer::permissive())
            .with_state(processor);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind HTTP listener on {}", addr))?;
        info!("HTTP server listening on {}", addr);

        axum::serve(listener, router).await.context("HTTP server failed")?;

        Ok(())
    }

    /// Start the server in the configured mode
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting server in {:?} mode, version: {} with {} tools",
            self.config.server.mode,
            self.config.server.version,
            self.tool_count()
        );

        match self.config.server.mode {
            ServerMode::Stdio => self.serve_stdio().await,
            ServerMode::Http => self.serve_http().await,
        }
    }

    /// Start the server with graceful shutdown handling
    pub async fn start_with_graceful_shutdown(&self) -> Result<()> {
        let shutdown = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
            info!("Received shutdown signal");
        };

        tokio::select! {
            result = self.start() => {
                result
            }
            _ = shutdown => {
                info!("Shutting down gracefully");
                Ok(())
            }
        }
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.registry.count()
    }

    /// Get the underlying tool registry.
    pub fn tool_registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

// Helper function to create server with dependencies
pub fn create_server(config: AppConfig) -> Result<Server> {
    let settings = Arc::new(EnvSettings::new(config.yapi.clone()));
    let dispatcher = Arc::new(ToolDispatcher::new(settings));

    let server = Server::new(config, dispatcher);
    server.setup_tools()?;

    Ok(server)
}
