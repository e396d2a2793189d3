use tracing::{error, info};
use yapi_mcp::cli::{build_cli, parse_config};
use yapi_mcp::internal::server::create_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = yapi_mcp::internal::logger::init_logger(&config.logging) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("Starting YApi MCP Server");
    info!("Version: {}", yapi_mcp::internal::config::get_version_info());
    info!("Mode: {:?}", config.server.mode);

    // Credentials are resolved per tool call; report their presence only.
    let configured = !config.yapi.base_url.is_empty()
        || std::env::var("YAPI_BASE_URL").is_ok()
        || std::env::var("YAPI_URL").is_ok();
    info!(
        "YApi base URL: {}",
        if configured { "configured" } else { "not configured" }
    );

    let server = match create_server(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Server initialized with {} tools", server.tool_count());

    // Start server with graceful shutdown
    if let Err(e) = server.start_with_graceful_shutdown().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
    Ok(())
}
