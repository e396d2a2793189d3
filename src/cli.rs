use crate::internal::config::config::{AppConfig, ServerMode};
use clap::{Arg, Command};

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str =
        Box::leak(crate::internal::config::get_version_info().into_boxed_str());

    Command::new("yapi-mcp")
        .version(version)
        .about("YApi interface documentation MCP server")
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_parser(["stdio", "http"])
                .default_value("stdio")
                .help("Server mode (stdio|http)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to config file (default: ./config.yaml, /etc/yapi-mcp/config.yaml)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("127.0.0.1")
                .help("Server host (for http mode)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16))
                .default_value("3000")
                .help("Server port (for http mode)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("YApi base URL (overrides config file; YAPI_URL env wins at call time)"),
        )
}

pub fn parse_config(matches: &clap::ArgMatches) -> anyhow::Result<AppConfig> {
    let mode = match matches.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("http") => ServerMode::Http,
        Some("stdio") | None => ServerMode::Stdio,
        _ => ServerMode::Stdio,
    };

    let host = matches
        .get_one::<String>("host")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let port = matches.get_one::<u16>("port").copied().unwrap_or(3000);

    let base_url = matches.get_one::<String>("base-url").map(|s| s.to_string());

    let config_file = matches.get_one::<String>("config").map(|s| s.as_str());

    // Config file and environment first, CLI flags override
    let mut config = match AppConfig::load_from(config_file) {
        Ok(config) => config,
        Err(_) => AppConfig::from_mode(mode.clone()),
    };

    config.server.mode = mode;
    config.server.host = host;
    config.server.port = port;

    if let Some(url) = base_url {
        config.yapi.base_url = url;
    }

    Ok(config)
}
