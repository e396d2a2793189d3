use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version information
pub fn get_version_info() -> String {
    let build_timestamp = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");
    let cargo_target_triple = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");

    format!(
        "yapi-mcp version {}\n\
         Built: {} ({})\n\
         Rust: {}\n\
         Target: {}",
        VERSION, build_date, build_timestamp, rustc_semver, cargo_target_triple
    )
}

/// ServerMode represents the server operation mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum ServerMode {
    #[serde(rename = "stdio")]
    #[default]
    Stdio,
    #[serde(rename = "http")]
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub mode: ServerMode,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_name() -> String {
    "yapi-mcp".to_string()
}
fn default_version() -> String {
    VERSION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub append_to_file: bool,
    #[serde(default)]
    pub disable_console: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

/// YApi connection defaults from the config file. The process environment
/// (`YAPI_BASE_URL`/`YAPI_URL`, `YAPI_TOKEN`) overrides these per call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct YapiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub yapi: YapiConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then config files, then `YAPI_MCP_*`
    /// environment variables. Missing YApi credentials are not an error here;
    /// every tool call re-checks them.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as `load`, with an extra highest-priority config file.
    pub fn load_from(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config_builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.mode", "stdio")?
            .set_default("server.name", "yapi-mcp")?
            .set_default("server.version", VERSION)?
            .set_default("logging.level", "info")?
            .set_default("logging.color", true)?
            // Load config files in order of precedence
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("/etc/yapi-mcp/config").required(false))
            .add_source(File::with_name("/config/config").required(false));

        if let Some(path) = config_file {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        let config = config_builder
            .add_source(
                config::Environment::with_prefix("YAPI_MCP")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn from_mode(mode: ServerMode) -> Self {
        Self {
            server: ServerConfig {
                mode,
                port: default_port(),
                host: default_host(),
                name: default_name(),
                version: default_version(),
            },
            ..Default::default()
        }
    }
}
