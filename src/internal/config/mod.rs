// src/internal/config/mod.rs

pub mod config;

// Re-export the commonly used types
pub use config::{
    get_version_info, AppConfig, LoggingConfig, ServerConfig, ServerMode, YapiConfig,
};
