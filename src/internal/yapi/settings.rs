// src/internal/yapi/settings.rs

use crate::internal::config::YapiConfig;

/// Resolved YApi connection settings for a single tool invocation.
#[derive(Debug, Clone, Default)]
pub struct YapiSettings {
    pub base_url: String,
    pub token: String,
}

impl YapiSettings {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }
}

/// Source of YApi settings. Resolution happens fresh on every tool call so a
/// host that injects credentials after process launch still works; the
/// configuration check is part of each dispatch, not a startup precondition.
pub trait SettingsSource: Send + Sync {
    fn resolve(&self) -> YapiSettings;
}

/// Production source: process environment first (`YAPI_BASE_URL`, with
/// `YAPI_URL` as an alias, and `YAPI_TOKEN`), config-file values as fallback.
pub struct EnvSettings {
    defaults: YapiConfig,
}

impl EnvSettings {
    pub fn new(defaults: YapiConfig) -> Self {
        Self { defaults }
    }

    fn env_var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

impl SettingsSource for EnvSettings {
    fn resolve(&self) -> YapiSettings {
        let base_url = Self::env_var("YAPI_BASE_URL")
            .or_else(|| Self::env_var("YAPI_URL"))
            .unwrap_or_else(|| self.defaults.base_url.clone());

        let token =
            Self::env_var("YAPI_TOKEN").unwrap_or_else(|| self.defaults.token.clone());

        YapiSettings { base_url, token }
    }
}
