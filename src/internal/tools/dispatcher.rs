// src/internal/tools/dispatcher.rs

use std::sync::Arc;

use futures::future::join_all;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::internal::tools::definitions;
use crate::internal::yapi::settings::{SettingsSource, YapiSettings};
use crate::internal::yapi::types::{CategoryResult, DetailOutcome, ProjectCategoriesResult};
use crate::internal::yapi::{YapiApi, YapiClient, YapiError};

const EMPTY_CATEGORY_MESSAGE: &str = "no interfaces in this category";

/// Builds a YApi API handle from per-call settings. Wrapped in Arc so tests
/// can inject a stub implementation.
pub type Connector =
    Arc<dyn Fn(&YapiSettings) -> Result<Arc<dyn YapiApi>, YapiError> + Send + Sync>;

/// Maps tool invocations to YApi calls. Stateless across invocations:
/// settings are resolved and a client is built fresh on every dispatch.
pub struct ToolDispatcher {
    settings: Arc<dyn SettingsSource>,
    connector: Connector,
}

impl ToolDispatcher {
    pub fn new(settings: Arc<dyn SettingsSource>) -> Self {
        let connector: Connector = Arc::new(|settings: &YapiSettings| {
            Ok(Arc::new(YapiClient::new(settings)?) as Arc<dyn YapiApi>)
        });
        Self {
            settings,
            connector,
        }
    }

    pub fn with_connector(settings: Arc<dyn SettingsSource>, connector: Connector) -> Self {
        Self {
            settings,
            connector,
        }
    }

    /// Run one tool invocation. Never fails: every error is converted into a
    /// text content block `error: <message>` with the error flag set, so the
    /// host can branch without string-matching.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> CallToolResult {
        match self.call(name, arguments).await {
            Ok(text) => text_result(text, false),
            Err(e) => {
                warn!("tool {} failed: {}", name, e);
                text_result(format!("error: {}", e), true)
            }
        }
    }

    async fn call(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<String, YapiError> {
        let settings = self.settings.resolve();
        if !settings.is_configured() {
            return Err(YapiError::NotConfigured);
        }
        let api = (self.connector)(&settings)?;

        match name {
            definitions::GET_INTERFACE => self.get_interface(api, arguments).await,
            definitions::GET_CATEGORY => self.get_category(api, arguments).await,
            definitions::GET_PROJECT_CATEGORIES => {
                self.get_project_categories(api, arguments).await
            }
            other => Err(YapiError::UnknownTool(other.to_string())),
        }
    }

    async fn get_interface(
        &self,
        api: Arc<dyn YapiApi>,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<String, YapiError> {
        let interface_id = require_argument(arguments, "interfaceId")?;
        let interface = api.fetch_interface(&interface_id).await?;
        Ok(pretty(&interface))
    }

    async fn get_category(
        &self,
        api: Arc<dyn YapiApi>,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<String, YapiError> {
        let raw_id = require_argument(arguments, "categoryId")?;
        // cat_293 and 293 are equivalent; the remote API wants the bare id.
        let category_id = raw_id.strip_prefix("cat_").unwrap_or(&raw_id).to_string();

        info!("fetching interface list for category {}", category_id);
        let summaries = api.fetch_category_interfaces(&category_id).await?;

        if summaries.is_empty() {
            return Ok(pretty(&CategoryResult {
                category_id,
                total_count: 0,
                interfaces: Vec::new(),
                message: Some(EMPTY_CATEGORY_MESSAGE.to_string()),
            }));
        }

        // Fan out one detail fetch per summary and wait for all of them to
        // settle. A failed fetch degrades that item, it never aborts the rest.
        let fetches = summaries.into_iter().map(|summary| {
            let api = Arc::clone(&api);
            async move {
                match api.fetch_interface(&summary.id.to_string()).await {
                    Ok(detail) => DetailOutcome::Full(Box::new(detail)),
                    Err(e) => {
                        warn!("failed to fetch detail for interface {}: {}", summary.id, e);
                        DetailOutcome::Degraded {
                            detail_error: format!("failed to fetch detail: {}", e),
                            summary,
                        }
                    }
                }
            }
        });
        let interfaces = join_all(fetches).await;

        Ok(pretty(&CategoryResult {
            category_id,
            total_count: interfaces.len(),
            interfaces,
            message: None,
        }))
    }

    async fn get_project_categories(
        &self,
        api: Arc<dyn YapiApi>,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<String, YapiError> {
        let project_id = require_argument(arguments, "projectId")?;
        let categories = api.fetch_project_categories(&project_id).await?;

        Ok(pretty(&ProjectCategoriesResult {
            project_id,
            total_count: categories.len(),
            categories,
        }))
    }
}

/// Extract a required argument, coercing non-string values (some hosts send
/// numeric ids) to their string form.
fn require_argument(
    arguments: Option<&Map<String, Value>>,
    name: &'static str,
) -> Result<String, YapiError> {
    let value = arguments
        .and_then(|args| args.get(name))
        .ok_or(YapiError::MissingArgument(name))?;

    Ok(match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn text_result(text: String, is_error: bool) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated {
            annotations: None,
            raw: RawContent::Text(RawTextContent { text, meta: None }),
        }],
        is_error: Some(is_error),
        meta: None,
        structured_content: None,
    }
}
