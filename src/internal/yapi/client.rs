// src/internal/yapi/client.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::internal::yapi::error::YapiError;
use crate::internal::yapi::settings::YapiSettings;
use crate::internal::yapi::types::{
    ApiEnvelope, Category, Interface, InterfaceRecord, InterfaceSummary,
};

const DETAIL_PATH: &str = "/api/interface/get";
const LIST_CAT_PATH: &str = "/api/interface/list_cat";
const LIST_MENU_PATH: &str = "/api/interface/list_menu";

/// Read-only view of the YApi endpoints the tools consume. The dispatcher
/// talks to this trait so tests can substitute a stub without any network.
#[async_trait]
pub trait YapiApi: Send + Sync {
    /// Fetch one interface's full metadata by id.
    async fn fetch_interface(&self, interface_id: &str) -> Result<Interface, YapiError>;

    /// Fetch the interface summaries belonging to a category.
    async fn fetch_category_interfaces(
        &self,
        category_id: &str,
    ) -> Result<Vec<InterfaceSummary>, YapiError>;

    /// Fetch the interface categories of a project.
    async fn fetch_project_categories(
        &self,
        project_id: &str,
    ) -> Result<Vec<Category>, YapiError>;
}

/// HTTP client bound to a YApi instance. The token is appended as a query
/// parameter on every request, so call sites never repeat it. Construction
/// performs no network I/O.
#[derive(Clone)]
pub struct YapiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl YapiClient {
    pub fn new(settings: &YapiSettings) -> Result<Self, YapiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| YapiError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        })
    }

    /// GET a YApi endpoint, unwrap the `{errcode, errmsg, data}` envelope and
    /// return `data`. A non-zero errcode is a domain failure carrying the
    /// remote message, or `fallback_msg` when YApi sent none.
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fallback_msg: &str,
    ) -> Result<Option<T>, YapiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| YapiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| YapiError::Request(e.to_string()))?;

        if !status.is_success() {
            // A failed response may still carry the envelope; prefer its errmsg.
            let message = serde_json::from_slice::<ApiEnvelope<Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.errmsg)
                .unwrap_or_else(|| format!("HTTP status {}", status.as_u16()));
            return Err(YapiError::Request(message));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)
            .map_err(|e| YapiError::Request(format!("invalid response body: {}", e)))?;

        if envelope.errcode != 0 {
            return Err(YapiError::Api(
                envelope.errmsg.unwrap_or_else(|| fallback_msg.to_string()),
            ));
        }

        Ok(envelope.data)
    }
}

#[async_trait]
impl YapiApi for YapiClient {
    async fn fetch_interface(&self, interface_id: &str) -> Result<Interface, YapiError> {
        let record: InterfaceRecord = self
            .get_data(
                DETAIL_PATH,
                &[("id", interface_id)],
                "failed to fetch interface detail",
            )
            .await?
            .ok_or_else(|| YapiError::Api("failed to fetch interface detail".to_string()))?;

        Ok(Interface::from_record(record))
    }

    async fn fetch_category_interfaces(
        &self,
        category_id: &str,
    ) -> Result<Vec<InterfaceSummary>, YapiError> {
        let data: Option<Value> = self
            .get_data(
                LIST_CAT_PATH,
                &[("catid", category_id)],
                "failed to fetch category interface list",
            )
            .await?;

        // Missing or malformed `data.list` both mean "no interfaces".
        let summaries = data
            .and_then(|value| value.get("list").cloned())
            .and_then(|list| serde_json::from_value::<Vec<InterfaceSummary>>(list).ok())
            .unwrap_or_default();

        debug!("category {} has {} interfaces", category_id, summaries.len());
        Ok(summaries)
    }

    async fn fetch_project_categories(
        &self,
        project_id: &str,
    ) -> Result<Vec<Category>, YapiError> {
        let categories: Vec<Category> = self
            .get_data(
                LIST_MENU_PATH,
                &[("project_id", project_id)],
                "failed to fetch project categories",
            )
            .await?
            .unwrap_or_default();

        Ok(categories)
    }
}
