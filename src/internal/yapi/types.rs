// src/internal/yapi/types.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope every YApi endpoint wraps its payload in. `errcode` is
/// YApi's own success indicator, independent of the HTTP status.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// A request/response body field as YApi stores it: either raw JSON text or
/// plain text, depending on how the interface was configured. `parse` is the
/// only constructor - best-effort decode, never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BodyField {
    Parsed(Value),
    Raw(String),
}

impl BodyField {
    /// Decode `text` as JSON if possible, otherwise keep the original string
    /// unchanged (including empty or plain-text bodies).
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => BodyField::Parsed(value),
            Err(_) => BodyField::Raw(text.to_string()),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, BodyField::Parsed(_))
    }
}

/// Wire form of the `/api/interface/get` payload. Body fields arrive as
/// strings; unmodeled fields are preserved in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub path: String,
    pub method: String,
    pub catid: i64,
    pub project_id: i64,
    #[serde(default)]
    pub req_params: Option<Vec<Value>>,
    #[serde(default)]
    pub req_query: Option<Vec<Value>>,
    #[serde(default)]
    pub req_headers: Option<Vec<Value>>,
    #[serde(default)]
    pub req_body_type: Option<String>,
    #[serde(default)]
    pub req_body_form: Option<Vec<Value>>,
    #[serde(default)]
    pub req_body_other: Option<String>,
    #[serde(default)]
    pub res_body: Option<String>,
    #[serde(default)]
    pub res_body_type: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub basepath: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One documented API endpoint, normalized for tool output: body fields are
/// parsed where possible and `full_url` is derived from basepath + path.
#[derive(Debug, Clone, Serialize)]
pub struct Interface {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub path: String,
    pub method: String,
    pub catid: i64,
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_params: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_query: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_headers: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_body_form: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_body_other: Option<BodyField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_body: Option<BodyField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basepath: Option<String>,
    pub full_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Interface {
    /// Normalize a wire record: best-effort parse of the body fields and the
    /// derived full URL (basepath defaults to empty).
    pub fn from_record(record: InterfaceRecord) -> Self {
        let full_url = format!(
            "{}{}",
            record.basepath.as_deref().unwrap_or_default(),
            record.path
        );

        Self {
            id: record.id,
            title: record.title,
            path: record.path,
            method: record.method,
            catid: record.catid,
            project_id: record.project_id,
            req_params: record.req_params,
            req_query: record.req_query,
            req_headers: record.req_headers,
            req_body_type: record.req_body_type,
            req_body_form: record.req_body_form,
            req_body_other: record.req_body_other.map(|text| BodyField::parse(&text)),
            res_body: record.res_body.map(|text| BodyField::parse(&text)),
            res_body_type: record.res_body_type,
            desc: record.desc,
            markdown: record.markdown,
            basepath: record.basepath,
            full_url,
            extra: record.extra,
        }
    }
}

/// Subset of interface fields returned by the listing-by-category call. The
/// detail call returns the full `Interface`; these two are distinct entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceSummary {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub path: String,
    pub method: String,
    pub catid: i64,
    pub project_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named grouping of interfaces within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<InterfaceSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of one detail fetch during category aggregation. A failed fetch
/// degrades to the summary plus an attached error, it is never dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DetailOutcome {
    Full(Box<Interface>),
    Degraded {
        #[serde(flatten)]
        summary: InterfaceSummary,
        #[serde(rename = "_detailError")]
        detail_error: String,
    },
}

/// Aggregated result of the `get_yapi_category` tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category_id: String,
    pub total_count: usize,
    pub interfaces: Vec<DetailOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of the `get_yapi_project_categories` tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCategoriesResult {
    pub project_id: String,
    pub total_count: usize,
    pub categories: Vec<Category>,
}
