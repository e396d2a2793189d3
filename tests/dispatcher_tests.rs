//! Tool dispatcher tests - exercise validation, normalization, fan-out and
//! error shaping against a stub YApi backend, no network involved.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Map, Value};

use yapi_mcp::internal::tools::{
    ToolDispatcher, GET_CATEGORY, GET_INTERFACE, GET_PROJECT_CATEGORIES,
};
use yapi_mcp::internal::yapi::{
    Category, Interface, InterfaceRecord, InterfaceSummary, SettingsSource, YapiApi, YapiError,
    YapiSettings,
};

// ==================== test doubles ====================

struct FixedSettings(YapiSettings);

impl SettingsSource for FixedSettings {
    fn resolve(&self) -> YapiSettings {
        self.0.clone()
    }
}

fn configured_settings() -> Arc<FixedSettings> {
    Arc::new(FixedSettings(YapiSettings {
        base_url: "http://yapi.example.com".to_string(),
        token: "secret".to_string(),
    }))
}

/// Stub backend: serves canned summaries/categories, fails detail fetches for
/// selected ids, and records every call it receives.
#[derive(Clone, Default)]
struct StubApi {
    summaries: Vec<InterfaceSummary>,
    categories: Vec<Category>,
    failing_ids: Vec<i64>,
    detail_calls: Arc<Mutex<Vec<String>>>,
    category_calls: Arc<Mutex<Vec<String>>>,
}

fn record(id: i64) -> InterfaceRecord {
    serde_json::from_value(json!({
        "_id": id,
        "title": format!("interface {}", id),
        "path": format!("/thing/{}", id),
        "method": "GET",
        "catid": 293,
        "project_id": 11,
        "req_body_other": "{\"a\": 1}",
        "res_body": "plain text response",
        "basepath": "/base"
    }))
    .expect("valid record")
}

fn summary(id: i64) -> InterfaceSummary {
    serde_json::from_value(json!({
        "_id": id,
        "title": format!("interface {}", id),
        "path": format!("/thing/{}", id),
        "method": "GET",
        "catid": 293,
        "project_id": 11,
        "status": "done"
    }))
    .expect("valid summary")
}

#[async_trait]
impl YapiApi for StubApi {
    async fn fetch_interface(&self, interface_id: &str) -> Result<Interface, YapiError> {
        self.detail_calls
            .lock()
            .unwrap()
            .push(interface_id.to_string());

        let id: i64 = interface_id
            .parse()
            .map_err(|_| YapiError::Api(format!("bad interface id: {}", interface_id)))?;
        if self.failing_ids.contains(&id) {
            return Err(YapiError::Api(format!("interface {} not found", id)));
        }
        Ok(Interface::from_record(record(id)))
    }

    async fn fetch_category_interfaces(
        &self,
        category_id: &str,
    ) -> Result<Vec<InterfaceSummary>, YapiError> {
        self.category_calls
            .lock()
            .unwrap()
            .push(category_id.to_string());
        Ok(self.summaries.clone())
    }

    async fn fetch_project_categories(
        &self,
        _project_id: &str,
    ) -> Result<Vec<Category>, YapiError> {
        Ok(self.categories.clone())
    }
}

fn dispatcher_with(api: StubApi) -> ToolDispatcher {
    let api: Arc<dyn YapiApi> = Arc::new(api);
    ToolDispatcher::with_connector(
        configured_settings(),
        Arc::new(move |_settings| Ok(Arc::clone(&api))),
    )
}

fn args(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

fn result_json(result: &CallToolResult) -> Value {
    serde_json::from_str(&result_text(result)).expect("result should be JSON")
}

// ==================== input and configuration errors ====================

#[tokio::test]
async fn test_unknown_tool_is_error_flagged() {
    let dispatcher = dispatcher_with(StubApi::default());

    let result = dispatcher.dispatch("nope", None).await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(result_text(&result), "error: unknown tool: nope");
}

#[tokio::test]
async fn test_missing_interface_id_argument() {
    let dispatcher = dispatcher_with(StubApi::default());

    // No argument bag at all
    let result = dispatcher.dispatch(GET_INTERFACE, None).await;
    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("missing required argument: interfaceId"));

    // Argument bag present but key missing
    let empty = Map::new();
    let result = dispatcher.dispatch(GET_INTERFACE, Some(&empty)).await;
    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("missing required argument: interfaceId"));
}

#[tokio::test]
async fn test_missing_category_id_argument() {
    let dispatcher = dispatcher_with(StubApi::default());

    let result = dispatcher.dispatch(GET_CATEGORY, None).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("missing required argument: categoryId"));
}

#[tokio::test]
async fn test_unconfigured_environment_fails_per_call() {
    let stub = StubApi::default();
    let api: Arc<dyn YapiApi> = Arc::new(stub.clone());
    let dispatcher = ToolDispatcher::with_connector(
        Arc::new(FixedSettings(YapiSettings::default())),
        Arc::new(move |_settings| Ok(Arc::clone(&api))),
    );

    let arguments = args("interfaceId", json!("1"));
    let result = dispatcher.dispatch(GET_INTERFACE, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("not configured"));
    // The check happens before any backend call
    assert!(stub.detail_calls.lock().unwrap().is_empty());
}

// ==================== get_yapi_interface ====================

#[tokio::test]
async fn test_get_interface_returns_pretty_json() {
    let dispatcher = dispatcher_with(StubApi::default());

    let arguments = args("interfaceId", json!("7"));
    let result = dispatcher.dispatch(GET_INTERFACE, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(false));
    let value = result_json(&result);
    assert_eq!(value["_id"], json!(7));
    assert_eq!(value["full_url"], json!("/base/thing/7"));
    // JSON-encoded request body was parsed, plain-text response body kept raw
    assert_eq!(value["req_body_other"]["a"], json!(1));
    assert_eq!(value["res_body"], json!("plain text response"));
}

#[tokio::test]
async fn test_numeric_argument_coercion() {
    let stub = StubApi::default();
    let dispatcher = dispatcher_with(stub.clone());

    let arguments = args("interfaceId", json!(123));
    let result = dispatcher.dispatch(GET_INTERFACE, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(*stub.detail_calls.lock().unwrap(), vec!["123".to_string()]);
}

// ==================== get_yapi_category ====================

#[tokio::test]
async fn test_category_prefix_normalization() {
    let stub = StubApi::default();
    let dispatcher = dispatcher_with(stub.clone());

    let arguments = args("categoryId", json!("cat_293"));
    dispatcher.dispatch(GET_CATEGORY, Some(&arguments)).await;

    let arguments = args("categoryId", json!("293"));
    dispatcher.dispatch(GET_CATEGORY, Some(&arguments)).await;

    // Both spellings hit the upstream with the bare id
    assert_eq!(
        *stub.category_calls.lock().unwrap(),
        vec!["293".to_string(), "293".to_string()]
    );
}

#[tokio::test]
async fn test_empty_category_short_circuits() {
    let stub = StubApi::default();
    let dispatcher = dispatcher_with(stub.clone());

    let arguments = args("categoryId", json!("cat_293"));
    let result = dispatcher.dispatch(GET_CATEGORY, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        result_json(&result),
        json!({
            "categoryId": "293",
            "totalCount": 0,
            "interfaces": [],
            "message": "no interfaces in this category"
        })
    );
    // No detail fan-out for an empty category
    assert!(stub.detail_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_category_fanout_keeps_failed_items() {
    let stub = StubApi {
        summaries: vec![summary(1), summary(2), summary(3)],
        failing_ids: vec![2],
        ..StubApi::default()
    };
    let dispatcher = dispatcher_with(stub.clone());

    let arguments = args("categoryId", json!("293"));
    let result = dispatcher.dispatch(GET_CATEGORY, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(false));
    let value = result_json(&result);
    assert_eq!(value["totalCount"], json!(3));

    let interfaces = value["interfaces"].as_array().expect("interfaces array");
    assert_eq!(interfaces.len(), 3);

    // Successful fetches come back as full interfaces, order preserved
    assert_eq!(interfaces[0]["full_url"], json!("/base/thing/1"));
    assert_eq!(interfaces[2]["full_url"], json!("/base/thing/3"));

    // The failed one keeps its summary fields plus the error annotation
    assert_eq!(interfaces[1]["_id"], json!(2));
    assert_eq!(interfaces[1]["status"], json!("done"));
    let detail_error = interfaces[1]["_detailError"]
        .as_str()
        .expect("degraded item should carry _detailError");
    assert!(detail_error.contains("failed to fetch detail"));
    assert!(detail_error.contains("interface 2 not found"));
}

#[tokio::test]
async fn test_category_aggregation_success_path() {
    let stub = StubApi {
        summaries: vec![summary(4), summary(5)],
        ..StubApi::default()
    };
    let dispatcher = dispatcher_with(stub.clone());

    let arguments = args("categoryId", json!("293"));
    let result = dispatcher.dispatch(GET_CATEGORY, Some(&arguments)).await;

    let value = result_json(&result);
    assert_eq!(value["categoryId"], json!("293"));
    assert_eq!(value["totalCount"], json!(2));
    assert!(value.get("message").is_none());
    assert_eq!(*stub.detail_calls.lock().unwrap(), vec!["4", "5"]);
}

// ==================== get_yapi_project_categories ====================

#[tokio::test]
async fn test_project_categories_tool() {
    let categories: Vec<Category> = serde_json::from_value(json!([
        {"_id": 293, "name": "orders", "project_id": 11, "desc": "order APIs"},
        {"_id": 294, "name": "users", "project_id": 11, "desc": null}
    ]))
    .expect("valid categories");

    let stub = StubApi {
        categories,
        ..StubApi::default()
    };
    let dispatcher = dispatcher_with(stub);

    let arguments = args("projectId", json!("11"));
    let result = dispatcher
        .dispatch(GET_PROJECT_CATEGORIES, Some(&arguments))
        .await;

    assert_eq!(result.is_error, Some(false));
    let value = result_json(&result);
    assert_eq!(value["projectId"], json!("11"));
    assert_eq!(value["totalCount"], json!(2));
    assert_eq!(value["categories"][0]["name"], json!("orders"));
}

#[tokio::test]
async fn test_backend_domain_error_surfaces_as_error_text() {
    let stub = StubApi {
        failing_ids: vec![9],
        ..StubApi::default()
    };
    let dispatcher = dispatcher_with(stub);

    let arguments = args("interfaceId", json!("9"));
    let result = dispatcher.dispatch(GET_INTERFACE, Some(&arguments)).await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(result_text(&result), "error: interface 9 not found");
}
