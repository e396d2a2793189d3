// src/internal/tools/definitions.rs

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{Map, Value};

pub const GET_INTERFACE: &str = "get_yapi_interface";
pub const GET_CATEGORY: &str = "get_yapi_category";
pub const GET_PROJECT_CATEGORIES: &str = "get_yapi_project_categories";

/// Static metadata for the three YApi tools.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        make_tool(
            GET_INTERFACE,
            "Fetch the full detail of a single YApi interface, including request \
             parameters and response schema. Input the interface id.",
            "interfaceId",
            "YApi interface id",
        ),
        make_tool(
            GET_CATEGORY,
            "Fetch all interfaces under a YApi category, with request and response \
             detail for each. Accepts both cat_293 and 293 as the category id.",
            "categoryId",
            "YApi category id, either cat_293 or 293",
        ),
        make_tool(
            GET_PROJECT_CATEGORIES,
            "List the interface categories of a YApi project.",
            "projectId",
            "YApi project id",
        ),
    ]
}

/// Each tool takes exactly one required string argument.
fn make_tool(name: &'static str, description: &str, param: &str, param_desc: &str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.to_string().into()),
        input_schema: Arc::new(single_string_schema(param, param_desc)),
        annotations: None,
        icons: None,
        meta: None,
        title: None,
        output_schema: None,
    }
}

fn single_string_schema(param: &str, description: &str) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        param.to_string(),
        serde_json::json!({
            "type": "string",
            "description": description,
        }),
    );

    let mut schema = Map::new();
    schema.insert(
        "type".to_string(),
        Value::String("object".to_string()),
    );
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert(
        "required".to_string(),
        Value::Array(vec![Value::String(param.to_string())]),
    );

    schema
}
