mod calc;
mod convert;
mod encode;
mod format;
mod generate;
mod inspect;
mod text;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use toolbelt_core::config::Config;
use toolbelt_core::ToolError;

pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

pub type ToolOutcome = Result<serde_json::Value, JsonRpcError>;

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn to_value(value: impl Serialize) -> ToolOutcome {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub(crate) fn tool(name: &str, description: &str, input_schema: serde_json::Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

pub(crate) fn parse_args<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T, JsonRpcError> {
    let arguments = arguments.unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

/// A tool failure is a result the caller reads, not a protocol error.
fn tool_failure(error: ToolError) -> ToolOutcome {
    to_value(CallToolResult {
        content: vec![Content::Text {
            text: error.to_string(),
        }],
        is_error: Some(true),
    })
}

pub(crate) fn text_result(result: toolbelt_core::Result<String>) -> ToolOutcome {
    match result {
        Ok(text) => to_value(CallToolResult {
            content: vec![Content::Text { text }],
            is_error: None,
        }),
        Err(error) => tool_failure(error),
    }
}

pub(crate) fn json_result<T: Serialize>(result: toolbelt_core::Result<T>) -> ToolOutcome {
    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Serialization error: {e}")))?;
            text_result(Ok(text))
        }
        Err(error) => tool_failure(error),
    }
}

pub(crate) fn unknown_tool(name: &str) -> ToolOutcome {
    Err(JsonRpcError::new(INVALID_PARAMS, format!("Unknown tool: {name}")))
}

pub fn handle_initialize() -> ToolOutcome {
    to_value(InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "toolbelt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

pub fn handle_tools_list() -> ToolOutcome {
    let tools = [
        text::tools(),
        format::tools(),
        encode::tools(),
        convert::tools(),
        calc::tools(),
        generate::tools(),
        inspect::tools(),
    ]
    .into_iter()
    .flatten()
    .collect();

    to_value(ToolsList { tools })
}

/// Tool names are `<family>_<tool>`; the family picks the handler.
pub fn handle_tools_call(params: Option<serde_json::Value>, config: &Config) -> ToolOutcome {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    log::debug!("tools/call {}", params.name);
    let name = params.name.as_str();
    match name.split_once('_').map(|(family, _)| family) {
        Some("text") => text::call(name, params.arguments),
        Some("format") => format::call(name, params.arguments, config),
        Some("encode") => encode::call(name, params.arguments),
        Some("convert") => convert::call(name, params.arguments),
        Some("calc") => calc::call(name, params.arguments),
        Some("generate") => generate::call(name, params.arguments),
        Some("inspect") => inspect::call(name, params.arguments),
        _ => unknown_tool(name),
    }
}
