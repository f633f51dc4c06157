use llmux_model::ToolDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The protocol revision spoken over the SSE transport.
pub(crate) const PROTOCOL_VERSION: &str = "2024-11-05";

const JSONRPC_VERSION: &str = "2.0";

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

impl<'a> Request<'a> {
    #[inline]
    pub fn new(id: u64, method: &'a str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Notification<'a> {
    jsonrpc: &'static str,
    method: &'a str,
}

impl<'a> Notification<'a> {
    #[inline]
    pub fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
        }
    }
}

pub(crate) fn initialize_params() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {},
        "clientInfo": {
            "name": "llmux",
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

pub(crate) fn call_tool_params(name: &str, arguments: Value) -> Value {
    json!({
        "name": name,
        "arguments": arguments,
    })
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Response {
    #[serde(default)]
    pub id: Option<u64>,
    // Present on server-initiated requests and notifications, which
    // share the wire with responses.
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ListToolsResult {
    pub tools: Vec<ToolEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ToolEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

impl From<ToolEntry> for ToolDescriptor {
    fn from(entry: ToolEntry) -> Self {
        Self {
            name: entry.name,
            description: entry.description,
            input_schema: entry.input_schema,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CallToolResult {
    #[serde(default)]
    pub content: Value,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request =
            Request::new(7, "tools/call", Some(call_tool_params("add", json!({ "a": 1 }))));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": { "name": "add", "arguments": { "a": 1 } },
            })
        );

        // `params` must be absent, not null, when omitted.
        let request = Request::new(8, "tools/list", None);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("params").is_none());
    }

    #[test]
    fn test_parse_tool_catalog() {
        let result: ListToolsResult = serde_json::from_value(json!({
            "tools": [
                {
                    "name": "lookup",
                    "description": "Looks something up",
                    "inputSchema": { "type": "object" },
                },
                { "name": "bare" },
            ],
        }))
        .unwrap();
        let descriptors: Vec<ToolDescriptor> =
            result.tools.into_iter().map(Into::into).collect();
        assert_eq!(descriptors[0].name, "lookup");
        assert_eq!(descriptors[0].input_schema, json!({ "type": "object" }));
        assert_eq!(descriptors[1].description, "");
        assert_eq!(descriptors[1].input_schema, Value::Null);
    }
}
