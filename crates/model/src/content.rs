use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a tool call requested by the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool.
    pub arguments: Value,
}

/// A normalized content unit from a provider response.
///
/// Provider responses interleave plain text with tool call requests;
/// each client parses its vendor's response into this shape so the
/// conversation loop never inspects vendor payloads directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentUnit {
    /// A plain text unit.
    Text(String),
    /// A tool call request unit.
    ToolCall(ToolCallRequest),
}
