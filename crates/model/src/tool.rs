use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a tool offered by the tool server.
///
/// Descriptors are immutable once fetched. The tool bridge owns the
/// catalog; provider clients hold translated copies in their own
/// vendor-native shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Input definition of the tool, typically a
    /// [JSON schema](https://json-schema.org/).
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The outcome of invoking a tool.
///
/// Invocation faults are data, not errors: a failed call becomes an
/// `Error` outcome that is sent back to the model as the tool result,
/// allowing it to react to the failure in natural language.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolOutcome {
    /// The tool completed and produced this payload.
    #[serde(rename = "result")]
    Result(Value),
    /// The tool (or its transport) failed with this message.
    #[serde(rename = "error")]
    Error(String),
}
