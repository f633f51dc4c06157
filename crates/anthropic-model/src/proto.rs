use llmux_model::{ContentUnit, ToolCallRequest, ToolDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub(crate) enum Message {
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        name: String,
        input: Value,
    },
    #[serde(other)]
    Unknown,
}

// -----------
// Conversions
// -----------

#[inline]
pub(crate) fn create_tool(descriptor: &ToolDescriptor) -> Tool {
    // Anthropic accepts the schema as-is, no cleaning is required.
    Tool {
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        input_schema: descriptor.input_schema.clone(),
    }
}

pub(crate) fn content_units(response: MessagesResponse) -> Vec<ContentUnit> {
    response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(ContentUnit::Text(text)),
            ContentBlock::ToolUse { name, input } => {
                Some(ContentUnit::ToolCall(ToolCallRequest {
                    name,
                    arguments: input,
                }))
            }
            ContentBlock::Unknown => None,
        })
        .collect()
}
