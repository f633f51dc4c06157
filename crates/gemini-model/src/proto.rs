use llmux_model::{ContentUnit, ToolCallRequest, ToolDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

// -----------
// Conversions
// -----------

/// Removes `title` fields from a JSON schema.
///
/// The API rejects schemas carrying this presentation-only metadata, so
/// it is stripped at the top level and from every property, recursively.
pub(crate) fn clean_schema(mut schema: Value) -> Value {
    if let Value::Object(map) = &mut schema {
        map.remove("title");
        if let Some(Value::Object(properties)) = map.get_mut("properties") {
            for property in properties.values_mut() {
                *property = clean_schema(property.take());
            }
        }
    }
    schema
}

#[inline]
pub(crate) fn create_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool {
        function_declarations: vec![FunctionDeclaration {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: clean_schema(descriptor.input_schema.clone()),
        }],
    }
}

#[inline]
pub(crate) fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: role.to_owned(),
        parts: vec![Part {
            text: Some(text.to_owned()),
            ..Default::default()
        }],
    }
}

pub(crate) fn content_units(
    response: GenerateContentResponse,
) -> Vec<ContentUnit> {
    let mut units = Vec::new();
    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            if let Some(call) = part.function_call {
                units.push(ContentUnit::ToolCall(ToolCallRequest {
                    name: call.name,
                    arguments: call.args,
                }));
            } else if let Some(text) = part.text {
                units.push(ContentUnit::Text(text));
            }
        }
    }
    units
}
