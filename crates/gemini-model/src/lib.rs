//! An LLM client for the Gemini generateContent API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;
mod transport;

use async_trait::async_trait;
use llmux_mcp::McpBridge;
use llmux_model::{
    ContentUnit, Error, LlmClient, ToolBridge, ToolCallRequest,
    ToolDescriptor, ToolOutcome,
};
use serde_json::Value;

pub use config::GeminiConfig;
use proto::{
    Content, FunctionCall, FunctionResponse, GenerateContentRequest, Part,
};
use transport::Transport;

/// An LLM client backed by the Gemini generateContent API.
pub struct GeminiClient {
    config: GeminiConfig,
    transport: Option<Transport>,
    tools: Vec<proto::Tool>,
    bridge: Option<Box<dyn ToolBridge>>,
}

impl GeminiClient {
    /// Creates a new client with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(GeminiConfig::default())
    }

    /// Creates a new client with the given configuration.
    #[inline]
    pub fn with_config(config: GeminiConfig) -> Self {
        Self {
            config,
            transport: None,
            tools: vec![],
            bridge: None,
        }
    }

    fn make_request(&self, contents: Vec<Content>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents,
            tools: self.tools.clone(),
        }
    }

    async fn run_tool(&mut self, call: ToolCallRequest) -> ToolOutcome {
        let Some(bridge) = self.bridge.as_mut() else {
            return ToolOutcome::Error(
                "no tool bridge is connected".to_owned(),
            );
        };
        debug!("model requested tool: {}", call.name);
        bridge.call_tool(&call.name, call.arguments).await
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn initialize(&mut self, api_key: &str) -> Result<(), Error> {
        if api_key.trim().is_empty() {
            return Err(Error::configuration("API key must not be empty"));
        }
        self.transport = Some(Transport::http(
            api_key,
            &self.config.base_url,
            &self.config.model,
        ));
        Ok(())
    }

    fn convert_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(proto::create_tool)
            .map(|tool| serde_json::to_value(tool).unwrap_or_default())
            .collect()
    }

    async fn connect_tool_bridge(&mut self, endpoint: &str) -> Result<(), Error> {
        let bridge = McpBridge::connect(endpoint).await?;
        self.attach_tool_bridge(Box::new(bridge));
        Ok(())
    }

    fn attach_tool_bridge(&mut self, bridge: Box<dyn ToolBridge>) {
        self.tools = bridge.tools().iter().map(proto::create_tool).collect();
        self.bridge = Some(bridge);
    }

    async fn process_query(
        &mut self,
        query: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, Error> {
        let user_content = proto::text_content("user", query);

        // The system prompt travels as an injected leading turn.
        let mut contents = Vec::new();
        if let Some(system_prompt) = system_prompt {
            contents.push(proto::text_content("system", system_prompt));
        }
        contents.push(user_content.clone());

        let request = self.make_request(contents);
        let transport =
            self.transport.as_mut().ok_or_else(Error::not_initialized)?;
        let response = transport.send(&request).await?;

        let mut final_text = Vec::new();
        let mut tool_round_done = false;
        for unit in proto::content_units(response) {
            match unit {
                ContentUnit::Text(text) => final_text.push(text),
                ContentUnit::ToolCall(call) => {
                    // Only the first tool call is acted upon; one tool
                    // round-trip per query.
                    if tool_round_done {
                        debug!("ignoring extra tool call: {}", call.name);
                        continue;
                    }
                    tool_round_done = true;

                    let call_content = Content {
                        role: "model".to_owned(),
                        parts: vec![Part {
                            function_call: Some(FunctionCall {
                                name: call.name.clone(),
                                args: call.arguments.clone(),
                            }),
                            ..Default::default()
                        }],
                    };
                    let tool_name = call.name.clone();
                    let outcome = self.run_tool(call).await;
                    let response_content = Content {
                        role: "tool".to_owned(),
                        parts: vec![Part {
                            function_response: Some(FunctionResponse {
                                name: tool_name,
                                response: serde_json::to_value(&outcome)
                                    .unwrap_or_default(),
                            }),
                            ..Default::default()
                        }],
                    };

                    // The follow-up repeats the query, the invocation
                    // and the tool result.
                    let request = self.make_request(vec![
                        user_content.clone(),
                        call_content,
                        response_content,
                    ]);
                    let transport = self
                        .transport
                        .as_mut()
                        .ok_or_else(Error::not_initialized)?;
                    let response = transport.send(&request).await?;

                    let text = proto::content_units(response)
                        .into_iter()
                        .find_map(|unit| match unit {
                            ContentUnit::Text(text) => Some(text),
                            _ => None,
                        });
                    if let Some(text) = text {
                        final_text.push(text);
                    }
                }
            }
        }

        Ok(final_text.join("\n"))
    }

    async fn cleanup(&mut self) -> Result<(), Error> {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.cleanup().await?;
        }
        Ok(())
    }
}
