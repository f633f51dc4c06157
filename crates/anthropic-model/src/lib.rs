//! An LLM client for the Anthropic Messages API.

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

pub use config::AnthropicConfig;
use proto::{Message, MessagesRequest};
use transport::Transport;

const MAX_TOKENS: u32 = 4096;

/// An LLM client backed by the Anthropic Messages API.
pub struct AnthropicClient {
    config: AnthropicConfig,
    transport: Option<Transport>,
    tools: Vec<proto::Tool>,
    bridge: Option<Box<dyn ToolBridge>>,
}

impl AnthropicClient {
    /// Creates a new client with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(AnthropicConfig::default())
    }

    /// Creates a new client with the given configuration.
    #[inline]
    pub fn with_config(config: AnthropicConfig) -> Self {
        Self {
            config,
            transport: None,
            tools: vec![],
            bridge: None,
        }
    }

    fn make_request(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<&str>,
    ) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            system: system_prompt.map(ToOwned::to_owned),
            messages,
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

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn initialize(&mut self, api_key: &str) -> Result<(), Error> {
        if api_key.trim().is_empty() {
            return Err(Error::configuration("API key must not be empty"));
        }
        self.transport = Some(Transport::http(api_key, &self.config.base_url));
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
        let mut messages = vec![Message::User {
            content: query.to_owned(),
        }];

        let request = self.make_request(messages.clone(), system_prompt);
        let transport =
            self.transport.as_mut().ok_or_else(Error::not_initialized)?;
        let response = transport.send(&request).await?;
        trace!("stop reason: {:?}", response.stop_reason);

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

                    let outcome = self.run_tool(call).await;
                    messages.push(Message::Assistant {
                        content: format!(
                            "Tool call result: {}",
                            serde_json::to_string(&outcome)
                                .unwrap_or_default()
                        ),
                    });

                    let request =
                        self.make_request(messages.clone(), system_prompt);
                    let transport = self
                        .transport
                        .as_mut()
                        .ok_or_else(Error::not_initialized)?;
                    let response = transport.send(&request).await?;
                    trace!("stop reason: {:?}", response.stop_reason);

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
