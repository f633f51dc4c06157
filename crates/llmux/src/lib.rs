//! A thin abstraction layer over multiple LLM providers with tools
//! discovered from a remote tool server.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you
//! can also use it as a library: pick a provider through the factory,
//! initialize it with an API key, optionally connect a tool bridge,
//! and process queries through the provider-agnostic [`LlmClient`]
//! contract.

#![deny(missing_docs)]

mod factory;

pub use factory::{ClientFactory, Provider};
pub use llmux_anthropic_model::{AnthropicClient, AnthropicConfig};
pub use llmux_gemini_model::{GeminiClient, GeminiConfig};
pub use llmux_mcp::McpBridge;
pub use llmux_model::{
    ContentUnit, Error, ErrorKind, LlmClient, ToolBridge, ToolCallRequest,
    ToolDescriptor, ToolOutcome,
};
