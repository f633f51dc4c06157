use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::bridge::ToolBridge;
use crate::error::Error;
use crate::tool::ToolDescriptor;

/// A client for one LLM provider.
///
/// Implementations translate between this contract and one vendor's
/// inference API. Callers depend only on this trait, never on a
/// concrete client; the factory in the top-level crate hands out
/// `Box<dyn LlmClient>` values.
///
/// A client processes one query at a time. The `&mut self` receivers
/// make concurrent `process_query` calls on a single instance
/// unrepresentable; callers needing concurrency use independent
/// instances.
#[async_trait]
pub trait LlmClient: Send {
    /// Establishes the vendor session with the given API key.
    ///
    /// Fails with [`ErrorKind::Configuration`] if the credentials are
    /// invalid.
    ///
    /// [`ErrorKind::Configuration`]: crate::ErrorKind::Configuration
    async fn initialize(&mut self, api_key: &str) -> Result<(), Error>;

    /// Translates tool descriptors into the vendor-native tool list.
    ///
    /// This is a pure translation with no side effects. Schema fields
    /// the vendor rejects are stripped before forwarding.
    fn convert_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value>;

    /// Connects a tool bridge to the given tool server endpoint and
    /// installs it, populating the client's translated tool list from
    /// the fetched catalog.
    async fn connect_tool_bridge(&mut self, endpoint: &str) -> Result<(), Error>;

    /// Installs an already-connected tool bridge.
    ///
    /// This is the seam used by tests and embedders that manage the
    /// bridge themselves; `connect_tool_bridge` is implemented in terms
    /// of it.
    fn attach_tool_bridge(&mut self, bridge: Box<dyn ToolBridge>);

    /// Processes a user query and returns the final answer text.
    ///
    /// Each call starts a fresh single-turn conversation seeded only by
    /// the query and the optional system prompt. At most one tool
    /// round-trip happens per call: the first tool call unit in the
    /// response is invoked through the bridge and its outcome is folded
    /// into exactly one follow-up request.
    ///
    /// Fails with [`ErrorKind::NotInitialized`] if called before
    /// `initialize`, and with [`ErrorKind::Inference`] if an inference
    /// request fails. Tool invocation faults never fail this method.
    ///
    /// [`ErrorKind::NotInitialized`]: crate::ErrorKind::NotInitialized
    /// [`ErrorKind::Inference`]: crate::ErrorKind::Inference
    async fn process_query(
        &mut self,
        query: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, Error>;

    /// Releases the tool bridge session, if any.
    ///
    /// Calling this more than once is a no-op.
    async fn cleanup(&mut self) -> Result<(), Error>;
}

impl fmt::Debug for dyn LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn LlmClient")
    }
}
