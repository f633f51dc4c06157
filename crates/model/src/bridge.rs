use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::tool::{ToolDescriptor, ToolOutcome};

/// A type that mediates discovery and invocation of tools against a
/// remote tool-serving process.
///
/// A connected bridge owns a live session; the catalog it exposes is
/// fetched once at connect time and cached. Invocation faults never
/// escape `call_tool`, they are converted into [`ToolOutcome::Error`]
/// so the model can respond to the failure.
#[async_trait]
pub trait ToolBridge: Send {
    /// Returns the cached tool catalog. Does not re-fetch.
    fn tools(&self) -> &[ToolDescriptor];

    /// Invokes a tool on the tool server.
    async fn call_tool(&mut self, name: &str, arguments: Value) -> ToolOutcome;

    /// Releases the session and transport resources.
    ///
    /// Calling this more than once is a no-op. Dropping the bridge has
    /// the same effect.
    async fn cleanup(&mut self) -> Result<(), Error>;
}
