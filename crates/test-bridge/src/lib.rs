//! A local fake tool bridge for testing purpose.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llmux_model::{Error, ToolBridge, ToolDescriptor, ToolOutcome};
use serde_json::Value;

/// A recorded `call_tool` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub name: String,
    pub arguments: Value,
}

#[derive(Default)]
struct Inner {
    outcomes: VecDeque<ToolOutcome>,
    calls: Vec<RecordedCall>,
    cleanup_count: u32,
}

/// A local fake tool bridge for testing purpose.
///
/// Before handing the bridge to a client, set up the tool catalog and
/// push the outcomes that `call_tool` should return, in order. Every
/// invocation is recorded and can be inspected later through a cloned
/// handle, since all clones share the same state.
///
/// # Note
///
/// This type is not optimized for production use. You should only use
/// it for testing.
#[derive(Clone, Default)]
pub struct TestToolBridge {
    tools: Vec<ToolDescriptor>,
    inner: Arc<Mutex<Inner>>,
}

impl TestToolBridge {
    /// Adds a tool to the catalog.
    #[inline]
    pub fn add_tool(&mut self, descriptor: ToolDescriptor) {
        self.tools.push(descriptor);
    }

    /// Queues the outcome for the next `call_tool` invocation.
    #[inline]
    pub fn push_outcome(&self, outcome: ToolOutcome) {
        self.inner.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Returns all recorded invocations.
    #[inline]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Returns how many times `cleanup` has been called.
    #[inline]
    pub fn cleanup_count(&self) -> u32 {
        self.inner.lock().unwrap().cleanup_count
    }
}

#[async_trait]
impl ToolBridge for TestToolBridge {
    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> ToolOutcome {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            name: name.to_owned(),
            arguments,
        });
        inner.outcomes.pop_front().unwrap_or_else(|| {
            ToolOutcome::Error("no scripted outcome left".to_owned())
        })
    }

    async fn cleanup(&mut self) -> Result<(), Error> {
        self.inner.lock().unwrap().cleanup_count += 1;
        Ok(())
    }
}
