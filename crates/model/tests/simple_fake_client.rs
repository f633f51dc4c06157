use async_trait::async_trait;
use llmux_model::{
    Error, ErrorKind, LlmClient, ToolBridge, ToolDescriptor, ToolOutcome,
};
use serde_json::{Value, json};

struct FakeToolBridge {
    tools: Vec<ToolDescriptor>,
    calls: Vec<(String, Value)>,
}

#[async_trait]
impl ToolBridge for FakeToolBridge {
    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> ToolOutcome {
        self.calls.push((name.to_owned(), arguments));
        ToolOutcome::Result(json!("it worked"))
    }

    async fn cleanup(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// A client that always asks its bridge to run the first known tool,
/// then answers with the serialized outcome.
#[derive(Default)]
struct FakeLlmClient {
    initialized: bool,
    bridge: Option<Box<dyn ToolBridge>>,
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn initialize(&mut self, api_key: &str) -> Result<(), Error> {
        if api_key.is_empty() {
            return Err(Error::configuration("empty API key"));
        }
        self.initialized = true;
        Ok(())
    }

    fn convert_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| json!({ "name": tool.name }))
            .collect()
    }

    async fn connect_tool_bridge(&mut self, _endpoint: &str) -> Result<(), Error> {
        unimplemented!("the fake only supports attached bridges")
    }

    fn attach_tool_bridge(&mut self, bridge: Box<dyn ToolBridge>) {
        self.bridge = Some(bridge);
    }

    async fn process_query(
        &mut self,
        query: &str,
        _system_prompt: Option<&str>,
    ) -> Result<String, Error> {
        if !self.initialized {
            return Err(Error::not_initialized());
        }
        let Some(bridge) = self.bridge.as_mut() else {
            return Ok(format!("no tools for: {query}"));
        };
        let name = bridge.tools()[0].name.clone();
        let outcome = bridge.call_tool(&name, json!({ "q": query })).await;
        Ok(serde_json::to_string(&outcome).unwrap())
    }

    async fn cleanup(&mut self) -> Result<(), Error> {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.cleanup().await?;
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_contract_through_trait_object() {
    let mut client: Box<dyn LlmClient> = Box::new(FakeLlmClient::default());

    let err = client.process_query("Hi", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotInitialized);

    client.initialize("key").await.unwrap();

    let descriptor = ToolDescriptor {
        name: "lookup".to_owned(),
        description: "Looks something up".to_owned(),
        input_schema: json!({ "type": "object" }),
    };
    let converted = client.convert_tools(std::slice::from_ref(&descriptor));
    assert_eq!(converted, vec![json!({ "name": "lookup" })]);

    client.attach_tool_bridge(Box::new(FakeToolBridge {
        tools: vec![descriptor],
        calls: vec![],
    }));

    let answer = client.process_query("What is 2+2?", None).await.unwrap();
    assert_eq!(answer, r#"{"result":"it worked"}"#);

    client.cleanup().await.unwrap();
    // A second cleanup must be a no-op.
    client.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_configuration_error() {
    let mut client = FakeLlmClient::default();
    let err = client.initialize("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
