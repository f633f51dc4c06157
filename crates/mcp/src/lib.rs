//! The tool bridge: discovery and invocation of tools served by a
//! remote MCP process reachable over an SSE transport.

#[macro_use]
extern crate tracing;

mod proto;
mod session;
mod sse;

use async_trait::async_trait;
use llmux_model::{Error, ToolBridge, ToolDescriptor, ToolOutcome};
use mime::Mime;
use reqwest::{Client, Url, header};
use serde_json::Value;

use session::{PostChannel, Session};
use sse::{ByteSource, EventStream};

/// A tool bridge connected to a remote tool server.
///
/// The session is opened by [`McpBridge::connect`] and released by
/// `cleanup` (or by dropping the bridge). The tool catalog is fetched
/// once during the connect handshake and cached for the lifetime of
/// the bridge.
pub struct McpBridge {
    session: Option<Session>,
    tools: Vec<ToolDescriptor>,
}

impl McpBridge {
    /// Connects to the tool server at `endpoint`.
    ///
    /// This opens the event stream, performs the protocol handshake and
    /// fetches the tool catalog. When this returns successfully,
    /// [`ToolBridge::tools`] reflects the full catalog.
    pub async fn connect(endpoint: &str) -> Result<Self, Error> {
        let base = Url::parse(endpoint)
            .map_err(|err| Error::bridge(format!("invalid endpoint: {err}")))?;

        let client = Client::new();
        let resp = client
            .get(base.clone())
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                Error::bridge(format!("failed to open event stream: {err}"))
            })?;

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let is_event_stream = content_type
            .and_then(|v| v.parse().ok())
            .map(|m: Mime| {
                m.type_() == mime::TEXT && m.subtype() == "event-stream"
            })
            .unwrap_or(false);
        if !is_event_stream {
            return Err(Error::bridge(format!(
                "unexpected content type: {content_type:?}"
            )));
        }

        let mut events = EventStream::new(ByteSource::from_response(resp));

        // The server announces the message endpoint as the first event.
        let endpoint_event = events
            .next_event()
            .await
            .map_err(|err| Error::bridge(format!("event stream failed: {err:?}")))?
            .ok_or_else(|| {
                Error::bridge("event stream closed before the endpoint event")
            })?;
        if endpoint_event.name.as_deref() != Some("endpoint") {
            return Err(Error::bridge(format!(
                "expected an endpoint event, got: {:?}",
                endpoint_event.name
            )));
        }
        let post_url = base.join(endpoint_event.data.trim()).map_err(|err| {
            Error::bridge(format!("invalid message endpoint: {err}"))
        })?;
        debug!("posting messages to {post_url}");

        let session = Session::new(PostChannel::http(client, post_url), events);
        Self::handshake(session).await
    }

    async fn handshake(mut session: Session) -> Result<Self, Error> {
        session
            .request("initialize", Some(proto::initialize_params()))
            .await?;
        session.notify("notifications/initialized").await?;

        let result = session.request("tools/list", None).await?;
        let list: proto::ListToolsResult = serde_json::from_value(result)
            .map_err(|err| Error::bridge(format!("malformed tool catalog: {err}")))?;
        let tools: Vec<ToolDescriptor> =
            list.tools.into_iter().map(Into::into).collect();
        info!(
            "connected to tool server with tools: {:?}",
            tools.iter().map(|tool| tool.name.as_str()).collect::<Vec<_>>()
        );

        Ok(Self {
            session: Some(session),
            tools,
        })
    }
}

#[async_trait]
impl ToolBridge for McpBridge {
    #[inline]
    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> ToolOutcome {
        let Some(session) = &mut self.session else {
            return ToolOutcome::Error(
                "tool bridge is not connected".to_owned(),
            );
        };

        debug!("calling tool: {name}");
        let result = session
            .request("tools/call", Some(proto::call_tool_params(name, arguments)))
            .await;
        match result {
            Ok(result) => {
                match serde_json::from_value::<proto::CallToolResult>(result) {
                    Ok(result) if result.is_error => ToolOutcome::Error(
                        serde_json::to_string(&result.content)
                            .unwrap_or_default(),
                    ),
                    Ok(result) => ToolOutcome::Result(result.content),
                    Err(err) => ToolOutcome::Error(format!(
                        "malformed tool result: {err}"
                    )),
                }
            }
            Err(err) => {
                warn!("tool call failed: {err}");
                ToolOutcome::Error(err.message().to_owned())
            }
        }
    }

    async fn cleanup(&mut self) -> Result<(), Error> {
        if let Some(session) = self.session.take() {
            // Dropping the session closes the event stream and releases
            // the transport.
            drop(session);
            debug!("tool bridge session released");
        }
        Ok(())
    }
}
