use llmux_model::Error;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::proto;
use crate::sse::EventStream;

/// The channel used to deliver JSON-RPC messages to the server.
pub(crate) enum PostChannel {
    Http { client: Client, url: Url },
    #[cfg(test)]
    Scripted { posted: Vec<Value> },
}

impl PostChannel {
    #[inline]
    pub fn http(client: Client, url: Url) -> Self {
        PostChannel::Http { client, url }
    }

    #[cfg(test)]
    pub fn scripted() -> Self {
        PostChannel::Scripted { posted: vec![] }
    }

    async fn post<T: Serialize>(&mut self, payload: &T) -> Result<(), Error> {
        match self {
            PostChannel::Http { client, url } => {
                client
                    .post(url.clone())
                    .json(payload)
                    .send()
                    .await
                    .and_then(|resp| resp.error_for_status())
                    .map_err(|err| {
                        Error::bridge(format!("failed to post message: {err}"))
                    })?;
                Ok(())
            }
            #[cfg(test)]
            PostChannel::Scripted { posted } => {
                posted.push(serde_json::to_value(payload).unwrap());
                Ok(())
            }
        }
    }
}

/// A live session with the tool server.
///
/// Requests are strictly sequential: one is in flight at a time, and
/// the session reads the event stream until the matching response
/// arrives.
pub(crate) struct Session {
    channel: PostChannel,
    events: EventStream,
    next_id: u64,
}

impl Session {
    #[inline]
    pub fn new(channel: PostChannel, events: EventStream) -> Self {
        Self {
            channel,
            events,
            next_id: 1,
        }
    }

    /// Sends a request and awaits the response with the matching id.
    pub async fn request(
        &mut self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, Error> {
        let id = self.next_id;
        self.next_id += 1;

        trace!("sending request {id}: {method}");
        self.channel
            .post(&proto::Request::new(id, method, params))
            .await?;

        loop {
            let event = self.events.next_event().await.map_err(|err| {
                Error::bridge(format!("event stream failed: {err:?}"))
            })?;
            let Some(event) = event else {
                return Err(Error::bridge(
                    "event stream closed while awaiting a response",
                ));
            };

            let Ok(msg) = serde_json::from_str::<proto::Response>(&event.data)
            else {
                debug!("skipping unparseable event: {}", event.data);
                continue;
            };
            // Server-initiated requests and notifications also carry an
            // id; only id-bearing messages without a method are
            // responses.
            if msg.method.is_some() || msg.id != Some(id) {
                trace!("skipping unrelated message: {:?}", msg.method);
                continue;
            }

            if let Some(err) = msg.error {
                return Err(Error::bridge(format!(
                    "server error {}: {}",
                    err.code, err.message
                )));
            }
            return Ok(msg.result.unwrap_or(Value::Null));
        }
    }

    /// Sends a notification. No response is awaited.
    pub async fn notify(&mut self, method: &str) -> Result<(), Error> {
        trace!("sending notification: {method}");
        self.channel.post(&proto::Notification::new(method)).await
    }

    #[cfg(test)]
    pub fn posted(&self) -> &[Value] {
        match &self.channel {
            PostChannel::Scripted { posted } => posted,
            _ => unreachable!("not a scripted session"),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use llmux_model::ErrorKind;
    use serde_json::json;

    use super::*;
    use crate::sse::ByteSource;

    fn scripted_session(events: Vec<Bytes>) -> Session {
        Session::new(
            PostChannel::scripted(),
            EventStream::new(ByteSource::from_vec_deque(events.into())),
        )
    }

    #[tokio::test]
    async fn test_request_response_correlation() {
        let mut session = scripted_session(vec![
            // A server-side notification and a stale response must both
            // be skipped before the real response is found.
            Bytes::from(
                "event: message\ndata: {\"jsonrpc\":\"2.0\",\"method\":\"notifications/progress\"}\n\n",
            ),
            Bytes::from(
                "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":99,\"result\":{}}\n\n",
            ),
            Bytes::from(
                "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"ok\":true}}\n\n",
            ),
        ]);
        let result = session.request("tools/list", None).await.unwrap();
        assert_eq!(result, json!({ "ok": true }));
        assert_eq!(session.posted().len(), 1);
        assert_eq!(session.posted()[0]["method"], "tools/list");
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut session = scripted_session(vec![Bytes::from(
            "data: {\"jsonrpc\":\"2.0\",\"id\":1,\"error\":{\"code\":-32601,\"message\":\"nope\"}}\n\n",
        )]);
        let err = session.request("tools/list", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bridge);
        assert!(err.message().contains("nope"));
    }

    #[tokio::test]
    async fn test_closed_stream() {
        let mut session = scripted_session(vec![]);
        let err = session.request("tools/list", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bridge);
    }
}
