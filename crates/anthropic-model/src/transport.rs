#[cfg(test)]
use std::collections::VecDeque;

use llmux_model::Error;
use reqwest::{Client, header};
use serde_json::Value;

use crate::proto::{MessagesRequest, MessagesResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The channel used to deliver inference requests to the vendor.
pub(crate) enum Transport {
    Http {
        client: Client,
        api_key: String,
        base_url: String,
    },
    #[cfg(test)]
    Scripted(Scripted),
}

impl Transport {
    pub fn http(api_key: &str, base_url: &str) -> Self {
        Transport::Http {
            client: Client::new(),
            api_key: api_key.to_owned(),
            base_url: base_url.to_owned(),
        }
    }

    pub async fn send(
        &mut self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, Error> {
        match self {
            Transport::Http {
                client,
                api_key,
                base_url,
            } => {
                let resp = client
                    .post(format!("{base_url}/v1/messages"))
                    .header("x-api-key", api_key.as_str())
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .header(header::CONTENT_TYPE, "application/json")
                    .json(request)
                    .send()
                    .await
                    .and_then(|resp| resp.error_for_status())
                    .map_err(|err| Error::inference(format!("{err}")))?;
                resp.json().await.map_err(|err| {
                    Error::inference(format!("failed to parse response: {err}"))
                })
            }
            #[cfg(test)]
            Transport::Scripted(scripted) => scripted.send(request),
        }
    }
}

#[cfg(test)]
pub(crate) struct Scripted {
    pub requests: Vec<Value>,
    pub responses: VecDeque<Result<Value, String>>,
}

#[cfg(test)]
impl Scripted {
    pub fn with_responses(
        responses: impl Into<VecDeque<Result<Value, String>>>,
    ) -> Self {
        Self {
            requests: vec![],
            responses: responses.into(),
        }
    }

    fn send(
        &mut self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, Error> {
        self.requests.push(serde_json::to_value(request).unwrap());
        let response = self
            .responses
            .pop_front()
            .unwrap_or(Err("no scripted response left".to_owned()));
        match response {
            Ok(value) => serde_json::from_value(value)
                .map_err(|err| Error::inference(format!("{err}"))),
            Err(message) => Err(Error::inference(message)),
        }
    }
}
