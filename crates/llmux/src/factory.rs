use std::fmt::{self, Display};
use std::str::FromStr;

use llmux_anthropic_model::AnthropicClient;
use llmux_gemini_model::GeminiClient;
use llmux_model::{Error, LlmClient};

/// The supported LLM providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    /// The Anthropic Messages API.
    Anthropic,
    /// The Gemini generateContent API.
    Gemini,
}

impl Provider {
    /// Returns the identifier of this provider.
    #[inline]
    pub fn id(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anthropic" => Ok(Provider::Anthropic),
            "gemini" => Ok(Provider::Gemini),
            _ => Err(Error::unsupported_provider(s)),
        }
    }
}

/// Factory for provider clients.
///
/// Construction is pure: no session is opened until the client is
/// initialized.
pub struct ClientFactory;

impl ClientFactory {
    /// Creates a client for the given provider.
    pub fn create(provider: Provider) -> Box<dyn LlmClient> {
        match provider {
            Provider::Anthropic => Box::new(AnthropicClient::new()),
            Provider::Gemini => Box::new(GeminiClient::new()),
        }
    }

    /// Creates a client for the given provider identifier.
    ///
    /// Fails with [`ErrorKind::UnsupportedProvider`] for identifiers
    /// outside the known set.
    ///
    /// [`ErrorKind::UnsupportedProvider`]: llmux_model::ErrorKind::UnsupportedProvider
    pub fn create_for_id(id: &str) -> Result<Box<dyn LlmClient>, Error> {
        Ok(Self::create(id.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use llmux_model::ErrorKind;

    use super::*;

    #[test]
    fn test_provider_identifiers() {
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!(Provider::Anthropic.to_string(), "anthropic");

        // Identifiers are exact; no case folding.
        let err = "Gemini".parse::<Provider>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
    }

    #[test]
    fn test_unknown_identifier() {
        let err = ClientFactory::create_for_id("openai").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert!(err.message().contains("openai"));
    }
}
