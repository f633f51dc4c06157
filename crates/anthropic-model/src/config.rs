/// Configuration for the Anthropic client.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnthropicConfig {
    pub(crate) model: String,
    pub(crate) base_url: String,
}

impl AnthropicConfig {
    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-opus-20240229".to_owned(),
            base_url: "https://api.anthropic.com".to_owned(),
        }
    }
}
