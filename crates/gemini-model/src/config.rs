/// Configuration for the Gemini client.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeminiConfig {
    pub(crate) model: String,
    pub(crate) base_url: String,
}

impl GeminiConfig {
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

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-001".to_owned(),
            base_url: "https://generativelanguage.googleapis.com".to_owned(),
        }
    }
}
