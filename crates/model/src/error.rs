use std::error::Error as StdError;
use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The provided credentials are invalid or were rejected.
    Configuration,
    /// The client was used before `initialize` was called.
    NotInitialized,
    /// The requested provider identifier is not known.
    UnsupportedProvider,
    /// The tool bridge failed to connect or perform its handshake.
    Bridge,
    /// An inference request failed (network or provider-side).
    Inference,
}

/// The error type shared by clients, the tool bridge and the factory.
///
/// Tool *invocation* faults are deliberately not represented here: they
/// are folded back into the conversation as [`ToolOutcome::Error`] and
/// never surface to the caller.
///
/// [`ToolOutcome::Error`]: crate::ToolOutcome::Error
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given message and kind.
    #[inline]
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Creates a new error with the `Configuration` kind.
    #[inline]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Configuration)
    }

    /// Creates a new error with the `NotInitialized` kind.
    #[inline]
    pub fn not_initialized() -> Self {
        Self::new(
            "client is not initialized, call `initialize` first",
            ErrorKind::NotInitialized,
        )
    }

    /// Creates a new error with the `UnsupportedProvider` kind.
    #[inline]
    pub fn unsupported_provider(id: &str) -> Self {
        Self::new(
            format!("unsupported provider: {id}"),
            ErrorKind::UnsupportedProvider,
        )
    }

    /// Creates a new error with the `Bridge` kind.
    #[inline]
    pub fn bridge(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Bridge)
    }

    /// Creates a new error with the `Inference` kind.
    #[inline]
    pub fn inference(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Inference)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}
