use thiserror::Error;

/// Result alias used throughout the identity check pipeline.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while building or running an identity check.
#[derive(Debug, Error)]
pub enum Error {
    /// A required construction or call parameter was not supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The signing key could not initialise the keyed-hash algorithm.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// The provider request could not be serialized.
    #[error("failed to serialize provider request: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network, DNS or TLS failure while talking to the provider.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The caller gave up while the provider call was in flight.
    #[error("identity check was interrupted")]
    Interrupted,

    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short label for the kind of failure, for log context.
    ///
    /// Not a pipeline stage: argument errors can come from any stage.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid-argument",
            Error::InvalidKey(_) => "invalid-key",
            Error::Serialization(_) => "serialization",
            Error::Transport(_) => "transport",
            Error::Interrupted => "interrupted",
            Error::Config(_) => "config",
        }
    }

    /// Shorthand for the "must not be null" argument failures.
    pub(crate) fn missing(name: &str) -> Self {
        Error::InvalidArgument(format!("{name} must not be null"))
    }
}
