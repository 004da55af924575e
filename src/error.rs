use thiserror::Error;

use crate::record::ValidationError;

/// Required configuration that could not be read from the environment
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Failures talking to the DNS provider that carry no provider error message
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request never produced a response
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider answered with a body we could not read
    #[error("malformed provider response (HTTP {status}): {detail}")]
    Malformed { status: u16, detail: String },
}

/// Reasons an incoming record request is turned away before forwarding
#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("Request body is required.")]
    EmptyBody,

    #[error("Invalid DNS record request: {0}")]
    Json(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Json(err.to_string())
    }
}
