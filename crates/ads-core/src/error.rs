use std::io;

use thiserror::Error;

/// Failures raised by a [`Transport`](crate::transport::Transport) for a single request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn decode<T: Into<String>>(message: T) -> Self {
        TransportError::Decode(message.into())
    }
}

/// Fatal errors that abort an asset harvest for an account.
#[derive(Debug, Error)]
pub enum AdsError {
    #[error("invalid account id '{0}'")]
    InvalidAccountId(String),
    #[error("provider {0} not found")]
    ProviderNotFound(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl AdsError {
    pub fn config<T: Into<String>>(message: T) -> Self {
        AdsError::Config(message.into())
    }
}
