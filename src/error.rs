//! Error types shared by the API client, the configuration and the push channel.

use thiserror::Error;

/// Failure of one call to the admin API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("http request failed: {0}")]
    Http(String),
    #[error("server function failed: {0}")]
    Server(String),
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}

impl From<dioxus::prelude::ServerFnError> for ApiError {
    fn from(e: dioxus::prelude::ServerFnError) -> Self {
        ApiError::Server(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend origin must start with http:// or https://, got `{0}`")]
    InvalidOrigin(String),
    #[error("namespace must start with `/`, got `{0}`")]
    InvalidNamespace(String),
}

/// A push channel frame that could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type `{0}`")]
    UnknownEngineType(char),
    #[error("unknown socket packet type `{0}`")]
    UnknownSocketType(char),
    #[error("invalid json payload: {0}")]
    Json(String),
    #[error("event packet without a name")]
    MissingEventName,
}

impl From<serde_json::Error> for PacketError {
    fn from(e: serde_json::Error) -> Self {
        PacketError::Json(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("could not open push channel: {0}")]
    Connect(String),
    #[error("namespace connection refused: {0}")]
    Rejected(String),
}
