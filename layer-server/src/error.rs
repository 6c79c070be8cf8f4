use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response: connection refused, DNS failure,
    /// timeout, body read failure. HTTP error statuses are not reported here.
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
    /// An identifier that would not survive URL parsing unchanged.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
