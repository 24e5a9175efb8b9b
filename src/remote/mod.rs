mod client;
pub mod wire;

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::ClassificationResult;

pub use client::RemoteClassifierClient;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote classifier is not configured")]
    Disabled,
    #[error("request to remote classifier failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("remote classifier answered with status {0}")]
    Status(StatusCode),
    #[error("malformed remote response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("remote results do not match the batch: {0}")]
    Mismatch(String),
}

#[derive(Debug)]
pub enum RemoteOutcome {
    Success(Vec<ClassificationResult>),
    Failure(RemoteError),
}
