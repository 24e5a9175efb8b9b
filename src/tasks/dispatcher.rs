use std::sync::Arc;

use crate::{
    domain::{ClassificationResult, EmailItem, ResultOrigin},
    heuristics::LocalClassifier,
    remote::{RemoteClassifierClient, RemoteOutcome},
};

/// Results for one batch, all from the same origin.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub origin: ResultOrigin,
    pub results: Vec<ClassificationResult>,
    pub fallback_reason: Option<String>,
}

impl BatchReport {
    pub fn empty() -> Self {
        Self {
            origin: ResultOrigin::Local,
            results: Vec::new(),
            fallback_reason: None,
        }
    }
}

pub struct ClassificationDispatcher {
    remote: Arc<RemoteClassifierClient>,
    local: LocalClassifier,
}

impl ClassificationDispatcher {
    pub fn new(remote: Arc<RemoteClassifierClient>, local: LocalClassifier) -> Self {
        Self { remote, local }
    }

    pub async fn process_batch(&self, items: &[EmailItem]) -> BatchReport {
        if items.is_empty() {
            return BatchReport::empty();
        }

        tracing::info!(target: "dispatcher", total = items.len(), "processing batch");
        match self.remote.classify(items).await {
            RemoteOutcome::Success(results) => {
                tracing::info!(target: "dispatcher", total = results.len(), "batch classified remotely");
                BatchReport {
                    origin: ResultOrigin::Remote,
                    results,
                    fallback_reason: None,
                }
            }
            RemoteOutcome::Failure(err) => {
                tracing::warn!(
                    target: "dispatcher",
                    error = %err,
                    total = items.len(),
                    "remote classification failed; using local classifier for the whole batch"
                );
                BatchReport {
                    origin: ResultOrigin::Local,
                    results: self.local.classify_all(items),
                    fallback_reason: Some(err.to_string()),
                }
            }
        }
    }
}
