use reqwest::Client;

use crate::{
    config::RemoteConfig,
    domain::{ClassificationResult, EmailItem},
};

use super::{
    wire::{build_request, parse_response},
    RemoteError, RemoteOutcome,
};

#[derive(Clone)]
pub struct RemoteClassifierClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteClassifierClient {
    pub fn new(http: Client, config: RemoteConfig) -> Self {
        Self { http, config }
    }

    /// Makes a single attempt for the whole batch. No retries.
    pub async fn classify(&self, items: &[EmailItem]) -> RemoteOutcome {
        match self.try_classify(items).await {
            Ok(results) => RemoteOutcome::Success(results),
            Err(err) => RemoteOutcome::Failure(err),
        }
    }

    async fn try_classify(
        &self,
        items: &[EmailItem],
    ) -> Result<Vec<ClassificationResult>, RemoteError> {
        let endpoint = self.config.endpoint.as_ref().ok_or(RemoteError::Disabled)?;

        let request = build_request(items);
        let response = self
            .http
            .post(endpoint.clone())
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body = response.bytes().await.map_err(RemoteError::Transport)?;
        let results = parse_response(&body, items)?;
        tracing::debug!(target: "remote", total = results.len(), "remote classification decoded");
        Ok(results)
    }
}
