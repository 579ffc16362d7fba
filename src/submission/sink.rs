//! Network sink for submitted snapshots

use super::normalize::Snapshot;
use super::SubmitError;
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout for the submission endpoint
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Destination for a finalized snapshot, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver the snapshot. Only transport failures are errors; the
    /// response body and status are not interpreted.
    async fn send(&self, snapshot: &Snapshot) -> Result<(), SubmitError>;
}

/// Posts snapshots as `application/x-www-form-urlencoded`
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmissionSink for HttpSink {
    async fn send(&self, snapshot: &Snapshot) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&snapshot.to_form_pairs())
            .send()
            .await?;

        tracing::debug!(
            "Submission endpoint answered {} for {} fields",
            response.status(),
            snapshot.len()
        );
        Ok(())
    }
}

/// Sink used when no endpoint is configured; accepts everything
pub struct NullSink;

#[async_trait]
impl SubmissionSink for NullSink {
    async fn send(&self, snapshot: &Snapshot) -> Result<(), SubmitError> {
        tracing::info!(
            "No submission endpoint configured, keeping {} fields local",
            snapshot.len()
        );
        Ok(())
    }
}
