//! Submission pipeline: normalization and delivery of the form snapshot

mod normalize;
mod pipeline;
mod sink;

pub use normalize::{normalize, Snapshot};
pub use pipeline::{PendingSubmission, SubmissionPipeline, SubmitOutcome};
pub use sink::{HttpSink, NullSink, SubmissionSink};

#[cfg(test)]
pub use sink::MockSubmissionSink;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether the UI waits for the network before showing completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Spawn the request, show completion after a fixed delay regardless
    #[default]
    FireAndForget,
    /// Wait for the request; roll back and alert on failure
    Awaited,
}

impl std::str::FromStr for SubmitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fire_and_forget" => Ok(Self::FireAndForget),
            "awaited" => Ok(Self::Awaited),
            other => Err(format!("unknown submit policy '{other}'")),
        }
    }
}

/// Errors raised while delivering a snapshot
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not reach the submission endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("submission task ended without reporting a result")]
    Dropped,
}
