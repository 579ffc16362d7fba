//! Dispatch of snapshots according to the configured policy

use super::normalize::Snapshot;
use super::sink::SubmissionSink;
use super::{SubmitError, SubmitPolicy};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// How a finished submission ended
#[derive(Debug)]
pub enum SubmitOutcome {
    Completed(Snapshot),
    Failed(SubmitError),
}

/// A submission in flight, polled from the event loop
#[derive(Debug)]
pub enum PendingSubmission {
    /// Fire-and-forget: completes when the deadline passes
    Timer {
        deadline: Instant,
        snapshot: Snapshot,
    },
    /// Awaited: completes when the sink reports back
    Awaiting {
        result: oneshot::Receiver<Result<(), SubmitError>>,
        snapshot: Snapshot,
    },
    /// Already reported
    Done,
}

impl PendingSubmission {
    /// Check for completion without blocking
    pub fn poll(&mut self) -> Option<SubmitOutcome> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<SubmitOutcome> {
        let ready = match self {
            PendingSubmission::Done => return None,
            PendingSubmission::Timer { deadline, .. } => now >= *deadline,
            PendingSubmission::Awaiting { result, .. } => match result.try_recv() {
                Ok(Ok(())) => true,
                Ok(Err(err)) => {
                    *self = PendingSubmission::Done;
                    return Some(SubmitOutcome::Failed(err));
                }
                Err(TryRecvError::Empty) => false,
                Err(TryRecvError::Closed) => {
                    *self = PendingSubmission::Done;
                    return Some(SubmitOutcome::Failed(SubmitError::Dropped));
                }
            },
        };

        if !ready {
            return None;
        }

        match std::mem::replace(self, PendingSubmission::Done) {
            PendingSubmission::Timer { snapshot, .. }
            | PendingSubmission::Awaiting { snapshot, .. } => {
                Some(SubmitOutcome::Completed(snapshot))
            }
            PendingSubmission::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, PendingSubmission::Done)
    }
}

/// One pipeline for every deployment: policy and sink are injected
pub struct SubmissionPipeline {
    policy: SubmitPolicy,
    sink: Arc<dyn SubmissionSink>,
    completion_delay: Duration,
}

impl SubmissionPipeline {
    pub fn new(
        policy: SubmitPolicy,
        sink: Arc<dyn SubmissionSink>,
        completion_delay: Duration,
    ) -> Self {
        Self {
            policy,
            sink,
            completion_delay,
        }
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    /// Hand the snapshot to the sink. Must be called inside a tokio runtime.
    pub fn dispatch(&self, snapshot: Snapshot) -> PendingSubmission {
        let sink = Arc::clone(&self.sink);
        let payload = snapshot.clone();

        match self.policy {
            SubmitPolicy::FireAndForget => {
                tokio::spawn(async move {
                    if let Err(err) = sink.send(&payload).await {
                        tracing::warn!("Background submission failed: {err}");
                    }
                });
                tracing::info!(
                    "Submission dispatched (fire-and-forget, {} fields)",
                    snapshot.len()
                );
                PendingSubmission::Timer {
                    deadline: Instant::now() + self.completion_delay,
                    snapshot,
                }
            }
            SubmitPolicy::Awaited => {
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    let result = sink.send(&payload).await;
                    if let Err(err) = &result {
                        tracing::error!("Submission failed: {err}");
                    }
                    // Receiver may be gone if the app quit mid-flight
                    let _ = tx.send(result);
                });
                tracing::info!(
                    "Submission dispatched (awaited, {} fields)",
                    snapshot.len()
                );
                PendingSubmission::Awaiting {
                    result: rx,
                    snapshot,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::normalize;
    use crate::submission::sink::MockSubmissionSink;

    fn snapshot() -> Snapshot {
        normalize([("platform_name", "Acme")])
    }

    async fn wait_for(pending: &mut PendingSubmission) -> SubmitOutcome {
        loop {
            if let Some(outcome) = pending.poll() {
                return outcome;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    mod fire_and_forget {
        use super::*;

        #[tokio::test]
        async fn test_completes_even_when_sink_fails() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .times(1)
                .returning(|_| Err(SubmitError::Dropped));
            let pipeline = SubmissionPipeline::new(
                SubmitPolicy::FireAndForget,
                Arc::new(sink),
                Duration::ZERO,
            );

            let mut pending = pipeline.dispatch(snapshot());
            let outcome = wait_for(&mut pending).await;
            assert!(matches!(outcome, SubmitOutcome::Completed(s) if s.get("platform_name") == Some("Acme")));
            assert!(pending.is_done());

            // Let the background task run so the mock expectation is met
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        #[test]
        fn test_waits_for_deadline() {
            let mut pending = PendingSubmission::Timer {
                deadline: Instant::now() + Duration::from_secs(60),
                snapshot: snapshot(),
            };
            assert!(pending.poll().is_none());
            let later = Instant::now() + Duration::from_secs(61);
            assert!(matches!(
                pending.poll_at(later),
                Some(SubmitOutcome::Completed(_))
            ));
        }
    }

    mod awaited {
        use super::*;

        #[tokio::test]
        async fn test_completes_on_success() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .withf(|s| s.get("platform_name") == Some("Acme"))
                .times(1)
                .returning(|_| Ok(()));
            let pipeline = SubmissionPipeline::new(
                SubmitPolicy::Awaited,
                Arc::new(sink),
                Duration::from_secs(60),
            );

            let mut pending = pipeline.dispatch(snapshot());
            assert!(matches!(
                wait_for(&mut pending).await,
                SubmitOutcome::Completed(_)
            ));
        }

        #[tokio::test]
        async fn test_reports_failure() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .times(1)
                .returning(|_| Err(SubmitError::Dropped));
            let pipeline =
                SubmissionPipeline::new(SubmitPolicy::Awaited, Arc::new(sink), Duration::ZERO);

            let mut pending = pipeline.dispatch(snapshot());
            assert!(matches!(
                wait_for(&mut pending).await,
                SubmitOutcome::Failed(SubmitError::Dropped)
            ));
            assert!(pending.poll().is_none());
        }

        #[test]
        fn test_closed_channel_is_failure() {
            let (tx, rx) = oneshot::channel::<Result<(), SubmitError>>();
            drop(tx);
            let mut pending = PendingSubmission::Awaiting {
                result: rx,
                snapshot: snapshot(),
            };
            assert!(matches!(
                pending.poll(),
                Some(SubmitOutcome::Failed(SubmitError::Dropped))
            ));
        }
    }
}
