//! Launcher that forwards handoffs over a tokio channel.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Handoff, InterviewLauncher};

/// Sends each handoff to a receiver owned by the live-interview surface.
#[derive(Debug, Clone)]
pub struct ChannelLauncher {
    tx: mpsc::UnboundedSender<Handoff>,
}

impl ChannelLauncher {
    /// Creates a launcher and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Handoff>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl InterviewLauncher for ChannelLauncher {
    async fn launch(&self, handoff: Handoff) -> Result<(), DomainError> {
        let interview_id = handoff.interview.id.clone();
        self.tx.send(handoff).map_err(|_| {
            DomainError::new(ErrorCode::Cancelled, "Interview launcher is closed")
                .with_detail("interview_id", interview_id.as_str())
        })?;
        info!(interview_id = %interview_id, "Interview handed off to launcher");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{InterviewId, Timestamp};
    use crate::domain::interview::{Interview, InterviewStatus};
    use serde_json::json;

    fn handoff() -> Handoff {
        Handoff {
            interview: Interview::new(
                InterviewId::new("i1").unwrap(),
                "Backend Engineer",
                Timestamp::now(),
                InterviewStatus::Scheduled,
            ),
            start_payload: json!({"token": "abc"}),
        }
    }

    #[tokio::test]
    async fn forwards_handoff() {
        let (launcher, mut rx) = ChannelLauncher::channel();
        launcher.launch(handoff()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.interview.id.as_str(), "i1");
        assert_eq!(received.start_payload, json!({"token": "abc"}));
    }

    #[tokio::test]
    async fn closed_receiver_is_an_error() {
        let (launcher, rx) = ChannelLauncher::channel();
        drop(rx);
        let err = launcher.launch(handoff()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
    }
}
