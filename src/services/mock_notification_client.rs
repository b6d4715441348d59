use color_eyre::eyre::{eyre, Result};
use tokio::sync::RwLock;

use crate::domain::{NotificationClient, NotificationEvent, ProfileId};

/// Logs notifications instead of delivering them and keeps a copy of each.
#[derive(Default)]
pub struct MockNotificationClient {
    sent: RwLock<Vec<(ProfileId, NotificationEvent)>>,
    failing: bool,
}

impl MockNotificationClient {
    /// A client whose every delivery fails, after recording the attempt.
    pub fn failing() -> Self {
        Self {
            sent: RwLock::default(),
            failing: true,
        }
    }

    pub async fn sent(&self) -> Vec<(ProfileId, NotificationEvent)> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationClient for MockNotificationClient {
    async fn send_notification(
        &self,
        recipient: &ProfileId,
        event: &NotificationEvent,
    ) -> Result<()> {
        tracing::info!(
            recipient = %recipient,
            title = event.title(),
            "Sending notification: {:?}",
            event
        );
        self.sent.write().await.push((*recipient, event.clone()));

        if self.failing {
            return Err(eyre!("notification gateway unavailable"));
        }
        Ok(())
    }
}
