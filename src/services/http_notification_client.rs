use color_eyre::eyre::Result;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::{NotificationClient, NotificationEvent, ProfileId};

const NOTIFICATIONS_ENDPOINT: &str = "notifications";

/// Posts notification events to the push gateway.
pub struct HttpNotificationClient {
    http_client: Client,
    base_url: String,
    auth_token: Secret<String>,
}

impl HttpNotificationClient {
    pub fn new(
        base_url: String,
        auth_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            auth_token,
        }
    }
}

#[async_trait::async_trait]
impl NotificationClient for HttpNotificationClient {
    #[tracing::instrument(name = "Sending notification", skip_all)]
    async fn send_notification(
        &self,
        recipient: &ProfileId,
        event: &NotificationEvent,
    ) -> Result<()> {
        let url = notifications_url(&self.base_url)?;

        let request_body = SendNotificationRequest {
            recipient_id: recipient,
            title: event.title(),
            event,
        };

        self.http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Appends the endpoint to the gateway URL, keeping any path prefix.
fn notifications_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(NOTIFICATIONS_ENDPOINT)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendNotificationRequest<'a> {
    recipient_id: &'a ProfileId,
    title: &'a str,
    event: &'a NotificationEvent,
}
