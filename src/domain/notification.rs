use color_eyre::eyre::Result;
use serde::Serialize;

use super::{ApplicationId, ProfileId, ProjectId, RoleId};

/// Semantic events pushed to a profile's devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    #[serde(rename_all = "camelCase")]
    RoleInvitation {
        project_id: ProjectId,
        role_id: RoleId,
        project_title: String,
        role_title: String,
    },
    #[serde(rename_all = "camelCase")]
    ApplicationAccepted {
        application_id: ApplicationId,
        role_id: RoleId,
        role_title: String,
    },
    #[serde(rename_all = "camelCase")]
    ApplicationRejected {
        application_id: ApplicationId,
        role_id: RoleId,
        role_title: String,
    },
    #[serde(rename_all = "camelCase")]
    InvitationAnswered {
        role_id: RoleId,
        role_title: String,
        candidate_id: ProfileId,
        accepted: bool,
    },
}

impl NotificationEvent {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationEvent::RoleInvitation { .. } => "Nouvelle invitation",
            NotificationEvent::ApplicationAccepted { .. } => "Candidature acceptée",
            NotificationEvent::ApplicationRejected { .. } => "Candidature refusée",
            NotificationEvent::InvitationAnswered { accepted: true, .. } => {
                "Invitation acceptée"
            }
            NotificationEvent::InvitationAnswered { accepted: false, .. } => {
                "Invitation refusée"
            }
        }
    }
}

#[async_trait::async_trait]
pub trait NotificationClient {
    async fn send_notification(
        &self,
        recipient: &ProfileId,
        event: &NotificationEvent,
    ) -> Result<()>;
}
