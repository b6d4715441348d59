//! Role and application operations shared by the route handlers.
//!
//! Each operation takes the caller's [`Session`](crate::utils::auth::Session)
//! explicitly, checks permissions, applies the state machine on the domain
//! types and writes through the stores in `AppState`.

mod applications;
mod permissions;
mod projects;
mod roles;
mod search;

pub use applications::*;
pub use permissions::*;
pub use projects::*;
pub use roles::*;
pub use search::*;

use color_eyre::eyre::eyre;
use uuid::Uuid;

use crate::{
    app_state::NotificationClientType,
    domain::{
        NotificationEvent, ProfileId, ProfileStoreError, ProjectAPIError,
        ProjectStoreError,
    },
};

pub const WRITE_REJECTED_MESSAGE: &str =
    "role was modified or access was denied";

/// Maps a store failure to the API error for the entity identified by `id`.
pub(crate) fn project_store_error(e: ProjectStoreError, id: Uuid) -> ProjectAPIError {
    match e {
        ProjectStoreError::ProjectIDNotFound
        | ProjectStoreError::RoleIDNotFound
        | ProjectStoreError::ApplicationIDNotFound => {
            ProjectAPIError::IDNotFoundError(id)
        }
        ProjectStoreError::NoRowsAffected => {
            ProjectAPIError::WriteRejected(WRITE_REJECTED_MESSAGE.to_owned())
        }
        e => ProjectAPIError::UnexpectedError(eyre!(e)),
    }
}

pub(crate) fn profile_store_error(e: ProfileStoreError, id: Uuid) -> ProjectAPIError {
    match e {
        ProfileStoreError::ProfileNotFound => ProjectAPIError::IDNotFoundError(id),
        e => ProjectAPIError::UnexpectedError(eyre!(e)),
    }
}

/// Delivers `event` to `recipient`; a failed delivery is logged and dropped.
#[tracing::instrument(name = "Notifying profile", skip_all)]
pub(crate) async fn notify(
    client: &NotificationClientType,
    recipient: &ProfileId,
    event: NotificationEvent,
) {
    if let Err(e) = client.send_notification(recipient, &event).await {
        tracing::warn!(
            recipient = %recipient,
            error = ?e,
            "Failed to send notification"
        );
    }
}
