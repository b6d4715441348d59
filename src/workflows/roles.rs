use crate::{
    app_state::AppState,
    domain::{
        NotificationEvent, ProfileId, Project, ProjectAPIError, Role, RoleId,
        RoleStatus,
    },
    utils::auth::Session,
};

use super::{
    notify, profile_store_error, project_store_error, require_manager,
    require_owner,
};

pub(crate) async fn load_role(
    state: &AppState,
    role_id: &RoleId,
) -> Result<Role, ProjectAPIError> {
    state
        .project_store
        .read()
        .await
        .get_role(role_id)
        .await
        .map_err(|e| project_store_error(e, *role_id.as_ref()))
}

async fn write_role(
    state: &AppState,
    previous: &Role,
    updated: &Role,
) -> Result<(), ProjectAPIError> {
    state
        .project_store
        .write()
        .await
        .update_role(previous, updated)
        .await
        .map_err(|e| project_store_error(e, *updated.id.as_ref()))
}

pub(crate) async fn send_role_invitation(
    state: &AppState,
    project: &Project,
    role: &Role,
    candidate: &ProfileId,
) {
    notify(
        &state.notification_client,
        candidate,
        NotificationEvent::RoleInvitation {
            project_id: project.id,
            role_id: role.id,
            project_title: project.title.as_ref().to_owned(),
            role_title: role.title.as_ref().to_owned(),
        },
    )
    .await;
}

#[tracing::instrument(name = "Publishing role", skip_all)]
pub async fn publish_role(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
) -> Result<Role, ProjectAPIError> {
    let current = load_role(state, role_id).await?;
    require_owner(state, session, &current.project_id).await?;

    let mut updated = current.clone();
    updated.publish()?;
    write_role(state, &current, &updated).await?;
    Ok(updated)
}

/// Moves a published role back to draft. Refused while a candidate is bound.
#[tracing::instrument(name = "Unpublishing role", skip_all)]
pub async fn unpublish_role(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
) -> Result<Role, ProjectAPIError> {
    let current = load_role(state, role_id).await?;
    require_owner(state, session, &current.project_id).await?;

    let mut updated = current.clone();
    updated.unpublish()?;
    write_role(state, &current, &updated).await?;
    Ok(updated)
}

/// Deletes the role and its applications, whatever its status.
#[tracing::instrument(name = "Deleting role", skip_all)]
pub async fn delete_role(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
) -> Result<(), ProjectAPIError> {
    let role = load_role(state, role_id).await?;
    require_owner(state, session, &role.project_id).await?;

    state
        .project_store
        .write()
        .await
        .delete_role(role_id)
        .await
        .map_err(|e| project_store_error(e, *role_id.as_ref()))
}

/// Binds `candidate_id` to the role. A fresh pick sends an invitation;
/// picking the invited candidate again confirms the assignment.
#[tracing::instrument(name = "Assigning candidate", skip_all)]
pub async fn assign_candidate(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
    candidate_id: &ProfileId,
) -> Result<Role, ProjectAPIError> {
    let current = load_role(state, role_id).await?;
    let (project, _) = require_manager(state, session, &current).await?;

    state
        .profile_store
        .read()
        .await
        .get_profile(candidate_id)
        .await
        .map_err(|e| profile_store_error(e, *candidate_id.as_ref()))?;

    let mut updated = current.clone();
    let status = updated.assign(*candidate_id)?;
    write_role(state, &current, &updated).await?;

    if status == RoleStatus::InvitationPending {
        send_role_invitation(state, &project, &updated, candidate_id).await;
    }
    Ok(updated)
}

/// Frees the role and drops the accepted application of the released
/// candidate so they may apply again.
#[tracing::instrument(name = "Removing assignment", skip_all)]
pub async fn remove_assignment(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
) -> Result<Role, ProjectAPIError> {
    let current = load_role(state, role_id).await?;
    require_manager(state, session, &current).await?;

    let mut updated = current.clone();
    let released = updated.remove_assignment()?;
    state
        .project_store
        .write()
        .await
        .release_role(&current, &updated)
        .await
        .map_err(|e| project_store_error(e, *role_id.as_ref()))?;

    tracing::debug!(released = %released, "Assignment removed");
    Ok(updated)
}

/// The invited candidate accepts or declines. Declining reopens the role.
#[tracing::instrument(name = "Responding to invitation", skip_all)]
pub async fn respond_to_invitation(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
    accept: bool,
) -> Result<Role, ProjectAPIError> {
    let current = load_role(state, role_id).await?;
    if !current.is_assigned_to(&session.user_id) {
        return Err(ProjectAPIError::Forbidden(
            "Only the invited candidate can answer this invitation".to_owned(),
        ));
    }

    let mut updated = current.clone();
    if accept {
        updated.accept_invitation(&session.user_id)?;
        write_role(state, &current, &updated).await?;
    } else {
        updated.decline_invitation(&session.user_id)?;
        state
            .project_store
            .write()
            .await
            .release_role(&current, &updated)
            .await
            .map_err(|e| project_store_error(e, *role_id.as_ref()))?;
    }

    let project = state
        .project_store
        .read()
        .await
        .get_project(&updated.project_id)
        .await
        .map_err(|e| project_store_error(e, *updated.project_id.as_ref()))?;
    notify(
        &state.notification_client,
        &project.owner_id,
        NotificationEvent::InvitationAnswered {
            role_id: updated.id,
            role_title: updated.title.as_ref().to_owned(),
            candidate_id: session.user_id,
            accepted: accept,
        },
    )
    .await;

    Ok(updated)
}
