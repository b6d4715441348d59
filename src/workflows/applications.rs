use serde::Serialize;

use crate::{
    app_state::AppState,
    domain::{
        Application, ApplicationId, ApplicationMessage, ApplicationStatus,
        NotificationEvent, Profile, ProjectAPIError, ProjectStoreError, Role,
        RoleId, RoleStatus, RoleTransitionError,
    },
    utils::auth::Session,
};

use super::{
    load_project, load_role, notify, profile_store_error, project_store_error,
    require_manager, send_role_invitation,
};

/// Outcome of `apply`: a new application, or the one already on file.
#[derive(Debug)]
pub enum ApplyOutcome {
    Created(Application),
    AlreadyApplied(Application),
}

/// An application together with the candidate's profile, as shown to the
/// people managing the role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    #[serde(flatten)]
    pub application: Application,
    pub candidate: Option<Profile>,
}

async fn load_application(
    state: &AppState,
    application_id: &ApplicationId,
) -> Result<Application, ProjectAPIError> {
    state
        .project_store
        .read()
        .await
        .get_application(application_id)
        .await
        .map_err(|e| project_store_error(e, *application_id.as_ref()))
}

fn ensure_pending(application: &Application) -> Result<(), ProjectAPIError> {
    if application.is_pending() {
        Ok(())
    } else {
        Err(ProjectAPIError::Conflict(format!(
            "Application is already {}",
            application.status
        )))
    }
}

/// Files an application for a published, unfilled role. Applying twice
/// returns the first application.
#[tracing::instrument(name = "Applying to role", skip_all)]
pub async fn apply(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
    message: Option<ApplicationMessage>,
) -> Result<ApplyOutcome, ProjectAPIError> {
    let role = load_role(state, role_id).await?;
    let project = load_project(state, &role.project_id).await?;
    if project.is_owned_by(&session.user_id) {
        return Err(ProjectAPIError::Forbidden(
            "Cannot apply to a role of your own project".to_owned(),
        ));
    }

    let existing = state
        .project_store
        .read()
        .await
        .find_application(role_id, &session.user_id)
        .await;
    match existing {
        Ok(application) => return Ok(ApplyOutcome::AlreadyApplied(application)),
        Err(ProjectStoreError::ApplicationIDNotFound) => (),
        Err(e) => return Err(project_store_error(e, *role_id.as_ref())),
    }

    if role.status() != RoleStatus::Published || role.assigned_profile_id().is_some() {
        return Err(ProjectAPIError::Conflict(
            "Role is not open for applications".to_owned(),
        ));
    }

    let application = Application::new(*role_id, session.user_id, message);
    let mut store = state.project_store.write().await;
    match store.add_application(&application).await {
        Ok(()) => Ok(ApplyOutcome::Created(application)),
        // Lost a race against the same candidate's other request.
        Err(ProjectStoreError::DuplicateApplication) => store
            .find_application(role_id, &session.user_id)
            .await
            .map(ApplyOutcome::AlreadyApplied)
            .map_err(|e| project_store_error(e, *role_id.as_ref())),
        Err(e) => Err(project_store_error(e, *role_id.as_ref())),
    }
}

/// Accepts a pending application: the candidate is invited to the role and
/// every competing pending application is rejected, in one store write.
#[tracing::instrument(name = "Accepting application", skip_all)]
pub async fn accept_application(
    state: &AppState,
    session: &Session,
    application_id: &ApplicationId,
) -> Result<Application, ProjectAPIError> {
    let application = load_application(state, application_id).await?;
    let role = load_role(state, &application.role_id).await?;
    let (project, _) = require_manager(state, session, &role).await?;
    ensure_pending(&application)?;

    if role.status() != RoleStatus::Published {
        return Err(RoleTransitionError::InvalidTransition {
            from: role.status(),
            to: RoleStatus::InvitationPending,
        }
        .into());
    }
    let mut updated_role: Role = role.clone();
    updated_role.assign(application.candidate_id)?;

    state
        .project_store
        .write()
        .await
        .accept_application(&application, &role, &updated_role)
        .await
        .map_err(|e| project_store_error(e, *application_id.as_ref()))?;

    let accepted = Application {
        status: ApplicationStatus::Accepted,
        ..application
    };

    notify(
        &state.notification_client,
        &accepted.candidate_id,
        NotificationEvent::ApplicationAccepted {
            application_id: accepted.id,
            role_id: role.id,
            role_title: role.title.as_ref().to_owned(),
        },
    )
    .await;
    send_role_invitation(state, &project, &updated_role, &accepted.candidate_id)
        .await;

    Ok(accepted)
}

#[tracing::instrument(name = "Rejecting application", skip_all)]
pub async fn reject_application(
    state: &AppState,
    session: &Session,
    application_id: &ApplicationId,
) -> Result<Application, ProjectAPIError> {
    let application = load_application(state, application_id).await?;
    let role = load_role(state, &application.role_id).await?;
    require_manager(state, session, &role).await?;
    ensure_pending(&application)?;

    state
        .project_store
        .write()
        .await
        .set_application_status(
            application_id,
            ApplicationStatus::Pending,
            ApplicationStatus::Rejected,
        )
        .await
        .map_err(|e| project_store_error(e, *application_id.as_ref()))?;

    let rejected = Application {
        status: ApplicationStatus::Rejected,
        ..application
    };

    notify(
        &state.notification_client,
        &rejected.candidate_id,
        NotificationEvent::ApplicationRejected {
            application_id: rejected.id,
            role_id: role.id,
            role_title: role.title.as_ref().to_owned(),
        },
    )
    .await;

    Ok(rejected)
}

/// The candidate deletes their own pending application.
#[tracing::instrument(name = "Withdrawing application", skip_all)]
pub async fn withdraw_application(
    state: &AppState,
    session: &Session,
    application_id: &ApplicationId,
) -> Result<(), ProjectAPIError> {
    let application = load_application(state, application_id).await?;
    if application.candidate_id != session.user_id {
        return Err(ProjectAPIError::Forbidden(
            "Only the candidate can withdraw an application".to_owned(),
        ));
    }
    ensure_pending(&application)?;

    state
        .project_store
        .write()
        .await
        .delete_application(application_id)
        .await
        .map_err(|e| project_store_error(e, *application_id.as_ref()))
}

#[tracing::instrument(name = "Listing role applications", skip_all)]
pub async fn list_applications(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
) -> Result<Vec<CandidateApplication>, ProjectAPIError> {
    let role = load_role(state, role_id).await?;
    require_manager(state, session, &role).await?;

    let applications = state
        .project_store
        .read()
        .await
        .get_applications_for_role(role_id)
        .await
        .map_err(|e| project_store_error(e, *role_id.as_ref()))?;

    let candidate_ids: Vec<_> =
        applications.iter().map(|a| a.candidate_id).collect();
    let profiles = state
        .profile_store
        .read()
        .await
        .get_profiles(&candidate_ids)
        .await
        .map_err(|e| profile_store_error(e, *role_id.as_ref()))?;

    Ok(applications
        .into_iter()
        .map(|application| {
            let candidate = profiles
                .iter()
                .find(|p| p.id == application.candidate_id)
                .cloned();
            CandidateApplication {
                application,
                candidate,
            }
        })
        .collect())
}

#[tracing::instrument(name = "Listing caller's applications", skip_all)]
pub async fn list_my_applications(
    state: &AppState,
    session: &Session,
) -> Result<Vec<Application>, ProjectAPIError> {
    state
        .project_store
        .read()
        .await
        .get_applications_for_candidate(&session.user_id)
        .await
        .map_err(|e| project_store_error(e, *session.user_id.as_ref()))
}
