use crate::{
    app_state::AppState,
    domain::{
        group_roles, Project, ProjectAPIError, ProjectId, ProjectTitle, Role,
        RoleCategory, RoleDetails, RoleId, RoleSection,
    },
    utils::auth::Session,
};

use super::{load_project, load_role, project_store_error, require_owner};

pub struct NewProject {
    pub title: ProjectTitle,
    pub project_type: Option<String>,
    pub city: Option<String>,
}

pub struct NewRole {
    pub category: RoleCategory,
    pub details: RoleDetails,
    pub publish: bool,
}

#[tracing::instrument(name = "Creating project", skip_all)]
pub async fn create_project(
    state: &AppState,
    session: &Session,
    new_project: NewProject,
) -> Result<Project, ProjectAPIError> {
    let project = Project::new(
        session.user_id,
        new_project.title,
        new_project.project_type,
        new_project.city,
    );

    state
        .project_store
        .write()
        .await
        .add_project(&project)
        .await
        .map_err(|e| project_store_error(e, *project.id.as_ref()))?;

    Ok(project)
}

#[tracing::instrument(name = "Getting project", skip_all)]
pub async fn get_project(
    state: &AppState,
    project_id: &ProjectId,
) -> Result<Project, ProjectAPIError> {
    load_project(state, project_id).await
}

#[tracing::instrument(name = "Listing caller's projects", skip_all)]
pub async fn list_my_projects(
    state: &AppState,
    session: &Session,
) -> Result<Vec<Project>, ProjectAPIError> {
    state
        .project_store
        .read()
        .await
        .get_project_list(&session.user_id)
        .await
        .map_err(|e| project_store_error(e, *session.user_id.as_ref()))
}

/// Creates a role under one of the caller's projects, as a draft unless
/// `publish` is set.
#[tracing::instrument(name = "Creating role", skip_all)]
pub async fn create_role(
    state: &AppState,
    session: &Session,
    project_id: &ProjectId,
    new_role: NewRole,
) -> Result<Role, ProjectAPIError> {
    new_role.details.validate()?;
    require_owner(state, session, project_id).await?;

    let mut role = Role::new(
        *project_id,
        new_role.category,
        new_role.details.title.clone(),
    );
    role.apply_details(new_role.details);
    if new_role.publish {
        role.publish()?;
    }

    state
        .project_store
        .write()
        .await
        .add_role(&role)
        .await
        .map_err(|e| project_store_error(e, *project_id.as_ref()))?;

    Ok(role)
}

/// Rewrites the owner-editable attributes; status and assignee are kept.
#[tracing::instrument(name = "Updating role details", skip_all)]
pub async fn update_role_details(
    state: &AppState,
    session: &Session,
    role_id: &RoleId,
    details: RoleDetails,
) -> Result<Role, ProjectAPIError> {
    details.validate()?;
    let current = load_role(state, role_id).await?;
    require_owner(state, session, &current.project_id).await?;

    let mut updated = current.clone();
    updated.apply_details(details);

    state
        .project_store
        .write()
        .await
        .update_role(&current, &updated)
        .await
        .map_err(|e| project_store_error(e, *role_id.as_ref()))?;

    Ok(updated)
}

/// The project's roles as ordered, non-empty sections.
#[tracing::instrument(name = "Grouping project roles", skip_all)]
pub async fn get_grouped_roles(
    state: &AppState,
    project_id: &ProjectId,
) -> Result<Vec<RoleSection>, ProjectAPIError> {
    let roles = state
        .project_store
        .read()
        .await
        .get_roles(project_id)
        .await
        .map_err(|e| project_store_error(e, *project_id.as_ref()))?;

    Ok(group_roles(&roles))
}
