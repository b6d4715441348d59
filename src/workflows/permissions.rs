use crate::{
    app_state::AppState,
    domain::{ProfileId, Project, ProjectAPIError, ProjectId, Role, RoleCategory, RoleStatus},
    utils::auth::Session,
};

use super::project_store_error;

/// Why the caller may manage a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Owner,
    CategoryAdmin,
}

/// True if `profile_id` holds a confirmed category-admin role for
/// `category` among `roles` (all from the same project).
pub fn is_category_admin(
    roles: &[Role],
    profile_id: &ProfileId,
    category: RoleCategory,
) -> bool {
    roles.iter().any(|role| {
        role.is_category_admin
            && role.category == category
            && role.status() == RoleStatus::Assigned
            && role.is_assigned_to(profile_id)
    })
}

pub(crate) async fn load_project(
    state: &AppState,
    project_id: &ProjectId,
) -> Result<Project, ProjectAPIError> {
    state
        .project_store
        .read()
        .await
        .get_project(project_id)
        .await
        .map_err(|e| project_store_error(e, *project_id.as_ref()))
}

/// Loads the project and fails with `Forbidden` unless the caller owns it.
#[tracing::instrument(name = "Checking project ownership", skip_all)]
pub async fn require_owner(
    state: &AppState,
    session: &Session,
    project_id: &ProjectId,
) -> Result<Project, ProjectAPIError> {
    let project = load_project(state, project_id).await?;
    if !project.is_owned_by(&session.user_id) {
        return Err(ProjectAPIError::Forbidden(
            "Only the project owner can do this".to_owned(),
        ));
    }
    Ok(project)
}

/// Owner, or category admin for the role's category; anyone else is
/// `Forbidden`.
#[tracing::instrument(name = "Checking role management rights", skip_all)]
pub async fn require_manager(
    state: &AppState,
    session: &Session,
    role: &Role,
) -> Result<(Project, Authority), ProjectAPIError> {
    let project = load_project(state, &role.project_id).await?;
    if project.is_owned_by(&session.user_id) {
        return Ok((project, Authority::Owner));
    }

    let roles = state
        .project_store
        .read()
        .await
        .get_roles(&project.id)
        .await
        .map_err(|e| project_store_error(e, *project.id.as_ref()))?;

    if is_category_admin(&roles, &session.user_id, role.category) {
        Ok((project, Authority::CategoryAdmin))
    } else {
        Err(ProjectAPIError::Forbidden(
            "Only the project owner or a category admin can manage this role"
                .to_owned(),
        ))
    }
}
