use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    domain::{ProjectAPIError, ProjectId, RoleSection},
    routes::ProjectIdQueryParams,
    utils::auth::get_session,
    workflows::{get_grouped_roles, get_project},
    AppState,
};

/// Roles of a project, grouped into sections and by normalized title.
#[tracing::instrument(name = "Get roles route handler", skip_all)]
pub async fn get_roles(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<ProjectIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<RolesResponse>), ProjectAPIError> {
    get_session(&jar, &headers, &state.banned_token_store).await?;

    let project_id = ProjectId::new(params.project_id);
    // 404 for unknown projects rather than an empty listing
    get_project(&state, &project_id).await?;
    let sections = get_grouped_roles(&state, &project_id).await?;

    Ok((StatusCode::OK, jar, Json(RolesResponse { sections })))
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub sections: Vec<RoleSection>,
}
