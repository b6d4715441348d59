use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    domain::{Project, ProjectAPIError},
    utils::auth::get_session,
    workflows::list_my_projects,
    AppState,
};

#[tracing::instrument(name = "Get project list route handler", skip_all)]
pub async fn get_project_list(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(StatusCode, CookieJar, Json<ProjectListResponse>), ProjectAPIError>
{
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let projects = list_my_projects(&state, &session).await?;

    Ok((StatusCode::OK, jar, Json(ProjectListResponse { projects })))
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}
