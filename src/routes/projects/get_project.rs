use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{Project, ProjectAPIError, ProjectId},
    routes::ProjectIdQueryParams,
    utils::auth::get_session,
    workflows,
    AppState,
};

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<ProjectIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Project>), ProjectAPIError> {
    get_session(&jar, &headers, &state.banned_token_store).await?;

    let project_id = ProjectId::new(params.project_id);
    let project = workflows::get_project(&state, &project_id).await?;

    Ok((StatusCode::OK, jar, Json(project)))
}
