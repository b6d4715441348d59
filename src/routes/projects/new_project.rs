use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    domain::{Project, ProjectAPIError, ProjectTitle},
    utils::auth::get_session,
    workflows::{create_project, NewProject},
    AppState,
};

#[tracing::instrument(name = "New project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<NewProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<Project>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let new_project = NewProject {
        title: ProjectTitle::parse(&request.title)?,
        project_type: request.project_type,
        city: request.city,
    };
    let project = create_project(&state, &session, new_project).await?;

    Ok((StatusCode::CREATED, jar, Json(project)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    pub title: String,
    pub project_type: Option<String>,
    pub city: Option<String>,
}
