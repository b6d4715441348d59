use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    domain::{Application, ProjectAPIError},
    utils::auth::get_session,
    workflows::list_my_applications,
    AppState,
};

#[tracing::instrument(name = "Get my applications route handler", skip_all)]
pub async fn get_my_applications(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(StatusCode, CookieJar, Json<MyApplicationsResponse>), ProjectAPIError>
{
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let applications = list_my_applications(&state, &session).await?;
    Ok((StatusCode::OK, jar, Json(MyApplicationsResponse { applications })))
}

#[derive(Debug, Serialize)]
pub struct MyApplicationsResponse {
    pub applications: Vec<Application>,
}
