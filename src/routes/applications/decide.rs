use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{Application, ApplicationId, ProjectAPIError},
    routes::ApplicationIdQueryParams,
    utils::auth::get_session,
    workflows::{accept_application, reject_application},
    AppState,
};

#[tracing::instrument(name = "Accept application route handler", skip_all)]
pub async fn accept(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<ApplicationIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Application>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let application = accept_application(
        &state,
        &session,
        &ApplicationId::new(params.application_id),
    )
    .await?;
    Ok((StatusCode::OK, jar, Json(application)))
}

#[tracing::instrument(name = "Reject application route handler", skip_all)]
pub async fn reject(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<ApplicationIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Application>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let application = reject_application(
        &state,
        &session,
        &ApplicationId::new(params.application_id),
    )
    .await?;
    Ok((StatusCode::OK, jar, Json(application)))
}
