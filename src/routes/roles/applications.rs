use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Application, ApplicationMessage, ProjectAPIError, RoleId},
    routes::RoleIdQueryParams,
    utils::auth::get_session,
    workflows::{self, list_applications, ApplyOutcome, CandidateApplication},
    AppState,
};

/// 201 for a new application, 200 when the caller had already applied.
#[tracing::instrument(name = "Apply to role route handler", skip_all)]
pub async fn apply(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, CookieJar, Json<Application>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let message = ApplicationMessage::parse(request.message)?;
    let outcome =
        workflows::apply(&state, &session, &RoleId::new(params.role_id), message)
            .await?;

    let (status, application) = match outcome {
        ApplyOutcome::Created(application) => (StatusCode::CREATED, application),
        ApplyOutcome::AlreadyApplied(application) => (StatusCode::OK, application),
    };

    Ok((status, jar, Json(application)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[tracing::instrument(name = "Get role applications route handler", skip_all)]
pub async fn get_applications(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<ApplicationListResponse>), ProjectAPIError>
{
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let applications =
        list_applications(&state, &session, &RoleId::new(params.role_id)).await?;
    Ok((StatusCode::OK, jar, Json(ApplicationListResponse { applications })))
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<CandidateApplication>,
}
