use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    domain::{ProfileId, ProjectAPIError, Role, RoleId},
    routes::RoleIdQueryParams,
    utils::auth::get_session,
    workflows::{assign_candidate, remove_assignment, respond_to_invitation},
    AppState,
};

#[tracing::instrument(name = "Assign candidate route handler", skip_all)]
pub async fn assign(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
    Json(request): Json<AssignRequest>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let candidate_id = ProfileId::parse(&request.candidate_id)?;
    let role = assign_candidate(
        &state,
        &session,
        &RoleId::new(params.role_id),
        &candidate_id,
    )
    .await?;

    Ok((StatusCode::OK, jar, Json(role)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub candidate_id: String,
}

#[tracing::instrument(name = "Remove assignment route handler", skip_all)]
pub async fn unassign(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let role =
        remove_assignment(&state, &session, &RoleId::new(params.role_id)).await?;
    Ok((StatusCode::OK, jar, Json(role)))
}

/// The invited candidate accepts or declines the role.
#[tracing::instrument(name = "Respond to invitation route handler", skip_all)]
pub async fn respond_invitation(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
    Json(request): Json<InvitationResponseRequest>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let role = respond_to_invitation(
        &state,
        &session,
        &RoleId::new(params.role_id),
        request.accept,
    )
    .await?;
    Ok((StatusCode::OK, jar, Json(role)))
}

#[derive(Debug, Deserialize)]
pub struct InvitationResponseRequest {
    pub accept: bool,
}
