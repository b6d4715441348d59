use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{ProjectAPIError, Role, RoleId},
    routes::RoleIdQueryParams,
    utils::auth::get_session,
    workflows::{delete_role, publish_role, unpublish_role},
    AppState,
};

#[tracing::instrument(name = "Publish role route handler", skip_all)]
pub async fn publish(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let role = publish_role(&state, &session, &RoleId::new(params.role_id)).await?;
    Ok((StatusCode::OK, jar, Json(role)))
}

#[tracing::instrument(name = "Unpublish role route handler", skip_all)]
pub async fn unpublish(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    let role =
        unpublish_role(&state, &session, &RoleId::new(params.role_id)).await?;
    Ok((StatusCode::OK, jar, Json(role)))
}

#[tracing::instrument(name = "Delete role route handler", skip_all)]
pub async fn remove_role(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
) -> Result<(StatusCode, CookieJar), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    delete_role(&state, &session, &RoleId::new(params.role_id)).await?;
    Ok((StatusCode::NO_CONTENT, jar))
}
