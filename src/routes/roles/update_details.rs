use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{ProjectAPIError, Role, RoleDetails, RoleId},
    routes::{role_details::RoleDetailsRequest, RoleIdQueryParams},
    utils::auth::get_session,
    workflows::update_role_details,
    AppState,
};

#[tracing::instrument(name = "Update role details route handler", skip_all)]
pub async fn update_details(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<RoleIdQueryParams>,
    Json(request): Json<RoleDetailsRequest>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let role_id = RoleId::new(params.role_id);
    let details = RoleDetails::try_from(request)?;
    let role = update_role_details(&state, &session, &role_id, details).await?;

    Ok((StatusCode::OK, jar, Json(role)))
}
