use std::str::FromStr;

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    domain::{ProjectAPIError, ProjectId, Role, RoleCategory, RoleDetails},
    routes::role_details::RoleDetailsRequest,
    utils::auth::get_session,
    workflows::{self, NewRole},
    AppState,
};

#[tracing::instrument(name = "Create role route handler", skip_all)]
pub async fn create_role(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<CreateRoleRequest>,
) -> Result<(StatusCode, CookieJar, Json<Role>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let project_id = ProjectId::new(request.project_id);
    let new_role = NewRole {
        category: RoleCategory::from_str(&request.category)?,
        details: RoleDetails::try_from(request.details)?,
        publish: request.publish,
    };
    let role = workflows::create_role(&state, &session, &project_id, new_role).await?;

    Ok((StatusCode::CREATED, jar, Json(role)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub project_id: uuid::Uuid,
    pub category: String,
    #[serde(default)]
    pub publish: bool,
    #[serde(flatten)]
    pub details: RoleDetailsRequest,
}
