use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{search::RankedCandidate, ProjectAPIError, RoleId},
    utils::auth::get_session,
    workflows,
    AppState,
};

#[derive(Deserialize)]
pub struct SearchQueryParams {
    #[serde(rename = "roleId")]
    role_id: uuid::Uuid,
    #[serde(default)]
    query: String,
}

#[tracing::instrument(name = "Search candidates route handler", skip_all)]
pub async fn search_candidates(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<SearchQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<SearchResponse>), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    let candidates = workflows::search_candidates(
        &state,
        &session,
        &RoleId::new(params.role_id),
        &params.query,
    )
    .await?;

    Ok((StatusCode::OK, jar, Json(SearchResponse { candidates })))
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub candidates: Vec<RankedCandidate>,
}
