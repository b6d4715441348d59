use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{ApplicationId, ProjectAPIError},
    routes::ApplicationIdQueryParams,
    utils::auth::get_session,
    workflows::withdraw_application,
    AppState,
};

#[tracing::instrument(name = "Withdraw application route handler", skip_all)]
pub async fn withdraw(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<ApplicationIdQueryParams>,
) -> Result<(StatusCode, CookieJar), ProjectAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;
    withdraw_application(
        &state,
        &session,
        &ApplicationId::new(params.application_id),
    )
    .await?;
    Ok((StatusCode::NO_CONTENT, jar))
}
