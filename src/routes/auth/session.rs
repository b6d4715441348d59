use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{domain::AuthAPIError, utils::auth::get_session, AppState};

#[tracing::instrument(name = "Get session route handler", skip_all)]
pub async fn get_current_session(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<SessionResponse>), AuthAPIError> {
    let session = get_session(&jar, &headers, &state.banned_token_store).await?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            user_id: session.user_id.to_string(),
            expires_at: session.expires_at,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}
