use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{cookie, CookieJar};

use crate::{
    domain::AuthAPIError,
    utils::{auth::get_session, constants::JWT_COOKIE_NAME},
    AppState,
};

#[tracing::instrument(name = "Logout route handler", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (CookieJar, Result<impl IntoResponse, AuthAPIError>) {
    let session =
        match get_session(&jar, &headers, &state.banned_token_store).await {
            Ok(session) => session,
            Err(e) => return (jar, Err(e)),
        };

    if let Err(e) = session.revoke(&state.banned_token_store).await {
        return (jar, Err(AuthAPIError::UnexpectedError(e)));
    }

    let jar = jar.remove(cookie::Cookie::build((JWT_COOKIE_NAME, "")).path("/"));

    (jar, Ok(StatusCode::OK))
}
