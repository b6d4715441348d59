use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result, WrapErr};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::BannedTokenStoreType,
    domain::{AuthAPIError, BannedTokenStoreError, ProfileId},
};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// Lifetime of tokens minted by `generate_auth_token`
pub const TOKEN_TTL_SECONDS: i64 = 600;

/// The authenticated caller, handed explicitly to every workflow.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: ProfileId,
    pub token: Secret<String>,
    pub expires_at: DateTime<Utc>,
}

/// Claims carried by the auth provider's HS256 session tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Reads the session token from the `jwt` cookie, falling back to an
/// `Authorization: Bearer` header, and validates it.
#[tracing::instrument(name = "Getting session", skip_all)]
pub async fn get_session(
    jar: &CookieJar,
    headers: &HeaderMap,
    banned_token_store: &BannedTokenStoreType,
) -> Result<Session, AuthAPIError> {
    let token = extract_token(jar, headers).ok_or(AuthAPIError::MissingToken)?;
    let claims = validate_token(&token, banned_token_store.clone()).await?;

    let user_id = ProfileId::parse(&claims.sub)
        .map_err(|_| AuthAPIError::InvalidToken)?;
    let expires_at = i64::try_from(claims.exp)
        .ok()
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
        .ok_or(AuthAPIError::InvalidToken)?;

    Ok(Session {
        user_id,
        token,
        expires_at,
    })
}

fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<Secret<String>> {
    if let Some(cookie) = jar.get(JWT_COOKIE_NAME) {
        return Some(Secret::new(cookie.value().to_owned()));
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| Secret::new(token.to_owned()))
}

/// Checks the revocation list, then the signature and expiry.
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub async fn validate_token(
    token: &Secret<String>,
    banned_token_store: BannedTokenStoreType,
) -> Result<Claims, AuthAPIError> {
    banned_token_store
        .read()
        .await
        .check_token(token)
        .await
        .map_err(|e| match e {
            BannedTokenStoreError::BannedToken => AuthAPIError::InvalidToken,
            BannedTokenStoreError::UnexpectedError(report) => {
                AuthAPIError::UnexpectedError(report)
            }
        })?;

    let mut validation = Validation::new(Algorithm::HS256);
    // Provider tokens carry an audience this service does not pin.
    validation.validate_aud = false;

    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthAPIError::InvalidToken)
}

/// Mints a session token for `profile_id`, signed like the auth provider's.
#[tracing::instrument(name = "Generating auth token", skip_all)]
pub fn generate_auth_token(profile_id: &ProfileId) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .ok_or_else(|| eyre!("failed to create token lifetime delta"))?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: profile_id.to_string(),
        exp,
    };

    create_token(&claims)
}

#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

impl Session {
    /// Bans the session token for the rest of its lifetime.
    #[tracing::instrument(name = "Revoking session", skip_all)]
    pub async fn revoke(
        &self,
        banned_token_store: &BannedTokenStoreType,
    ) -> Result<()> {
        banned_token_store
            .write()
            .await
            .add_token(&self.token, self.expires_at)
            .await
            .wrap_err("failed to ban session token")
    }
}
