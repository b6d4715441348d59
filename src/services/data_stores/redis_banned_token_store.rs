use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result, WrapErr};
use redis::{Commands, Connection};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{BannedTokenStore, BannedTokenStoreError};

pub struct RedisBannedTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisBannedTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(
        name = "Adding token to Redis banned token store",
        skip_all
    )]
    async fn add_token(
        &mut self,
        token: &Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let key = get_key(token);
        let ttl_seconds = ban_ttl_seconds(expires_at, Utc::now());

        self.conn
            .write()
            .await
            .set_ex::<_, _, ()>(key, true, ttl_seconds)
            .wrap_err("failed to set banned token in Redis")
            .map_err(BannedTokenStoreError::UnexpectedError)?;

        Ok(())
    }

    #[tracing::instrument(name = "Checking Redis banned token store", skip_all)]
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        let key = get_key(token);
        match self.conn.write().await.exists(&key) {
            Ok(true) => Err(BannedTokenStoreError::BannedToken),
            Ok(false) => Ok(()),
            Err(e) => {
                Err(eyre!(e)
                    .wrap_err("failed to check if token exists in Redis"))
                .map_err(BannedTokenStoreError::UnexpectedError)
            }
        }
    }
}

const BANNED_TOKEN_KEY_PREFIX: &str = "banned_token:";

fn get_key(token: &Secret<String>) -> String {
    format!("{}{}", BANNED_TOKEN_KEY_PREFIX, token.expose_secret())
}

// Redis rejects a zero expiry, so an already expired token is kept for 1s.
fn ban_ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((expires_at - now).num_seconds())
        .unwrap_or(0)
        .max(1)
}
