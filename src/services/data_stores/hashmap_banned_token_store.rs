use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

use crate::domain::{BannedTokenStore, BannedTokenStoreError};

/// In-memory revocation list. Entries past their expiry are ignored on
/// lookup and swept out on the next insert.
#[derive(Default)]
pub struct HashmapBannedTokenStore {
    banned_tokens: HashMap<String, DateTime<Utc>>,
}

#[async_trait::async_trait]
impl BannedTokenStore for HashmapBannedTokenStore {
    async fn add_token(
        &mut self,
        token: &Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let now = Utc::now();
        self.banned_tokens.retain(|_, expiry| *expiry > now);
        self.banned_tokens
            .insert(token.expose_secret().to_owned(), expires_at);
        Ok(())
    }

    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        match self.banned_tokens.get(token.expose_secret()) {
            Some(expiry) if *expiry > Utc::now() => {
                Err(BannedTokenStoreError::BannedToken)
            }
            _ => Ok(()),
        }
    }
}
