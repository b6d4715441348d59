use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    BannedTokenStore, NotificationClient, ProfileStore, ProjectStore,
};
pub type BannedTokenStoreType = Arc<RwLock<dyn BannedTokenStore + Send + Sync>>;
pub type NotificationClientType = Arc<dyn NotificationClient + Send + Sync>;
pub type ProfileStoreType = Arc<RwLock<dyn ProfileStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub banned_token_store: BannedTokenStoreType,
    pub notification_client: NotificationClientType,
    pub profile_store: ProfileStoreType,
    pub project_store: ProjectStoreType,
}

impl AppState {
    pub fn new(
        banned_token_store: BannedTokenStoreType,
        notification_client: NotificationClientType,
        profile_store: ProfileStoreType,
        project_store: ProjectStoreType,
    ) -> Self {
        Self {
            banned_token_store,
            notification_client,
            profile_store,
            project_store,
        }
    }
}
