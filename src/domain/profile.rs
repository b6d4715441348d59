use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{role::non_blank, ProfileId, RoleCategory};

pub const FALLBACK_DISPLAY_NAME: &str = "Utilisateur";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub full_name: Option<String>,
    pub username: Option<String>,
    /// Free-text primary job, usually one of the role category keys.
    pub primary_role: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl Profile {
    pub fn new(id: ProfileId, full_name: &str) -> Self {
        Self {
            id,
            full_name: non_blank(Some(full_name.to_owned())),
            username: None,
            primary_role: None,
            city: None,
            avatar_url: None,
            bio: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }

    pub fn works_in(&self, category: RoleCategory) -> bool {
        self.primary_role
            .as_deref()
            .is_some_and(|role| category.matches_primary_role(role))
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub profile_id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            id: ProfileId::new(record.profile_id),
            full_name: non_blank(record.full_name),
            username: non_blank(record.username),
            primary_role: non_blank(record.role),
            city: non_blank(record.city),
            avatar_url: non_blank(record.avatar_url),
            bio: non_blank(record.bio),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
}

/// A network link between two profiles. Once accepted it is symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub requester_id: ProfileId,
    pub addressee_id: ProfileId,
    pub status: ConnectionStatus,
}

impl Connection {
    pub fn accepted(requester_id: ProfileId, addressee_id: ProfileId) -> Self {
        Self {
            requester_id,
            addressee_id,
            status: ConnectionStatus::Accepted,
        }
    }

    /// The profile on the other side of the link, if `profile_id` is part of it.
    pub fn other_side(&self, profile_id: &ProfileId) -> Option<ProfileId> {
        if &self.requester_id == profile_id {
            Some(self.addressee_id)
        } else if &self.addressee_id == profile_id {
            Some(self.requester_id)
        } else {
            None
        }
    }
}
