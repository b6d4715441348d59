use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{role::non_blank, ApplicationId, ProfileId, RoleId, ValidationError};

/// A candidate's request to fill a published role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub role_id: RoleId,
    pub candidate_id: ProfileId,
    pub status: ApplicationStatus,
    pub message: Option<ApplicationMessage>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        role_id: RoleId,
        candidate_id: ProfileId,
        message: Option<ApplicationMessage>,
    ) -> Self {
        Self {
            id: ApplicationId::default(),
            role_id,
            candidate_id,
            status: ApplicationStatus::Pending,
            message,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(ValidationError::new(format!(
                "Invalid application status: {s}"
            ))),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationMessage(String);

impl ApplicationMessage {
    const MAX_CHARS: usize = 2000;

    /// Blank messages are treated as no message at all.
    pub fn parse(message: Option<String>) -> Result<Option<Self>, ValidationError> {
        let Some(message) = non_blank(message) else {
            return Ok(None);
        };
        if message.chars().count() > Self::MAX_CHARS {
            return Err(ValidationError::new(format!(
                "Max message length is {} characters",
                Self::MAX_CHARS
            )));
        }
        Ok(Some(Self(message)))
    }
}

impl AsRef<String> for ApplicationMessage {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationRecord {
    pub application_id: Uuid,
    pub role_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRecord> for Application {
    type Error = ValidationError;

    fn try_from(record: ApplicationRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::new(record.application_id),
            role_id: RoleId::new(record.role_id),
            candidate_id: ProfileId::new(record.candidate_id),
            status: ApplicationStatus::from_str(&record.status)?,
            message: ApplicationMessage::parse(record.message)?,
            created_at: record.created_at,
        })
    }
}
