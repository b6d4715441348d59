use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::{role::non_blank, ProfileId, ProjectId, ProjectTitle, ValidationError};

/// A film or video production ("tournage").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: ProfileId,
    pub title: ProjectTitle,
    pub project_type: Option<String>,
    pub city: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        owner_id: ProfileId,
        title: ProjectTitle,
        project_type: Option<String>,
        city: Option<String>,
    ) -> Self {
        Self {
            id: ProjectId::default(),
            owner_id,
            title,
            project_type: non_blank(project_type),
            city: non_blank(city),
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, profile_id: &ProfileId) -> bool {
        &self.owner_id == profile_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Active,
    Completed,
}

impl ProjectStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(ValidationError::new(format!("Invalid project status: {s}"))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRecord {
    pub project_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub project_type: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let status = match non_blank(record.status) {
            Some(status) => ProjectStatus::from_str(&status)?,
            None => ProjectStatus::Active,
        };
        Ok(Self {
            id: ProjectId::new(record.project_id),
            owner_id: ProfileId::new(record.owner_id),
            title: ProjectTitle::parse(&record.title)?,
            project_type: non_blank(record.project_type),
            city: non_blank(record.city),
            status,
            created_at: record.created_at,
        })
    }
}
