use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::{
    ProfileId, ProjectId, RoleCategory, RoleId, RoleStatus, RoleTitle,
    RoleTransitionError, ValidationError,
};

/// A single crew or cast position posted under a project.
///
/// Status changes go through the transition methods below so that the
/// assignee and the status can never disagree:
///
/// * `draft` never has an assignee;
/// * `invitation_pending` and `assigned` always have one;
/// * `published` never has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub project_id: ProjectId,
    pub category: RoleCategory,
    pub title: RoleTitle,
    pub description: Option<String>,
    status: RoleStatus,
    assigned_profile_id: Option<ProfileId>,
    pub requirements: RoleRequirements,
    pub remuneration: Remuneration,
    pub boost: Boost,
    pub is_category_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequirements {
    pub age_min: Option<i16>,
    pub age_max: Option<i16>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    /// Centimetres.
    pub height_min: Option<i16>,
    pub height_max: Option<i16>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub software: Vec<String>,
}

impl RoleRequirements {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range("age", self.age_min, self.age_max)?;
        validate_range("height", self.height_min, self.height_max)?;
        Ok(())
    }
}

fn validate_range(
    name: &str,
    min: Option<i16>,
    max: Option<i16>,
) -> Result<(), ValidationError> {
    if let Some(value) = min.into_iter().chain(max).find(|v| *v < 0) {
        return Err(ValidationError::new(format!(
            "Minimum {name} cannot be negative: {value}"
        )));
    }
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new(format!(
            "Minimum {name} must not exceed maximum {name}"
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remuneration {
    pub is_paid: bool,
    /// Whole euros.
    pub amount: Option<i32>,
}

impl Remuneration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.is_paid, self.amount) {
            (false, Some(_)) => Err(ValidationError::new(
                "Unpaid roles cannot carry an amount".to_string(),
            )),
            (true, Some(amount)) if amount < 0 => Err(ValidationError::new(
                "Remuneration amount cannot be negative".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boost {
    pub is_boosted: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Boost {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.is_boosted && self.expires_at.map_or(true, |expiry| expiry > now)
    }
}

/// Owner-editable attributes of a role. Status and assignee are never
/// part of a details update.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDetails {
    pub title: RoleTitle,
    pub description: Option<String>,
    pub requirements: RoleRequirements,
    pub remuneration: Remuneration,
    pub boost: Boost,
    pub is_category_admin: bool,
}

impl RoleDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.requirements.validate()?;
        self.remuneration.validate()
    }
}

impl Role {
    pub fn new(
        project_id: ProjectId,
        category: RoleCategory,
        title: RoleTitle,
    ) -> Self {
        Self {
            id: RoleId::default(),
            project_id,
            category,
            title,
            description: None,
            status: RoleStatus::Draft,
            assigned_profile_id: None,
            requirements: RoleRequirements::default(),
            remuneration: Remuneration::default(),
            boost: Boost::default(),
            is_category_admin: false,
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> RoleStatus {
        self.status
    }

    pub fn assigned_profile_id(&self) -> Option<ProfileId> {
        self.assigned_profile_id
    }

    pub fn is_assigned_to(&self, profile_id: &ProfileId) -> bool {
        self.assigned_profile_id.as_ref() == Some(profile_id)
    }

    pub fn apply_details(&mut self, details: RoleDetails) {
        self.title = details.title;
        self.description = non_blank(details.description);
        self.requirements = details.requirements;
        self.remuneration = details.remuneration;
        self.boost = details.boost;
        self.is_category_admin = details.is_category_admin;
    }

    pub fn publish(&mut self) -> Result<(), RoleTransitionError> {
        match self.status {
            RoleStatus::Draft => {
                self.status = RoleStatus::Published;
                Ok(())
            }
            RoleStatus::InvitationPending | RoleStatus::Assigned => {
                Err(RoleTransitionError::HasAssignee)
            }
            RoleStatus::Published => Err(RoleTransitionError::InvalidTransition {
                from: self.status,
                to: RoleStatus::Published,
            }),
        }
    }

    pub fn unpublish(&mut self) -> Result<(), RoleTransitionError> {
        if self.assigned_profile_id.is_some() {
            return Err(RoleTransitionError::HasAssignee);
        }
        match self.status {
            RoleStatus::Published => {
                self.status = RoleStatus::Draft;
                Ok(())
            }
            from => Err(RoleTransitionError::InvalidTransition {
                from,
                to: RoleStatus::Draft,
            }),
        }
    }

    /// Binds a candidate to the role.
    ///
    /// A fresh assignment always lands in `invitation_pending`. Picking the
    /// candidate who already holds the pending invitation confirms it.
    pub fn assign(
        &mut self,
        candidate: ProfileId,
    ) -> Result<RoleStatus, RoleTransitionError> {
        match (self.status, self.assigned_profile_id) {
            (RoleStatus::Published, None) => {
                self.status = RoleStatus::InvitationPending;
                self.assigned_profile_id = Some(candidate);
            }
            (RoleStatus::InvitationPending, Some(current)) if current == candidate => {
                self.status = RoleStatus::Assigned;
            }
            (RoleStatus::InvitationPending | RoleStatus::Assigned, Some(current))
                if current != candidate =>
            {
                return Err(RoleTransitionError::AssignedToOther);
            }
            (from, _) => {
                return Err(RoleTransitionError::InvalidTransition {
                    from,
                    to: RoleStatus::InvitationPending,
                });
            }
        }
        Ok(self.status)
    }

    pub fn accept_invitation(
        &mut self,
        candidate: &ProfileId,
    ) -> Result<(), RoleTransitionError> {
        self.check_invitee(candidate, RoleStatus::Assigned)?;
        self.status = RoleStatus::Assigned;
        Ok(())
    }

    pub fn decline_invitation(
        &mut self,
        candidate: &ProfileId,
    ) -> Result<(), RoleTransitionError> {
        self.check_invitee(candidate, RoleStatus::Published)?;
        self.status = RoleStatus::Published;
        self.assigned_profile_id = None;
        Ok(())
    }

    fn check_invitee(
        &self,
        candidate: &ProfileId,
        to: RoleStatus,
    ) -> Result<(), RoleTransitionError> {
        if self.status != RoleStatus::InvitationPending {
            return Err(RoleTransitionError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        if !self.is_assigned_to(candidate) {
            return Err(RoleTransitionError::NotInvitee);
        }
        Ok(())
    }

    /// Puts the role back on the market and returns the released assignee.
    pub fn remove_assignment(&mut self) -> Result<ProfileId, RoleTransitionError> {
        let assignee = self
            .assigned_profile_id
            .take()
            .ok_or(RoleTransitionError::NoAssignee)?;
        self.status = RoleStatus::Published;
        Ok(assignee)
    }
}

/// Row shape of `project_roles` as stored; every nullable column stays
/// optional until `Role::try_from` normalizes it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleRecord {
    pub role_id: Uuid,
    pub project_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub assigned_profile_id: Option<Uuid>,
    pub age_min: Option<i16>,
    pub age_max: Option<i16>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub height_min: Option<i16>,
    pub height_max: Option<i16>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub equipment: Option<Vec<String>>,
    pub software: Option<Vec<String>>,
    pub is_paid: Option<bool>,
    pub remuneration_amount: Option<i32>,
    pub is_boosted: Option<bool>,
    pub boost_expires_at: Option<DateTime<Utc>>,
    pub is_category_admin: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RoleRecord> for Role {
    type Error = ValidationError;

    fn try_from(record: RoleRecord) -> Result<Self, Self::Error> {
        let status = RoleStatus::from_str(&record.status)?;
        let assigned_profile_id = record.assigned_profile_id.map(ProfileId::new);
        if status.requires_assignee() != assigned_profile_id.is_some() {
            return Err(ValidationError::new(format!(
                "Role {} has status {status} but assignee {:?}",
                record.role_id, assigned_profile_id
            )));
        }

        Ok(Self {
            id: RoleId::new(record.role_id),
            project_id: ProjectId::new(record.project_id),
            category: RoleCategory::from_str(&record.category)?,
            title: RoleTitle::parse(&record.title)?,
            description: non_blank(record.description),
            status,
            assigned_profile_id,
            requirements: RoleRequirements {
                age_min: record.age_min,
                age_max: record.age_max,
                gender: non_blank(record.gender),
                experience_level: non_blank(record.experience_level),
                height_min: record.height_min,
                height_max: record.height_max,
                hair_color: non_blank(record.hair_color),
                eye_color: non_blank(record.eye_color),
                equipment: record.equipment.unwrap_or_default(),
                software: record.software.unwrap_or_default(),
            },
            remuneration: Remuneration {
                is_paid: record.is_paid.unwrap_or(false),
                amount: record.remuneration_amount,
            },
            boost: Boost {
                is_boosted: record.is_boosted.unwrap_or(false),
                expires_at: record.boost_expires_at,
            },
            is_category_admin: record.is_category_admin.unwrap_or(false),
            created_at: record.created_at,
        })
    }
}

impl From<&Role> for RoleRecord {
    fn from(role: &Role) -> Self {
        Self {
            role_id: *role.id.as_ref(),
            project_id: *role.project_id.as_ref(),
            category: role.category.as_str().to_owned(),
            title: role.title.as_ref().to_owned(),
            description: role.description.clone(),
            status: role.status.as_str().to_owned(),
            assigned_profile_id: role.assigned_profile_id.map(|id| *id.as_ref()),
            age_min: role.requirements.age_min,
            age_max: role.requirements.age_max,
            gender: role.requirements.gender.clone(),
            experience_level: role.requirements.experience_level.clone(),
            height_min: role.requirements.height_min,
            height_max: role.requirements.height_max,
            hair_color: role.requirements.hair_color.clone(),
            eye_color: role.requirements.eye_color.clone(),
            equipment: Some(role.requirements.equipment.clone()),
            software: Some(role.requirements.software.clone()),
            is_paid: Some(role.remuneration.is_paid),
            remuneration_amount: role.remuneration.amount,
            is_boosted: Some(role.boost.is_boosted),
            boost_expires_at: role.boost.expires_at,
            is_category_admin: Some(role.is_category_admin),
            created_at: role.created_at,
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
