//! Publication status of a role posting and the errors raised when a
//! requested transition is not allowed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleStatus {
    /// Only visible to the project team.
    Draft,
    /// Open for applications and candidate search.
    Published,
    /// A candidate was picked and has not answered yet.
    InvitationPending,
    /// The candidate confirmed; the role is filled.
    Assigned,
}

impl RoleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Draft => "draft",
            RoleStatus::Published => "published",
            RoleStatus::InvitationPending => "invitation_pending",
            RoleStatus::Assigned => "assigned",
        }
    }

    /// Statuses that must carry an assignee.
    pub const fn requires_assignee(&self) -> bool {
        matches!(self, RoleStatus::InvitationPending | RoleStatus::Assigned)
    }
}

impl FromStr for RoleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RoleStatus::Draft),
            "published" => Ok(RoleStatus::Published),
            "invitation_pending" => Ok(RoleStatus::InvitationPending),
            "assigned" => Ok(RoleStatus::Assigned),
            _ => Err(ValidationError::new(format!("Invalid role status: {s}"))),
        }
    }
}

impl fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RoleTransitionError {
    #[error("Cannot move role from {from} to {to}")]
    InvalidTransition { from: RoleStatus, to: RoleStatus },
    #[error("Role has an assigned candidate")]
    HasAssignee,
    #[error("Role is already assigned to another candidate")]
    AssignedToOther,
    #[error("Role has no assigned candidate")]
    NoAssignee,
    #[error("Invitation is addressed to another candidate")]
    NotInvitee,
}
