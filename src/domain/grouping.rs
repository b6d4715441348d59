//! Grouped view of a project's roles.
//!
//! Several postings for the same position (same category, same title once
//! trimmed and lowercased, same status bucket) are shown as one group with a
//! fill count. Groups are gathered into sections emitted in a fixed order,
//! and only when non-empty.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Role, RoleCategory, RoleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Recruiting,
    PendingInvitations,
    Drafts,
    Team,
}

impl SectionKind {
    pub const fn for_status(status: RoleStatus) -> Self {
        match status {
            RoleStatus::Published => SectionKind::Recruiting,
            RoleStatus::InvitationPending => SectionKind::PendingInvitations,
            RoleStatus::Draft => SectionKind::Drafts,
            RoleStatus::Assigned => SectionKind::Team,
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            SectionKind::Recruiting => "Recrutement",
            SectionKind::PendingInvitations => "Invitations en attente",
            SectionKind::Drafts => "Brouillons",
            SectionKind::Team => "Équipe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSection {
    pub kind: SectionKind,
    pub title: &'static str,
    pub groups: Vec<RoleGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGroup {
    pub category: RoleCategory,
    /// Title as typed on the first posting of the group.
    pub title: String,
    pub normalized_title: String,
    pub total_qty: usize,
    pub assigned_count: usize,
    pub roles: Vec<Role>,
}

impl RoleGroup {
    fn push(&mut self, role: &Role) {
        self.total_qty += 1;
        if role.assigned_profile_id().is_some() {
            self.assigned_count += 1;
        }
        self.roles.push(role.clone());
    }
}

pub fn group_roles(roles: &[Role]) -> Vec<RoleSection> {
    let mut groups: BTreeMap<(SectionKind, String, RoleCategory), RoleGroup> =
        BTreeMap::new();

    for role in roles {
        let normalized_title = role.title.normalized();
        let key = (
            SectionKind::for_status(role.status()),
            normalized_title.clone(),
            role.category,
        );
        groups
            .entry(key)
            .or_insert_with(|| RoleGroup {
                category: role.category,
                title: role.title.as_ref().to_owned(),
                normalized_title,
                total_qty: 0,
                assigned_count: 0,
                roles: Vec::new(),
            })
            .push(role);
    }

    let mut sections: Vec<RoleSection> = Vec::new();
    for ((kind, _, _), group) in groups {
        match sections.last_mut() {
            Some(section) if section.kind == kind => section.groups.push(group),
            _ => sections.push(RoleSection {
                kind,
                title: kind.title(),
                groups: vec![group],
            }),
        }
    }
    sections
}
