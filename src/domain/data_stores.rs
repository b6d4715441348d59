use super::{
    Application, ApplicationId, ApplicationStatus, Connection, Profile,
    ProfileId, Project, ProjectId, Role, RoleCategory, RoleId,
};
use chrono::{DateTime, Utc};
use color_eyre::eyre::{Report, Result};
use secrecy::Secret;
use thiserror::Error;

/// Session tokens revoked before their natural expiry.
#[async_trait::async_trait]
pub trait BannedTokenStore {
    /// Bans `token` until `expires_at`, after which it is invalid anyway.
    async fn add_token(
        &mut self,
        token: &Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError>;
}

#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Token is banned")]
    BannedToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BannedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BannedToken, Self::BannedToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Projects, their role postings and the applications to those roles.
///
/// Role writes are compare-and-set: `previous` is the row as the caller
/// read it, and the write only lands if the stored status and assignee
/// still match. A miss is reported as `NoRowsAffected`.
#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    async fn get_project_list(
        &self,
        owner_id: &ProfileId,
    ) -> Result<Vec<Project>, ProjectStoreError>;

    async fn add_role(&mut self, role: &Role) -> Result<(), ProjectStoreError>;
    async fn get_role(&self, role_id: &RoleId) -> Result<Role, ProjectStoreError>;
    async fn get_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Role>, ProjectStoreError>;
    async fn update_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError>;
    /// Removes the role together with its applications.
    async fn delete_role(&mut self, role_id: &RoleId) -> Result<(), ProjectStoreError>;
    /// Frees an assigned role and drops its accepted application so the
    /// candidate can apply again.
    async fn release_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError>;

    async fn add_application(
        &mut self,
        application: &Application,
    ) -> Result<(), ProjectStoreError>;
    async fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, ProjectStoreError>;
    async fn find_application(
        &self,
        role_id: &RoleId,
        candidate_id: &ProfileId,
    ) -> Result<Application, ProjectStoreError>;
    async fn get_applications_for_role(
        &self,
        role_id: &RoleId,
    ) -> Result<Vec<Application>, ProjectStoreError>;
    async fn get_applications_for_candidate(
        &self,
        candidate_id: &ProfileId,
    ) -> Result<Vec<Application>, ProjectStoreError>;
    async fn set_application_status(
        &mut self,
        application_id: &ApplicationId,
        previous: ApplicationStatus,
        status: ApplicationStatus,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_application(
        &mut self,
        application_id: &ApplicationId,
    ) -> Result<(), ProjectStoreError>;
    /// Accepts `application`, rejects every other pending application for
    /// the same role and writes `updated_role`, all or nothing.
    async fn accept_application(
        &mut self,
        application: &Application,
        previous_role: &Role,
        updated_role: &Role,
    ) -> Result<(), ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project ID exists")]
    ProjectIDExists,
    #[error("Project ID not found")]
    ProjectIDNotFound,
    #[error("Role ID exists")]
    RoleIDExists,
    #[error("Role ID not found")]
    RoleIDNotFound,
    #[error("Application ID not found")]
    ApplicationIDNotFound,
    #[error("Candidate already applied to this role")]
    DuplicateApplication,
    #[error("Write matched no rows")]
    NoRowsAffected,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectIDExists, Self::ProjectIDExists)
                | (Self::ProjectIDNotFound, Self::ProjectIDNotFound)
                | (Self::RoleIDExists, Self::RoleIDExists)
                | (Self::RoleIDNotFound, Self::RoleIDNotFound)
                | (Self::ApplicationIDNotFound, Self::ApplicationIDNotFound)
                | (Self::DuplicateApplication, Self::DuplicateApplication)
                | (Self::NoRowsAffected, Self::NoRowsAffected)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait ProfileStore {
    async fn add_profile(&mut self, profile: &Profile) -> Result<(), ProfileStoreError>;
    async fn get_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Profile, ProfileStoreError>;
    async fn get_profiles(
        &self,
        profile_ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileStoreError>;
    /// Up to `limit` profiles among `within` whose full name, username or
    /// city contains `token`, case-insensitively.
    async fn search_profiles(
        &self,
        token: &str,
        within: &[ProfileId],
        limit: usize,
    ) -> Result<Vec<Profile>, ProfileStoreError>;
    /// Profiles among `within` whose primary role is `category`.
    async fn get_profiles_in_category(
        &self,
        within: &[ProfileId],
        category: RoleCategory,
    ) -> Result<Vec<Profile>, ProfileStoreError>;
    async fn add_connection(
        &mut self,
        connection: &Connection,
    ) -> Result<(), ProfileStoreError>;
    /// Profiles linked to `profile_id` by an accepted connection.
    async fn get_connections(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<ProfileId>, ProfileStoreError>;
}

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Profile already exists")]
    ProfileAlreadyExists,
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProfileStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProfileAlreadyExists, Self::ProfileAlreadyExists)
                | (Self::ProfileNotFound, Self::ProfileNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
