pub mod applications;
pub mod auth;
pub mod projects;
mod role_details;
pub mod roles;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct ProjectIdQueryParams {
    #[serde(rename = "projectId")]
    pub project_id: uuid::Uuid,
}

#[derive(Deserialize)]
pub struct RoleIdQueryParams {
    #[serde(rename = "roleId")]
    pub role_id: uuid::Uuid,
}

#[derive(Deserialize)]
pub struct ApplicationIdQueryParams {
    #[serde(rename = "applicationId")]
    pub application_id: uuid::Uuid,
}
