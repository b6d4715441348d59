use serde::Deserialize;

use crate::domain::{
    Boost, Remuneration, RoleDetails, RoleRequirements, RoleTitle,
    ValidationError,
};

/// Owner-editable role attributes as sent by clients.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetailsRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: RoleRequirements,
    #[serde(default)]
    pub remuneration: Remuneration,
    #[serde(default)]
    pub boost: Boost,
    #[serde(default)]
    pub is_category_admin: bool,
}

impl TryFrom<RoleDetailsRequest> for RoleDetails {
    type Error = ValidationError;

    fn try_from(request: RoleDetailsRequest) -> Result<Self, Self::Error> {
        let details = RoleDetails {
            title: RoleTitle::parse(&request.title)?,
            description: request.description,
            requirements: request.requirements,
            remuneration: request.remuneration,
            boost: request.boost,
            is_category_admin: request.is_category_admin,
        };
        details.validate()?;
        Ok(details)
    }
}
