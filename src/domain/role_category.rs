use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Department a role belongs to on set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Acteur,
    Realisateur,
    Image,
    Son,
    Production,
    Hmc,
    Deco,
    PostProd,
    Technicien,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 9] = [
        RoleCategory::Acteur,
        RoleCategory::Realisateur,
        RoleCategory::Image,
        RoleCategory::Son,
        RoleCategory::Production,
        RoleCategory::Hmc,
        RoleCategory::Deco,
        RoleCategory::PostProd,
        RoleCategory::Technicien,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Acteur => "acteur",
            RoleCategory::Realisateur => "realisateur",
            RoleCategory::Image => "image",
            RoleCategory::Son => "son",
            RoleCategory::Production => "production",
            RoleCategory::Hmc => "hmc",
            RoleCategory::Deco => "deco",
            RoleCategory::PostProd => "post_prod",
            RoleCategory::Technicien => "technicien",
        }
    }

    /// Human readable department name shown in section headers.
    pub const fn label(&self) -> &'static str {
        match self {
            RoleCategory::Acteur => "Acteur",
            RoleCategory::Realisateur => "Réalisation",
            RoleCategory::Image => "Image",
            RoleCategory::Son => "Son",
            RoleCategory::Production => "Production",
            RoleCategory::Hmc => "HMC",
            RoleCategory::Deco => "Déco",
            RoleCategory::PostProd => "Post-production",
            RoleCategory::Technicien => "Technicien",
        }
    }

    /// Whether a profile's free-text primary role names this category.
    pub fn matches_primary_role(&self, primary_role: &str) -> bool {
        primary_role.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RoleCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::new(format!("Invalid role category: {}", s.trim()))
            })
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
