use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Regex for RoleTitle normalization is invalid");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTitle(String);

impl RoleTitle {
    pub fn parse(title: &str) -> Result<Self, ValidationError> {
        let trimmed = title.trim();
        match trimmed.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Role title cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max title length is 255 characters".to_string(),
            )),
            _ => Ok(Self(trimmed.to_owned())),
        }
    }

    /// Key used to decide whether two postings are the same position.
    pub fn normalized(&self) -> String {
        WHITESPACE_RUN.replace_all(&self.0, " ").to_lowercase()
    }
}

impl AsRef<String> for RoleTitle {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_role_titles() {
    let valid_titles = ["a".to_string(), "a".repeat(255)];
    for valid_title in valid_titles.iter() {
        let parsed = RoleTitle::parse(valid_title)
            .expect("Failed to parse valid role title");

        assert_eq!(parsed.as_ref(), valid_title);
    }
}

#[test]
fn test_role_titles_are_trimmed() {
    let parsed = RoleTitle::parse("  Chef opérateur ").unwrap();
    assert_eq!(parsed.as_ref(), "Chef opérateur");
}

#[test]
fn test_blank_role_titles() {
    for blank in ["", "   "] {
        let result = RoleTitle::parse(blank);
        assert_eq!(
            result.unwrap_err().as_ref(),
            "Role title cannot be empty"
        );
    }
}

#[test]
fn test_long_role_titles() {
    let result = RoleTitle::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max title length is 255 characters"
    );
}

#[test]
fn test_normalized_title() {
    let a = RoleTitle::parse("Rôle  Principal").unwrap();
    let b = RoleTitle::parse(" rôle principal").unwrap();
    assert_eq!(a.normalized(), "rôle principal");
    assert_eq!(a.normalized(), b.normalized());
}
