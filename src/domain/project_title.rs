use serde::{Deserialize, Serialize};

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTitle(String);

impl ProjectTitle {
    pub fn parse(title: &str) -> Result<Self, ValidationError> {
        let trimmed = title.trim();
        match trimmed.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Project title cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max title length is 255 characters".to_string(),
            )),
            _ => Ok(Self(trimmed.to_owned())),
        }
    }
}

impl AsRef<String> for ProjectTitle {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_project_titles() {
    let valid_titles = ["a".to_string(), "a".repeat(255)];
    for valid_title in valid_titles.iter() {
        let parsed = ProjectTitle::parse(valid_title)
            .expect("Failed to parse valid project title");

        assert_eq!(parsed.as_ref(), valid_title);
    }
}

#[test]
fn test_short_project_titles() {
    let result = ProjectTitle::parse(" ");
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Project title cannot be empty"
    );
}

#[test]
fn test_long_project_titles() {
    let result = ProjectTitle::parse(&"a".repeat(256));
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max title length is 255 characters"
    );
}
