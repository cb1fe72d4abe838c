// Clubs own players and host tournaments.
use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::logic::{time::iso_date_format, types::ClubId};

#[derive(Debug, Clone)]
#[derive(FromRow, Serialize)]
pub struct Club {
    pub id: ClubId,
    #[sqlx(rename = "club_name")]
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
    #[serde(with = "iso_date_format")]
    pub created_on: Date,
}

impl Default for Club {
    fn default() -> Self {
        Self {
            id: ClubId::default(),
            name: String::default(),
            city: None,
            description: None,
            created_on: Date::MIN,
        }
    }
}

// What a user may change about a club.
#[derive(Debug, Clone, Default)]
pub struct ClubInput {
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
}

impl ClubInput {
    // Build the input from raw form values, trimming everything and dropping empty optionals.
    pub fn build(name: &str, city: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            city: non_empty(city),
            description: non_empty(description),
        }
    }

    // Every problem with the input. Name uniqueness is checked against the database separately.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("Club name is required.".to_string());
        }
        if self.name.chars().count() > 100 {
            errors.push("Club name can be at most 100 characters.".to_string());
        }
        errors
    }
}

impl Club {
    // Get the city, or an empty string.
    pub fn city_or_blank(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }
}

// Trim a value and turn blanks into None.
pub fn non_empty(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        v => Some(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_trims_and_drops_blanks() {
        let input = ClubInput::build("  Riverside FC ", "   ", " Est. 1921 ");
        assert_eq!(input.name, "Riverside FC");
        assert_eq!(input.city, None);
        assert_eq!(input.description.as_deref(), Some("Est. 1921"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = ClubInput::build("  ", "", "").validate();
        assert_eq!(errors, vec!["Club name is required.".to_string()]);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let errors = ClubInput::build(&"x".repeat(101), "", "").validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("100"));
    }
}
