pub mod role;

use serde::Serialize;
use sqlx::{FromRow, Row, sqlite::SqliteRow};

use crate::logic::{club::non_empty, person::role::Role, types::{ClubId, PlayerId}};

#[derive(Debug, Clone, Default)]
#[derive(Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub club_id: ClubId,
    pub forename: String,
    pub surname: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl FromRow<'_, SqliteRow> for Player {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let roles: Option<String> = row.try_get("roles")?;
        Ok(Self {
            id: row.try_get("id")?,
            club_id: row.try_get("club_id")?,
            forename: row.try_get("forename")?,
            surname: row.try_get("surname")?,
            email: row.try_get("email")?,
            roles: Role::parse_list(roles.as_deref()),
        })
    }
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    // Roles joined for display, e.g. "CAPTAIN, PLAYER".
    pub fn roles_label(&self) -> String {
        self.roles.iter().map(Role::label).collect::<Vec<_>>().join(", ")
    }
}

// What a user may change about a player.
#[derive(Debug, Clone, Default)]
pub struct PlayerInput {
    pub club_id: ClubId,
    pub forename: String,
    pub surname: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl PlayerInput {
    pub fn build(club_id: ClubId, forename: &str, surname: &str, email: &str, roles: Vec<Role>) -> Self {
        Self {
            club_id,
            forename: forename.trim().to_string(),
            surname: surname.trim().to_string(),
            email: non_empty(email),
            roles: Role::normalise(roles),
        }
    }

    // Every problem with the input that can be found without the database.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.forename.is_empty() {
            errors.push("Forename is required.".to_string());
        }
        if self.surname.is_empty() {
            errors.push("Surname is required.".to_string());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
                errors.push(format!("\"{email}\" is not an email address."));
            }
        }
        errors
    }
}

// Collapse whitespace and lowercase, so names typed by hand still match.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
