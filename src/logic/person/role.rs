use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// A role a player holds within their club. Declaration order is display order.
#[derive(Debug, Copy, Clone)]
#[derive(Eq, Hash, PartialEq, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[derive(sqlx::Type)]
pub enum Role {
    Manager,
    Mentor,
    Captain,
    Player,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Manager, Role::Mentor, Role::Captain, Role::Player];

    // Name as shown on screens.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Mentor => "MENTOR",
            Role::Captain => "CAPTAIN",
            Role::Player => "PLAYER",
        }
    }

    // Name of the matching checkbox in forms.
    pub fn field_name(&self) -> &'static str {
        match self {
            Role::Manager => "role_manager",
            Role::Mentor => "role_mentor",
            Role::Captain => "role_captain",
            Role::Player => "role_player",
        }
    }

    // Sort and deduplicate a set of roles. An empty set means a plain player.
    pub fn normalise(mut roles: Vec<Role>) -> Vec<Role> {
        roles.sort();
        roles.dedup();
        if roles.is_empty() {
            roles.push(Role::Player);
        }
        roles
    }

    // Parse the comma separated list produced by GROUP_CONCAT.
    pub fn parse_list(list: Option<&str>) -> Vec<Role> {
        let roles = list.unwrap_or_default()
            .split(',')
            .filter_map(|s| s.parse().ok())
            .collect();
        Self::normalise(roles)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    // Accepts both the stored names and the labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "mentor" => Ok(Role::Mentor),
            "captain" => Ok(Role::Captain),
            "player" => Ok(Role::Player),
            other => Err(format!("unknown role \"{other}\"")),
        }
    }
}
