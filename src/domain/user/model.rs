use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User role
///
/// A closed set: parsing any other string fails rather than falling back
/// to a default role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Controller,
    Dispatcher,
    Operator,
    Pilot,
    Observer,
    Support,
}

impl UserRole {
    pub const ALL: [UserRole; 7] = [
        UserRole::Admin,
        UserRole::Controller,
        UserRole::Dispatcher,
        UserRole::Operator,
        UserRole::Pilot,
        UserRole::Observer,
        UserRole::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Controller => "controller",
            UserRole::Dispatcher => "dispatcher",
            UserRole::Operator => "operator",
            UserRole::Pilot => "pilot",
            UserRole::Observer => "observer",
            UserRole::Support => "support",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Authenticated identity, as mirrored into the identity slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
