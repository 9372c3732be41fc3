//! Pilot domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PilotStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pilot {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: DateTime<Utc>,
    /// Years of flying experience
    pub experience: u32,
    pub status: PilotStatus,
    pub drone_ids: Vec<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pilot {
    pub fn is_license_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.license_expiry > at
    }
}

impl Entity for Pilot {
    const NAME: &'static str = "Pilot";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
