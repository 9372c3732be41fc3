//! No-fly zone domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::LatLng;
use crate::domain::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Permanent,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoFlyZone {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub min_altitude: Option<u32>,
    pub max_altitude: Option<u32>,
    pub polygon: Vec<LatLng>,
    pub status: ZoneStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoFlyZone {
    /// Whether the zone should be drawn as a restriction at `at`.
    ///
    /// Temporary zones are in force only inside their date window; a missing
    /// bound leaves that side open.
    pub fn is_in_force(&self, at: DateTime<Utc>) -> bool {
        if self.status != ZoneStatus::Active {
            return false;
        }
        match self.kind {
            ZoneKind::Permanent => true,
            ZoneKind::Temporary => {
                self.start_date.map_or(true, |start| start <= at)
                    && self.end_date.map_or(true, |end| at <= end)
            }
        }
    }
}

impl Entity for NoFlyZone {
    const NAME: &'static str = "NoFlyZone";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
