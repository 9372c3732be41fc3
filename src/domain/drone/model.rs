//! Drone domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::Position;
use crate::domain::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DroneStatus {
    Active,
    Inactive,
    Maintenance,
    InFlight,
}

impl DroneStatus {
    pub const ALL: [DroneStatus; 4] = [
        DroneStatus::Active,
        DroneStatus::Inactive,
        DroneStatus::Maintenance,
        DroneStatus::InFlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
            Self::InFlight => "in-flight",
        }
    }
}

impl std::fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DroneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("Unknown drone status: {}", s))
    }
}

/// Registered aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub id: String,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    /// Take-off weight in grams
    pub weight: u32,
    /// km/h
    pub max_speed: u32,
    /// Minutes
    pub max_flight_time: u32,
    /// Metres
    pub max_altitude: u32,
    pub battery_level: Option<u8>,
    pub status: DroneStatus,
    pub location: Option<Position>,
    pub pilot_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Drone {
    const NAME: &'static str = "Drone";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// List filter used by the drones view
#[derive(Debug, Clone, Default)]
pub struct DroneFilter {
    /// Case-insensitive match against name, model or serial number
    pub search: Option<String>,
    pub status: Option<DroneStatus>,
}

impl DroneFilter {
    pub fn matches(&self, drone: &Drone) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                [&drone.name, &drone.model, &drone.serial_number]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            }
        };
        let matches_status = self.status.map_or(true, |s| s == drone.status);
        matches_search && matches_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(name: &str, model: &str, serial: &str, status: DroneStatus) -> Drone {
        Drone {
            id: "1".into(),
            name: name.into(),
            model: model.into(),
            serial_number: serial.into(),
            weight: 895,
            max_speed: 68,
            max_flight_time: 46,
            max_altitude: 6000,
            battery_level: Some(78),
            status,
            location: None,
            pilot_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_search_matches_name_model_or_serial() {
        let d = drone("DJI Mavic 3", "Mavic 3", "MAV3872341", DroneStatus::Active);
        for query in ["mavic", "MAV387", "dji", "  3 "] {
            let filter = DroneFilter { search: Some(query.into()), status: None };
            assert!(filter.matches(&d), "query {:?}", query);
        }
        let filter = DroneFilter { search: Some("skydio".into()), status: None };
        assert!(!filter.matches(&d));
    }

    #[test]
    fn test_status_filter() {
        let d = drone("Autel EVO II", "EVO II", "EVO2892374", DroneStatus::Maintenance);
        let filter = DroneFilter { search: None, status: Some(DroneStatus::Active) };
        assert!(!filter.matches(&d));
        let filter = DroneFilter { search: Some("".into()), status: Some(DroneStatus::Maintenance) };
        assert!(filter.matches(&d));
    }

    #[test]
    fn test_in_flight_serializes_kebab_case() {
        assert_eq!(serde_json::to_value(DroneStatus::InFlight).unwrap(), "in-flight");
    }

    #[test]
    fn test_status_text_matches_wire_format() {
        for status in DroneStatus::ALL {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status));
            assert_eq!(status.as_str().parse::<DroneStatus>().unwrap(), status);
        }
        assert!("flying".parse::<DroneStatus>().is_err());
    }
}
