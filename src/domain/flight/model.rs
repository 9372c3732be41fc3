//! Flight application domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 5] = [
        FlightStatus::Pending,
        FlightStatus::Approved,
        FlightStatus::Rejected,
        FlightStatus::Cancelled,
        FlightStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FlightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("Unknown flight status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightType {
    Commercial,
    Recreational,
    Research,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Takeoff,
    Waypoint,
    Landing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above ground
    pub altitude: f64,
    pub speed: Option<f64>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    pub point_type: PointType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightApplication {
    pub id: String,
    pub title: String,
    pub description: String,
    pub pilot_id: String,
    pub drone_id: String,
    pub status: FlightStatus,
    pub flight_type: FlightType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub points: Vec<FlightPoint>,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlightApplication {
    /// Pending → Approved
    pub fn approve(&mut self, approver_id: &str) -> DomainResult<()> {
        self.transition(FlightStatus::Approved, &[FlightStatus::Pending])?;
        self.approved_by = Some(approver_id.to_string());
        Ok(())
    }

    /// Pending → Rejected; a reason is mandatory.
    pub fn reject(&mut self, reason: &str) -> DomainResult<()> {
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("A rejection reason is required".into()));
        }
        self.transition(FlightStatus::Rejected, &[FlightStatus::Pending])?;
        self.rejection_reason = Some(reason.trim().to_string());
        Ok(())
    }

    /// Pending or Approved → Cancelled
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(
            FlightStatus::Cancelled,
            &[FlightStatus::Pending, FlightStatus::Approved],
        )
    }

    /// Approved → Completed
    pub fn complete(&mut self) -> DomainResult<()> {
        self.transition(FlightStatus::Completed, &[FlightStatus::Approved])
    }

    fn transition(&mut self, to: FlightStatus, allowed_from: &[FlightStatus]) -> DomainResult<()> {
        if !allowed_from.contains(&self.status) {
            return Err(DomainError::Validation(format!(
                "Flight application {} cannot move from {} to {}",
                self.id, self.status, to
            )));
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for FlightApplication {
    const NAME: &'static str = "FlightApplication";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// List filter used by the flight applications view
#[derive(Debug, Clone, Default)]
pub struct FlightFilter {
    /// Case-insensitive match against title or description
    pub search: Option<String>,
    pub status: Option<FlightStatus>,
    pub flight_type: Option<FlightType>,
}

impl FlightFilter {
    pub fn matches(&self, flight: &FlightApplication) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                flight.title.to_lowercase().contains(&query)
                    || flight.description.to_lowercase().contains(&query)
            }
        };
        matches_search
            && self.status.map_or(true, |s| s == flight.status)
            && self.flight_type.map_or(true, |t| t == flight.flight_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> FlightApplication {
        let now = Utc::now();
        FlightApplication {
            id: "1".into(),
            title: "Field mapping".into(),
            description: "Mapping of farmland".into(),
            pilot_id: "1".into(),
            drone_id: "1".into(),
            status: FlightStatus::Pending,
            flight_type: FlightType::Commercial,
            start_time: now,
            end_time: now,
            points: Vec::new(),
            rejection_reason: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_approve_then_complete() {
        let mut flight = pending();
        flight.approve("7").unwrap();
        assert_eq!(flight.status, FlightStatus::Approved);
        assert_eq!(flight.approved_by.as_deref(), Some("7"));

        flight.complete().unwrap();
        assert_eq!(flight.status, FlightStatus::Completed);
        assert!(flight.cancel().is_err());
    }

    #[test]
    fn test_reject_requires_reason_and_pending() {
        let mut flight = pending();
        assert!(matches!(flight.reject("  "), Err(DomainError::Validation(_))));
        assert_eq!(flight.status, FlightStatus::Pending);

        flight.reject("Inside a no-fly zone").unwrap();
        assert_eq!(flight.rejection_reason.as_deref(), Some("Inside a no-fly zone"));
        assert!(flight.approve("7").is_err());
    }

    #[test]
    fn test_filter_by_search_status_and_type() {
        let flight = pending();
        let filter = FlightFilter {
            search: Some("FARMLAND".into()),
            status: Some(FlightStatus::Pending),
            flight_type: Some(FlightType::Commercial),
        };
        assert!(filter.matches(&flight));

        let filter = FlightFilter {
            flight_type: Some(FlightType::Emergency),
            ..Default::default()
        };
        assert!(!filter.matches(&flight));
    }
}
