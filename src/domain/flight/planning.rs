//! Flight planning
//!
//! Turns map clicks into route points and validates a new application
//! before it is submitted.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::model::{FlightApplication, FlightPoint, FlightStatus, FlightType, PointType};
use crate::domain::geo::LatLng;
use crate::domain::{DomainError, DomainResult};

/// Altitude assigned to a point placed by clicking the map, in metres.
pub const DEFAULT_WAYPOINT_ALTITUDE: f64 = 100.0;

/// Minimum route length: a take-off and a landing.
pub const MIN_ROUTE_POINTS: usize = 2;

/// Collects route points from map click events.
///
/// The first point is the take-off, the second an intermediate waypoint, and
/// every later point is typed as a landing.
#[derive(Debug, Clone, Default)]
pub struct WaypointCollector {
    points: Vec<FlightPoint>,
}

impl WaypointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_map_click(&mut self, at: LatLng) -> &FlightPoint {
        let point_type = match self.points.len() {
            0 => PointType::Takeoff,
            1 => PointType::Waypoint,
            _ => PointType::Landing,
        };
        self.points.push(FlightPoint {
            id: Uuid::new_v4().to_string(),
            latitude: at.latitude,
            longitude: at.longitude,
            altitude: DEFAULT_WAYPOINT_ALTITUDE,
            speed: None,
            arrival_time: None,
            departure_time: None,
            point_type,
        });
        &self.points[self.points.len() - 1]
    }

    /// Drop a point by id. Types of the remaining points are kept as they were.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.points.len();
        self.points.retain(|p| p.id != id);
        self.points.len() != before
    }

    pub fn points(&self) -> &[FlightPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<FlightPoint> {
        self.points
    }
}

/// A flight application as entered in the creation form.
#[derive(Debug, Clone, Validate)]
pub struct FlightDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "drone is required"))]
    pub drone_id: String,
    pub flight_type: FlightType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub points: Vec<FlightPoint>,
}

impl FlightDraft {
    /// Validate the draft and turn it into a pending application filed by
    /// `pilot_id`.
    pub fn submit(self, pilot_id: &str) -> DomainResult<FlightApplication> {
        if self.validate().is_err() {
            return Err(DomainError::Validation(
                "Please fill in all required fields".into(),
            ));
        }
        let (Some(start_time), Some(end_time)) = (self.start_time, self.end_time) else {
            return Err(DomainError::Validation(
                "Please fill in all required fields".into(),
            ));
        };
        if end_time <= start_time {
            return Err(DomainError::Validation(
                "The flight must end after it starts".into(),
            ));
        }
        if self.points.len() < MIN_ROUTE_POINTS {
            return Err(DomainError::Validation(
                "At least a take-off and a landing point are required".into(),
            ));
        }

        let now = Utc::now();
        Ok(FlightApplication {
            id: String::new(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            pilot_id: pilot_id.to_string(),
            drone_id: self.drone_id,
            status: FlightStatus::Pending,
            flight_type: self.flight_type,
            start_time,
            end_time,
            points: self.points,
            rejection_reason: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        })
    }
}
