//! Fixed demonstration data for the mock provider

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    Drone, DroneStatus, FlightApplication, FlightStatus, FlightType, LatLng, NoFlyZone, Pilot,
    PilotStatus, ZoneKind, ZoneStatus,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    at(y, m, d, 0, 0)
}

#[allow(clippy::too_many_arguments)]
fn drone(
    id: &str,
    name: &str,
    model: &str,
    serial: &str,
    weight: u32,
    max_speed: u32,
    max_flight_time: u32,
    max_altitude: u32,
    battery: u8,
    status: DroneStatus,
    created: DateTime<Utc>,
) -> Drone {
    Drone {
        id: id.into(),
        name: name.into(),
        model: model.into(),
        serial_number: serial.into(),
        weight,
        max_speed,
        max_flight_time,
        max_altitude,
        battery_level: Some(battery),
        status,
        location: None,
        pilot_id: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn drones() -> Vec<Drone> {
    vec![
        drone("1", "DJI Mavic 3", "Mavic 3", "MAV3872341", 895, 68, 46, 6000, 78, DroneStatus::Active, date(2024, 2, 15)),
        drone("2", "DJI Air 2S", "Air 2S", "AIR2S52234", 595, 68, 31, 5000, 45, DroneStatus::Active, date(2024, 3, 20)),
        drone("3", "DJI Mini 3 Pro", "Mini 3 Pro", "MINI3P76513", 249, 57, 34, 4000, 92, DroneStatus::Inactive, date(2024, 4, 5)),
        drone("4", "Autel EVO II", "EVO II", "EVO2892374", 1127, 72, 40, 7000, 30, DroneStatus::Maintenance, date(2023, 12, 10)),
        drone("5", "Skydio 2+", "Skydio 2+", "SKY2P45213", 800, 58, 27, 4500, 82, DroneStatus::Active, date(2024, 5, 12)),
    ]
}

pub fn pilots() -> Vec<Pilot> {
    let pilot = |id: &str, name: &str, email: &str, license: &str, experience: u32, drones: &[&str]| Pilot {
        id: id.into(),
        full_name: name.into(),
        email: email.into(),
        phone: "+7 700 000 00 00".into(),
        license_number: license.into(),
        license_expiry: date(2026, 12, 31),
        experience,
        status: PilotStatus::Active,
        drone_ids: drones.iter().map(|d| d.to_string()).collect(),
        avatar: None,
        created_at: date(2024, 1, 10),
        updated_at: date(2024, 1, 10),
    };
    vec![
        pilot("1", "Aidar Nurlanov", "aidar@example.com", "KZ-UAS-0001", 5, &["1", "3"]),
        pilot("2", "Elena Smirnova", "elena@example.com", "KZ-UAS-0002", 3, &["2"]),
        pilot("3", "Marat Seitkali", "marat@example.com", "KZ-UAS-0003", 8, &["1", "4"]),
    ]
}

pub fn flights() -> Vec<FlightApplication> {
    #[allow(clippy::too_many_arguments)]
    let flight = |id: &str,
                  title: &str,
                  description: &str,
                  pilot: &str,
                  drone: &str,
                  status: FlightStatus,
                  kind: FlightType,
                  start: DateTime<Utc>,
                  end: DateTime<Utc>,
                  created: DateTime<Utc>| FlightApplication {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        pilot_id: pilot.into(),
        drone_id: drone.into(),
        status,
        flight_type: kind,
        start_time: start,
        end_time: end,
        points: Vec::new(),
        rejection_reason: None,
        approved_by: None,
        created_at: created,
        updated_at: created,
    };

    let mut rejected = flight(
        "3", "Event filming", "Aerial video of the city festival", "1", "3",
        FlightStatus::Rejected, FlightType::Commercial,
        at(2025, 6, 20, 12, 0), at(2025, 6, 20, 15, 0), date(2025, 6, 8),
    );
    rejected.rejection_reason = Some("Flight inside a no-fly zone".into());

    vec![
        flight(
            "1", "Territory mapping", "Mapping of agricultural land", "1", "1",
            FlightStatus::Pending, FlightType::Commercial,
            at(2025, 6, 15, 9, 0), at(2025, 6, 15, 11, 0), date(2025, 6, 10),
        ),
        flight(
            "2", "Medicine delivery", "Urgent delivery of medicine to a remote district", "2", "2",
            FlightStatus::Approved, FlightType::Emergency,
            at(2025, 6, 14, 10, 0), at(2025, 6, 14, 11, 30), date(2025, 6, 9),
        ),
        rejected,
        flight(
            "4", "Power line inspection", "Scheduled inspection of power lines in the northern district", "3", "1",
            FlightStatus::Completed, FlightType::Commercial,
            at(2025, 6, 8, 9, 0), at(2025, 6, 8, 12, 0), date(2025, 6, 1),
        ),
    ]
}

/// Square polygon of roughly `half_side_deg` around a centre.
fn square(center: LatLng, half_side_deg: f64) -> Vec<LatLng> {
    vec![
        LatLng::new(center.latitude - half_side_deg, center.longitude - half_side_deg),
        LatLng::new(center.latitude - half_side_deg, center.longitude + half_side_deg),
        LatLng::new(center.latitude + half_side_deg, center.longitude + half_side_deg),
        LatLng::new(center.latitude + half_side_deg, center.longitude - half_side_deg),
    ]
}

pub fn zones() -> Vec<NoFlyZone> {
    let zone = |id: &str, name: &str, description: &str, polygon: Vec<LatLng>| NoFlyZone {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind: ZoneKind::Permanent,
        start_date: None,
        end_date: None,
        min_altitude: None,
        max_altitude: None,
        polygon,
        status: ZoneStatus::Active,
        created_by: "1".into(),
        created_at: date(2024, 1, 1),
        updated_at: date(2024, 1, 1),
    };
    vec![
        zone("1", "Astana Airport", "Controlled airspace around the airport", square(LatLng::new(51.0222, 71.4669), 0.045)),
        zone("2", "Akorda", "Presidential residence", square(LatLng::new(51.1282, 71.4309), 0.009)),
    ]
}
