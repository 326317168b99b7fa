//! Demo alert feed.
//!
//! Real hazard detection lives in an upstream service; this feed reports the
//! same three active hazards around any position so the client can be
//! exercised end to end.

use safety_shared::models::{Alert, Coordinate, SafeZone, SafetyReport};

const EVACUATION_NOTICE: &str = "IMMEDIATE EVACUATION REQUIRED";

fn zone(origin: Coordinate, d_lat: f64, d_lon: f64, name: &str, distance: &str) -> SafeZone {
    SafeZone {
        name: name.to_string(),
        distance: distance.to_string(),
        lat: origin.latitude + d_lat,
        lon: origin.longitude + d_lon,
    }
}

/// Active alerts around `origin`.
pub fn report_for(origin: Coordinate) -> SafetyReport {
    let alerts = vec![
        Alert {
            hazard_type: "flood".to_string(),
            risk_level: "severe".to_string(),
            description: "Severe flooding expected. Water levels rising rapidly.".to_string(),
            safe_zones: vec![
                zone(origin, 0.1, 0.1, "Highland Community Center", "2.5 km"),
                zone(origin, 0.2, -0.1, "City Emergency Shelter", "3.1 km"),
            ],
        },
        Alert {
            hazard_type: "cyclone".to_string(),
            risk_level: "high".to_string(),
            description: "Category 3 cyclone approaching. Expected landfall in 6 hours."
                .to_string(),
            safe_zones: vec![
                zone(origin, -0.1, 0.15, "Underground Storm Shelter", "1.8 km"),
                zone(origin, -0.15, -0.1, "Reinforced School Building", "2.7 km"),
            ],
        },
        Alert {
            hazard_type: "heavyrain".to_string(),
            risk_level: "moderate".to_string(),
            description: "Torrential rainfall continuing for next 24 hours.".to_string(),
            safe_zones: vec![zone(origin, 0.05, 0.05, "Municipal Safe House", "1.2 km")],
        },
    ];

    SafetyReport {
        alerts,
        emergency_instructions: Some(EVACUATION_NOTICE.to_string()),
    }
}

/// Whether `coord` is a valid WGS84 position.
pub fn is_valid(coord: Coordinate) -> bool {
    coord.latitude.is_finite()
        && coord.longitude.is_finite()
        && (-90.0..=90.0).contains(&coord.latitude)
        && (-180.0..=180.0).contains(&coord.longitude)
}
