use serde::{Deserialize, Deserializer, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Severity reported by the backend for an alert.
///
/// Parsing is case-insensitive and total: anything that is not one of the
/// three elevated levels is treated as `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Severe,
    High,
    Moderate,
    #[default]
    Low,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "severe" => RiskLevel::Severe,
            "high" => RiskLevel::High,
            "moderate" => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Severe => "severe",
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard categories that have guideline content and a tab in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HazardCategory {
    #[default]
    Flood,
    Earthquake,
    Cyclone,
    HeavyRain,
}

impl HazardCategory {
    /// Tab order.
    pub const ALL: [HazardCategory; 4] = [
        HazardCategory::Flood,
        HazardCategory::Earthquake,
        HazardCategory::Cyclone,
        HazardCategory::HeavyRain,
    ];

    /// Match a slug or a tab label, ignoring case and separators,
    /// so "Heavy Rain", "heavy-rain" and "HEAVYRAIN" are all `HeavyRain`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
    }

    /// Path segment used by the guidelines endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            HazardCategory::Flood => "flood",
            HazardCategory::Earthquake => "earthquake",
            HazardCategory::Cyclone => "cyclone",
            HazardCategory::HeavyRain => "heavyrain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HazardCategory::Flood => "Flood",
            HazardCategory::Earthquake => "Earthquake",
            HazardCategory::Cyclone => "Cyclone",
            HazardCategory::HeavyRain => "Heavy Rain",
        }
    }
}

impl std::fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub name: String,
    /// Pre-formatted by the server (e.g. "2.5 km"), displayed as-is.
    pub distance: String,
    pub lat: f64,
    pub lon: f64,
}

impl SafeZone {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub hazard_type: String,
    pub risk_level: String,
    pub description: String,
    #[serde(default)]
    pub safe_zones: Vec<SafeZone>,
}

impl Alert {
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::parse(&self.risk_level)
    }

    pub fn category(&self) -> Option<HazardCategory> {
        HazardCategory::parse(&self.hazard_type)
    }
}

/// Body of `GET /check-safety/{lat}/{lon}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alerts: Vec<Alert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_instructions: Option<String>,
}

impl SafetyReport {
    pub fn total_safe_zones(&self) -> usize {
        self.alerts.iter().map(|a| a.safe_zones.len()).sum()
    }
}

/// Body of `GET /safety-guidelines/{category}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidelineSet {
    #[serde(default)]
    pub immediate: Vec<String>,
    #[serde(default)]
    pub preparation: Vec<String>,
}

/// Error body returned by the server for unknown resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Alert>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Alert>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_is_case_insensitive() {
        assert_eq!(RiskLevel::parse("SEVERE"), RiskLevel::Severe);
        assert_eq!(RiskLevel::parse("High"), RiskLevel::High);
        assert_eq!(RiskLevel::parse(" moderate "), RiskLevel::Moderate);
    }

    #[test]
    fn test_risk_level_unknown_defaults_to_low() {
        for raw in ["", "low", "extreme", "minor", "sévère", "42"] {
            assert_eq!(RiskLevel::parse(raw), RiskLevel::Low, "input {raw:?}");
        }
    }

    #[test]
    fn test_hazard_category_parse_accepts_labels_and_slugs() {
        assert_eq!(HazardCategory::parse("flood"), Some(HazardCategory::Flood));
        assert_eq!(HazardCategory::parse("FLOOD"), Some(HazardCategory::Flood));
        assert_eq!(
            HazardCategory::parse("Heavy Rain"),
            Some(HazardCategory::HeavyRain)
        );
        assert_eq!(
            HazardCategory::parse("heavyrain"),
            Some(HazardCategory::HeavyRain)
        );
        assert_eq!(HazardCategory::parse("tsunami"), None);
    }

    #[test]
    fn test_hazard_category_label_round_trips_through_parse() {
        for category in HazardCategory::ALL {
            assert_eq!(HazardCategory::parse(category.label()), Some(category));
        }
    }

    #[test]
    fn test_safety_report_deserializes() {
        let json = r#"{"alerts":[{"type":"flood","risk_level":"severe","description":"Rising water","safe_zones":[{"name":"Highland Community Center","distance":"2.5 km","lat":13.07,"lon":77.69},{"name":"City Emergency Shelter","distance":"3.1 km","lat":13.17,"lon":77.49}]}],"emergency_instructions":"IMMEDIATE EVACUATION REQUIRED"}"#;
        let report: SafetyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.alerts.len(), 1);
        let alert = &report.alerts[0];
        assert_eq!(alert.hazard_type, "flood");
        assert_eq!(alert.risk(), RiskLevel::Severe);
        assert_eq!(alert.category(), Some(HazardCategory::Flood));
        assert_eq!(alert.safe_zones[1].name, "City Emergency Shelter");
        assert_eq!(alert.safe_zones[1].distance, "3.1 km");
        assert_eq!(report.total_safe_zones(), 2);
        assert_eq!(
            report.emergency_instructions.as_deref(),
            Some("IMMEDIATE EVACUATION REQUIRED")
        );
    }

    #[test]
    fn test_safety_report_missing_alerts_is_empty() {
        let report: SafetyReport = serde_json::from_str("{}").unwrap();
        assert!(report.alerts.is_empty());
        assert!(report.emergency_instructions.is_none());
    }

    #[test]
    fn test_safety_report_null_alerts_is_empty() {
        let report: SafetyReport = serde_json::from_str(r#"{"alerts":null}"#).unwrap();
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_alert_without_safe_zones_deserializes() {
        let json = r#"{"type":"cyclone","risk_level":"high","description":"Landfall in 6h"}"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert!(alert.safe_zones.is_empty());
    }

    #[test]
    fn test_alert_serializes_type_field() {
        let alert = Alert {
            hazard_type: "heavyrain".to_string(),
            risk_level: "moderate".to_string(),
            description: "Torrential rainfall".to_string(),
            safe_zones: vec![],
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "heavyrain");
        assert!(json.get("hazard_type").is_none());
    }

    #[test]
    fn test_guideline_set_deserializes_in_order() {
        let json = r#"{"immediate":["Drop, cover, hold"],"preparation":["Secure furniture"]}"#;
        let set: GuidelineSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.immediate, vec!["Drop, cover, hold"]);
        assert_eq!(set.preparation, vec!["Secure furniture"]);
    }

    #[test]
    fn test_report_without_instructions_omits_field() {
        let json = serde_json::to_value(SafetyReport::default()).unwrap();
        assert!(json.get("emergency_instructions").is_none());
        assert_eq!(json["alerts"].as_array().unwrap().len(), 0);
    }
}
