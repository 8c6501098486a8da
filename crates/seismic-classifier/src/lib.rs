//! Seismic Event Classifier
//!
//! Maps earthquake measurements to fixed categorical labels and turns
//! USGS GeoJSON feeds into classified records.
//!
//! # Rule Table
//!
//! | Label        | Input              | Rule (first match wins)                         |
//! |--------------|--------------------|-------------------------------------------------|
//! | RiskLabel    | latitude           | `> 50` High, `< -50` Moderate, else Low         |
//! | SafetyTip    | magnitude          | `>= 7` Drop/Cover/Hold, `>= 5` Prepared, else Alert |
//! | ImpactLevel  | magnitude, depth   | `mag >= 7` Severe, `mag >= 5 && depth < 70` Moderate, else Minor |
//!
//! Every rule is a total function: NaN and infinities fall through the
//! comparisons like any other value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod classify;
pub mod export;
pub mod feed;
pub mod timeline;

pub use classify::{classify, classify_all, impact_level_for, risk_score_for, safety_tip_for};

/// Latitude above which a region is rated high risk (exclusive)
pub const HIGH_RISK_LATITUDE: f64 = 50.0;

/// Latitude below which a region is rated moderate risk (exclusive)
pub const MODERATE_RISK_LATITUDE: f64 = -50.0;

/// Magnitude at or above which an event is major
pub const MAJOR_MAGNITUDE: f64 = 7.0;

/// Magnitude at or above which an event is strong
pub const STRONG_MAGNITUDE: f64 = 5.0;

/// Depth (km) below which a strong event is rated moderate impact (exclusive)
pub const SHALLOW_DEPTH_KM: f64 = 70.0;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    Geojson(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Regional seismic risk derived from latitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 3] = [Self::HighRisk, Self::ModerateRisk, Self::LowRisk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::ModerateRisk => "Moderate Risk",
            Self::LowRisk => "Low Risk",
        }
    }
}

/// Educational safety tip derived from magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SafetyTip {
    #[serde(rename = "Drop, Cover, and Hold On")]
    DropCoverHoldOn,
    #[serde(rename = "Be Prepared")]
    BePrepared,
    #[serde(rename = "Stay Alert")]
    StayAlert,
}

impl SafetyTip {
    pub const ALL: [SafetyTip; 3] = [Self::DropCoverHoldOn, Self::BePrepared, Self::StayAlert];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropCoverHoldOn => "Drop, Cover, and Hold On",
            Self::BePrepared => "Be Prepared",
            Self::StayAlert => "Stay Alert",
        }
    }
}

/// Estimated impact derived from magnitude and depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactLevel {
    Severe,
    Moderate,
    Minor,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 3] = [Self::Severe, Self::Moderate, Self::Minor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "Severe",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SafetyTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single earthquake observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    /// Hypocenter depth in km
    pub depth: f64,

    // From the USGS feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl SeismicRecord {
    /// Create from bare measurements
    pub fn new(latitude: f64, longitude: f64, magnitude: f64, depth: f64) -> Self {
        Self {
            latitude,
            longitude,
            magnitude,
            depth,
            id: None,
            place: None,
            time: None,
        }
    }
}

/// Seismic record with all three labels attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: SeismicRecord,
    pub risk_score: RiskLabel,
    pub safety_tip: SafetyTip,
    pub impact_level: ImpactLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(RiskLabel::HighRisk.to_string(), "High Risk");
        assert_eq!(SafetyTip::DropCoverHoldOn.to_string(), "Drop, Cover, and Hold On");
        assert_eq!(ImpactLevel::Minor.to_string(), "Minor");
    }

    #[test]
    fn test_labels_serialize_as_display_strings() {
        for label in RiskLabel::ALL {
            let json = serde_json::to_value(label).unwrap();
            assert_eq!(json, serde_json::Value::String(label.as_str().to_string()));
        }
        for tip in SafetyTip::ALL {
            let json = serde_json::to_value(tip).unwrap();
            assert_eq!(json, serde_json::Value::String(tip.as_str().to_string()));
        }
        for level in ImpactLevel::ALL {
            let json = serde_json::to_value(level).unwrap();
            assert_eq!(json, serde_json::Value::String(level.as_str().to_string()));
        }
    }

    #[test]
    fn test_classified_record_flattens() {
        let classified = classify(SeismicRecord::new(60.0, 10.0, 7.2, 15.0));
        let json = serde_json::to_value(&classified).unwrap();

        assert_eq!(json["latitude"], 60.0);
        assert_eq!(json["risk_score"], "High Risk");
        assert_eq!(json["safety_tip"], "Drop, Cover, and Hold On");
        assert_eq!(json["impact_level"], "Severe");
        assert!(json.get("place").is_none());
    }
}
