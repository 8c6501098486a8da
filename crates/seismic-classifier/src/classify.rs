//! Threshold classification rules
//!
//! Each rule is an ordered chain of guards; the first guard that holds
//! picks the label. Comparisons are strict for latitude and inclusive for
//! magnitude.

use crate::{
    ClassifiedRecord, ImpactLevel, RiskLabel, SafetyTip, SeismicRecord, HIGH_RISK_LATITUDE,
    MAJOR_MAGNITUDE, MODERATE_RISK_LATITUDE, SHALLOW_DEPTH_KM, STRONG_MAGNITUDE,
};

/// Regional risk category from latitude
pub fn risk_score_for(latitude: f64) -> RiskLabel {
    if latitude > HIGH_RISK_LATITUDE {
        RiskLabel::HighRisk
    } else if latitude < MODERATE_RISK_LATITUDE {
        RiskLabel::ModerateRisk
    } else {
        RiskLabel::LowRisk
    }
}

/// Safety tip from magnitude
pub fn safety_tip_for(magnitude: f64) -> SafetyTip {
    if magnitude >= MAJOR_MAGNITUDE {
        SafetyTip::DropCoverHoldOn
    } else if magnitude >= STRONG_MAGNITUDE {
        SafetyTip::BePrepared
    } else {
        SafetyTip::StayAlert
    }
}

/// Impact level from magnitude and depth (km)
///
/// A strong event at depth >= 70 km is `Minor`, not `Moderate`.
pub fn impact_level_for(magnitude: f64, depth: f64) -> ImpactLevel {
    if magnitude >= MAJOR_MAGNITUDE {
        ImpactLevel::Severe
    } else if magnitude >= STRONG_MAGNITUDE && depth < SHALLOW_DEPTH_KM {
        ImpactLevel::Moderate
    } else {
        ImpactLevel::Minor
    }
}

/// Attach all three labels to a record
pub fn classify(record: SeismicRecord) -> ClassifiedRecord {
    ClassifiedRecord {
        risk_score: risk_score_for(record.latitude),
        safety_tip: safety_tip_for(record.magnitude),
        impact_level: impact_level_for(record.magnitude, record.depth),
        record,
    }
}

/// Classify every record, preserving order
pub fn classify_all(records: impl IntoIterator<Item = SeismicRecord>) -> Vec<ClassifiedRecord> {
    records.into_iter().map(classify).collect()
}
