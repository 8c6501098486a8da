//! GeoJSON export of classified records

use crate::ClassifiedRecord;

/// Export classified records as a GeoJSON FeatureCollection
pub fn to_geojson(records: &[ClassifiedRecord]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = records
        .iter()
        .map(|c| {
            let mut feature = serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [c.record.longitude, c.record.latitude, c.record.depth]
                },
                "properties": {
                    "place": c.record.place,
                    "time": c.record.time.map(|t| t.to_rfc3339()),
                    "magnitude": c.record.magnitude,
                    "depth": c.record.depth,
                    "risk_score": c.risk_score,
                    "safety_tip": c.safety_tip,
                    "impact_level": c.impact_level
                }
            });
            if let Some(id) = &c.record.id {
                feature["id"] = serde_json::Value::String(id.clone());
            }
            feature
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
        "metadata": {
            "count": records.len(),
            "generated_at": chrono::Utc::now().to_rfc3339()
        }
    })
}
