//! USGS event feed parsing
//!
//! Reads a GeoJSON `FeatureCollection` as served by the FDSN event query
//! (`format=geojson`) into [`SeismicRecord`]s.

use crate::{FeedError, Result, SeismicRecord};
use chrono::{DateTime, TimeZone, Utc};
use geojson::{feature::Id, Feature, GeoJson, Value};
use tracing::{debug, info};

/// Parse a FeatureCollection document into seismic records
///
/// Features without a `[lon, lat, depth]` point or a numeric `mag` are
/// skipped.
pub fn parse_feature_collection(json: &str) -> Result<Vec<SeismicRecord>> {
    let geojson: GeoJson = serde_json::from_str(json)?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(FeedError::Geojson(
                "expected a FeatureCollection".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(collection.features.len());
    let mut skipped = 0;

    for (i, feature) in collection.features.iter().enumerate() {
        match record_from_feature(feature) {
            Some(record) => records.push(record),
            None => {
                debug!("Skipping feature {} (missing point geometry or magnitude)", i);
                skipped += 1;
            }
        }
    }

    info!(
        "Parsed {} earthquakes ({} skipped for missing fields)",
        records.len(),
        skipped
    );

    Ok(records)
}

fn record_from_feature(feature: &Feature) -> Option<SeismicRecord> {
    let coords = match &feature.geometry.as_ref()?.value {
        Value::Point(coords) if coords.len() >= 3 => coords,
        _ => return None,
    };
    let magnitude = feature.property("mag")?.as_f64()?;

    let id = feature.id.as_ref().map(|id| match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    });
    let place = feature
        .property("place")
        .and_then(|p| p.as_str())
        .map(str::to_string);
    let time = feature
        .property("time")
        .and_then(|t| t.as_i64())
        .and_then(epoch_millis_to_utc);

    Some(SeismicRecord {
        latitude: coords[1],
        longitude: coords[0],
        magnitude,
        depth: coords[2],
        id,
        place,
        time,
    })
}

fn epoch_millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
