//! Schema validation of list payloads.
//!
//! List endpoints are decoded record by record: a malformed element is logged
//! and dropped instead of failing the whole list. A payload that is not a
//! JSON array at all is a [`ApiError::Decode`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;
use crate::models::{Camera, Zone};

/// Decode every element of `payload` as `T`, dropping those that fail.
pub fn decode_list<T: DeserializeOwned>(payload: Value, what: &str) -> Result<Vec<T>, ApiError> {
    let Value::Array(items) = payload else {
        return Err(ApiError::Decode(format!("expected a JSON array of {what}")));
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping malformed {what} record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        tracing::warn!(kept = decoded.len(), total, "{what} payload had malformed records");
    }
    Ok(decoded)
}

/// Decode a zone list and apply [`Zone::check_record`] to each element.
///
/// Zones with unusable geometry are kept (the render layer skips them) but
/// flagged in the log.
pub fn decode_zones(payload: Value) -> Result<Vec<Zone>, ApiError> {
    let zones = decode_list::<Zone>(payload, "zone")?
        .into_iter()
        .filter(|zone| match zone.check_record() {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(%reason, "dropping zone record");
                false
            }
        })
        .inspect(|zone| {
            if !zone.has_valid_geometry() {
                tracing::warn!(
                    zone_id = zone.zone_id,
                    points = zone.points.len(),
                    "zone has unusable geometry; it will not be drawn"
                );
            }
        })
        .collect();
    Ok(zones)
}

pub fn decode_cameras(payload: Value) -> Result<Vec<Camera>, ApiError> {
    decode_list(payload, "camera")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zone_json(zone_id: i64) -> Value {
        json!({
            "zone_id": zone_id,
            "points": [
                { "latitude": 59.9, "longitude": 30.3, "x": 0, "y": 0 },
                { "latitude": 59.9, "longitude": 30.4, "x": 0, "y": 0 },
                { "latitude": 60.0, "longitude": 30.4, "x": 0, "y": 0 },
                { "latitude": 60.0, "longitude": 30.3, "x": 0, "y": 0 }
            ],
            "zone_type": "standard",
            "capacity": 10,
            "occupied": 3,
            "pay": 0
        })
    }

    #[test]
    fn well_formed_list_decodes_fully() {
        let zones = decode_zones(json!([zone_json(1), zone_json(2)])).expect("decode");
        assert_eq!(zones.len(), 2);
    }

    #[test]
    fn malformed_records_are_dropped() {
        let payload = json!([
            zone_json(1),
            { "zone_id": "not a number" },
            zone_json(3),
        ]);
        let zones = decode_zones(payload).expect("decode");
        let ids: Vec<i64> = zones.iter().map(|z| z.zone_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn out_of_range_confidence_is_dropped() {
        let mut bad = zone_json(2);
        bad["confidence"] = json!(3.5);
        let zones = decode_zones(json!([zone_json(1), bad])).expect("decode");
        assert_eq!(zones.len(), 1);
    }

    #[test]
    fn bad_geometry_is_kept_for_render_to_skip() {
        let mut triangle = zone_json(5);
        triangle["points"].as_array_mut().expect("points").pop();
        let zones = decode_zones(json!([triangle])).expect("decode");
        assert_eq!(zones.len(), 1);
        assert!(!zones[0].has_valid_geometry());
    }

    #[test]
    fn non_array_payload_is_decode_error() {
        let err = decode_zones(json!({ "zones": [] })).expect_err("object is not a list");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn cameras_decode_through_same_path() {
        let payload = json!([{
            "camera_id": 1,
            "title": "Сенная",
            "source": "cam1",
            "image_width": 1280,
            "image_height": 720,
            "calib": null,
            "latitude": 59.9275,
            "longitude": 30.32
        }, { "camera_id": 2 }]);
        let cameras = decode_cameras(payload).expect("decode");
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].title, "Сенная");
    }
}
