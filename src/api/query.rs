//! Query parameters for the list endpoints.
//!
//! Absent fields are left out of the query string entirely.

use serde::{Deserialize, Serialize};

use crate::models::LatLng;

/// Filters for `GET /zones`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneQuery {
    pub camera_id: Option<i64>,
    pub min_free_count: Option<u32>,
    pub max_pay: Option<i64>,
}

impl ZoneQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.camera_id {
            pairs.push(("camera_id", id.to_string()));
        }
        if let Some(n) = self.min_free_count {
            pairs.push(("min_free_count", n.to_string()));
        }
        if let Some(pay) = self.max_pay {
            pairs.push(("max_pay", pay.to_string()));
        }
        pairs
    }
}

/// Rectangular map area, given by its north-west and south-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: LatLng,
    pub bottom_right: LatLng,
}

/// Filters for `GET /cameras`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraQuery {
    /// Free-text search over camera titles.
    pub q: Option<String>,
    pub bounds: Option<BoundingBox>,
}

impl CameraQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(b) = self.bounds {
            pairs.push(("top_left_corner_latitude", b.top_left.lat.to_string()));
            pairs.push(("top_left_corner_longitude", b.top_left.lng.to_string()));
            pairs.push(("bottom_right_corner_latitude", b.bottom_right.lat.to_string()));
            pairs.push(("bottom_right_corner_longitude", b.bottom_right.lng.to_string()));
        }
        pairs
    }
}
