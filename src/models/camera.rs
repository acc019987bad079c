//! Camera data model.
//!
//! A [`Camera`] is a fixed sensor that reports occupancy for one or more
//! zones. The calibration blob is opaque to this crate and kept as raw JSON.

use serde::{Deserialize, Serialize};

use super::view::LatLng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub camera_id: i64,
    pub title: String,
    /// Stream identifier (RTSP URL, file name, ...).
    pub source: String,
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub calib: serde_json::Value,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Camera {
    /// Map position of the camera itself.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}
