//! Parking zone data model.
//!
//! [`Zone`] mirrors one element of the `GET /zones` response. Field names stay
//! snake_case because that is what the ParkTrack API emits and accepts.
//!
//! Zones are replaced wholesale on every fetch; nothing in the crate edits a
//! zone in place.

use serde::{Deserialize, Serialize};

/// One corner of a zone quadrilateral.
///
/// `latitude`/`longitude` place the corner on the map; `x`/`y` are the same
/// corner in the originating camera's image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    /// Map-only point with zero image coordinates.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// How a zone is laid out along the street.
///
/// Serialized as the bare API string. Anything other than `"parallel"` is
/// drawn as a filled polygon; unknown strings are preserved so they survive
/// a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneType {
    /// Roadside parking, drawn as a line along the zone's long axis.
    Parallel,
    Standard,
    Other(String),
}

impl ZoneType {
    pub fn as_str(&self) -> &str {
        match self {
            ZoneType::Parallel => "parallel",
            ZoneType::Standard => "standard",
            ZoneType::Other(s) => s,
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, ZoneType::Parallel)
    }
}

impl From<String> for ZoneType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "parallel" => ZoneType::Parallel,
            "standard" => ZoneType::Standard,
            _ => ZoneType::Other(s),
        }
    }
}

impl From<ZoneType> for String {
    fn from(t: ZoneType) -> Self {
        match t {
            ZoneType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A parking area reported by one camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique among the currently fetched zones.
    pub zone_id: i64,
    /// Quadrilateral corners in map order. Only four finite points render.
    pub points: Vec<Point>,
    pub zone_type: ZoneType,
    /// Total spot count.
    pub capacity: u32,
    /// Spots currently occupied; `None` when occupancy is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<u32>,
    /// Tariff indicator: `0` is free, anything above is a price unit.
    pub pay: i64,
    /// Detection confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<i64>,
}

impl Zone {
    /// `capacity - occupied`, or `None` when occupancy is unknown.
    ///
    /// Not clamped: a camera that over-counts yields a negative value here.
    pub fn free_spots(&self) -> Option<i64> {
        self.occupied
            .map(|occupied| i64::from(self.capacity) - i64::from(occupied))
    }

    /// `true` when the zone has exactly four finite corners.
    pub fn has_valid_geometry(&self) -> bool {
        self.points.len() == 4 && self.points.iter().all(Point::is_finite)
    }

    /// Field-level checks applied at the API boundary.
    ///
    /// Geometry is deliberately not checked here; the render layer skips
    /// malformed quadrilaterals on its own.
    pub fn check_record(&self) -> Result<(), String> {
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(format!(
                    "zone {}: confidence {confidence} outside [0, 1]",
                    self.zone_id
                ));
            }
        }
        Ok(())
    }
}
