//! Zone colouring.
//!
//! [`classify`] is the single rule used for every visual element of a zone:
//! polygon fill, centerline stroke and marker colour all come from it.
//! [`FreeSpotLevel`] only tones the free-spot line inside a popup.

use serde::Serialize;

use crate::models::{Zone, ZoneType};

/// Occupancy rate at or above which a zone is drawn as full.
pub const FULL_RATE: f64 = 0.9;
/// Occupancy rate at or above which a zone is drawn as nearly full.
pub const WARNING_RATE: f64 = 0.7;

/// Visual state of a zone on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    Ok,
    Warning,
    Full,
    /// Roadside zones are coloured by type, not load.
    Roadside,
}

impl ZoneStatus {
    /// Hex colour used for fill, stroke and marker.
    pub fn color(self) -> &'static str {
        match self {
            ZoneStatus::Ok => "#22c55e",
            ZoneStatus::Warning => "#f59e0b",
            ZoneStatus::Full => "#ef4444",
            ZoneStatus::Roadside => "#3b82f6",
        }
    }
}

/// Occupied / capacity, with an empty zone counting as zero load.
pub fn occupancy_rate(occupied: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    f64::from(occupied) / f64::from(capacity)
}

/// Classify a zone from its type and occupancy.
///
/// Unknown occupancy is treated optimistically as [`ZoneStatus::Ok`].
pub fn classify(zone_type: &ZoneType, occupied: Option<u32>, capacity: u32) -> ZoneStatus {
    if zone_type.is_parallel() {
        return ZoneStatus::Roadside;
    }
    let Some(occupied) = occupied else {
        return ZoneStatus::Ok;
    };
    let rate = occupancy_rate(occupied, capacity);
    if rate >= FULL_RATE {
        ZoneStatus::Full
    } else if rate >= WARNING_RATE {
        ZoneStatus::Warning
    } else {
        ZoneStatus::Ok
    }
}

pub fn classify_zone(zone: &Zone) -> ZoneStatus {
    classify(&zone.zone_type, zone.occupied, zone.capacity)
}

/// Free-spot tone shown next to the free-spot count in a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeSpotLevel {
    /// Unknown or no free spots.
    None,
    One,
    Several,
}

impl FreeSpotLevel {
    pub fn from_free_spots(free_spots: Option<i64>) -> Self {
        match free_spots {
            Some(n) if n > 1 => FreeSpotLevel::Several,
            Some(1) => FreeSpotLevel::One,
            _ => FreeSpotLevel::None,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            FreeSpotLevel::None => ZoneStatus::Full.color(),
            FreeSpotLevel::One => ZoneStatus::Warning.color(),
            FreeSpotLevel::Several => ZoneStatus::Ok.color(),
        }
    }
}
