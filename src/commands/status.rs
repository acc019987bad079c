//! Status bar summary.
//!
//! [`status_snapshot`] returns the counters and load state the header shows
//! next to the map. It only takes read locks.

use serde::Serialize;

use crate::api::ParkingService;
use crate::controller::{FetchState, LoadStatus};
use crate::error::MapError;
use crate::models::Zone;
use crate::state::AppState;

/// Serializable summary of the zone list sent to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub total_zones: usize,
    /// Sum of free spots over zones with known occupancy, each clamped at 0.
    pub total_free_spots: i64,
    pub status: LoadStatus,
    pub error: Option<MapError>,
    /// RFC 3339 time of the last successful update.
    pub updated_at: Option<String>,
    pub cameras: usize,
}

impl StatusSnapshot {
    fn from_zones(state: &FetchState<Zone>, cameras: usize) -> Self {
        Self {
            total_zones: state.total,
            total_free_spots: state
                .items
                .iter()
                .filter_map(Zone::free_spots)
                .map(|n| n.max(0))
                .sum(),
            status: state.status,
            error: state.error.clone(),
            updated_at: state.updated_at.clone(),
            cameras,
        }
    }
}

pub async fn status_snapshot<S: ParkingService>(state: &AppState<S>) -> StatusSnapshot {
    let cameras = state.cameras.items().await.len();
    StatusSnapshot::from_zones(&state.zones.snapshot().await, cameras)
}
