//! Data commands: manual refresh and list queries.

use crate::api::ParkingService;
use crate::controller::FetchOutcome;
use crate::error::AppError;
use crate::filter::filter_zones;
use crate::models::{Camera, Zone};
use crate::state::AppState;

/// Refetch the zone list now, independent of the poll timer.
pub async fn refetch_zones<S: ParkingService>(state: &AppState<S>) -> FetchOutcome {
    state.zones.refetch().await
}

pub async fn refetch_cameras<S: ParkingService>(state: &AppState<S>) -> FetchOutcome {
    state.cameras.refetch().await
}

/// Zones passing the current free-spot filter, in source order.
pub async fn visible_zones<S: ParkingService>(state: &AppState<S>) -> Result<Vec<Zone>, AppError> {
    let zones = state.zones.items().await;
    let filter = state.read_view()?.free_spot_filter();
    Ok(filter_zones(&zones, filter).into_iter().cloned().collect())
}

pub async fn cameras<S: ParkingService>(state: &AppState<S>) -> Vec<Camera> {
    state.cameras.items().await.as_ref().clone()
}
