//! Map interaction commands: selection, viewport, filters and event dispatch.
//!
//! Selection commands resolve their target against the fetched lists first
//! and only go to the API when the target is not loaded.

use crate::api::{ApiError, ParkingService};
use crate::error::AppError;
use crate::filter::FreeSpotFilter;
use crate::models::{LatLng, ViewState, Zone};
use crate::render::{build_frame, MapEvent, RenderFrame};
use crate::state::AppState;

// ── Selection ─────────────────────────────────────────────────────────────────

/// Focus a zone from the current zone list.
pub async fn select_zone<S: ParkingService>(
    zone_id: i64,
    state: &AppState<S>,
) -> Result<ViewState, AppError> {
    let zones = state.zones.items().await;
    let zone = zones
        .iter()
        .find(|z| z.zone_id == zone_id)
        .ok_or_else(|| AppError::NotFound(format!("zone {zone_id} is not loaded")))?;
    let mut view = state.write_view()?;
    Ok(view.on_zone_select(zone)?)
}

/// Drop the zone selection. The viewport stays where it is.
pub fn deselect_zone<S: ParkingService>(state: &AppState<S>) -> Result<(), AppError> {
    state.write_view()?.clear_zone_selection();
    Ok(())
}

/// Fetch a single zone by id and focus it.
pub async fn lookup_zone<S: ParkingService>(
    zone_id: i64,
    state: &AppState<S>,
) -> Result<Zone, AppError> {
    let zone = state.service.zone(zone_id).await?;
    state.write_view()?.on_zone_select(&zone)?;
    Ok(zone)
}

/// Focus a camera, or clear the camera selection with `None`.
pub async fn select_camera<S: ParkingService>(
    camera_id: Option<i64>,
    state: &AppState<S>,
) -> Result<ViewState, AppError> {
    let Some(camera_id) = camera_id else {
        return Ok(state.write_view()?.on_camera_select(None));
    };

    let loaded = state
        .cameras
        .items()
        .await
        .iter()
        .find(|c| c.camera_id == camera_id)
        .cloned();
    let camera = match loaded {
        Some(camera) => camera,
        None => {
            tracing::debug!(camera_id, "camera not loaded; asking the API");
            state.service.camera(camera_id).await.map_err(|e| match e {
                ApiError::Status { status: 404, .. } => {
                    AppError::NotFound(format!("camera {camera_id} not found"))
                }
                other => other.into(),
            })?
        }
    };
    Ok(state.write_view()?.on_camera_select(Some(&camera)))
}

// ── Viewport and filters ──────────────────────────────────────────────────────

/// Record the viewport after a user pan/zoom. Returns whether it changed.
pub fn map_moved<S: ParkingService>(
    center: LatLng,
    zoom: u8,
    state: &AppState<S>,
) -> Result<bool, AppError> {
    Ok(state.write_view()?.on_map_user_interaction(center, zoom))
}

pub fn set_filter<S: ParkingService>(
    filter: FreeSpotFilter,
    state: &AppState<S>,
) -> Result<(), AppError> {
    state.write_view()?.set_free_spot_filter(filter);
    Ok(())
}

pub fn toggle_filters<S: ParkingService>(state: &AppState<S>) -> Result<bool, AppError> {
    Ok(state.write_view()?.toggle_filters())
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Build a frame from the current zone list and view state.
pub async fn current_frame<S: ParkingService>(
    state: &AppState<S>,
) -> Result<RenderFrame, AppError> {
    let zones = state.zones.items().await;
    let view = state.read_view()?;
    Ok(build_frame(
        &zones,
        view.free_spot_filter(),
        view.view(),
        view.selection(),
    ))
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Route one map event to its entry point.
///
/// Returns `true` when the map should be redrawn. A `Moved` event only
/// updates the stored viewport; the map already shows it, so no redraw is
/// requested. Events for which [`MapEvent::awaits_network`] holds may wait
/// on a request; callers that must stay responsive run those off their
/// event loop.
pub async fn dispatch<S: ParkingService>(
    event: MapEvent,
    state: &AppState<S>,
) -> Result<bool, AppError> {
    match event {
        MapEvent::Moved { center, zoom } => {
            map_moved(center, zoom, state)?;
            Ok(false)
        }
        MapEvent::ZoneClicked { zone_id } => {
            select_zone(zone_id, state).await?;
            Ok(true)
        }
        MapEvent::ZoneDeselected => {
            deselect_zone(state)?;
            Ok(true)
        }
        MapEvent::CameraSelected { camera_id } => {
            select_camera(camera_id, state).await?;
            Ok(true)
        }
        MapEvent::FilterChanged { filter } => {
            set_filter(filter, state)?;
            Ok(true)
        }
        MapEvent::FiltersToggled => {
            toggle_filters(state)?;
            Ok(false)
        }
        MapEvent::RefreshRequested => {
            // a new list arrives through the revision channel
            state.zones.refetch().await;
            Ok(false)
        }
    }
}
