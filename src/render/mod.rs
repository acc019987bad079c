//! Render layer.
//!
//! The core never talks to a map engine directly. It hands a [`MapView`] a
//! [`RenderFrame`] (viewport + one graphic per zone) and receives
//! [`MapEvent`]s back through a channel.

pub mod frame;
pub mod popup;

use serde::{Deserialize, Serialize};

use crate::filter::FreeSpotFilter;
use crate::models::LatLng;

pub use frame::{build_frame, render_zone, Marker, RenderFrame, Shape, ZoneGraphic};
pub use popup::{zone_popup, Popup, PopupRow};

/// Interaction reported by the map or its surrounding controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapEvent {
    /// The user finished panning or zooming.
    #[serde(rename_all = "camelCase")]
    Moved { center: LatLng, zoom: u8 },
    /// A zone shape or its marker was clicked.
    #[serde(rename_all = "camelCase")]
    ZoneClicked { zone_id: i64 },
    /// The user dismissed the selected zone (popup closed, empty map click).
    ZoneDeselected,
    /// A camera was picked, or the camera selection was cleared.
    #[serde(rename_all = "camelCase")]
    CameraSelected { camera_id: Option<i64> },
    FilterChanged { filter: FreeSpotFilter },
    FiltersToggled,
    RefreshRequested,
}

impl MapEvent {
    /// `true` for events whose handling may wait on an API request.
    pub fn awaits_network(&self) -> bool {
        matches!(
            self,
            MapEvent::RefreshRequested | MapEvent::CameraSelected { camera_id: Some(_) }
        )
    }
}

/// A map surface that can draw a frame.
pub trait MapView: Send {
    fn render(&mut self, frame: &RenderFrame);
}

/// Headless view that logs a summary of every frame.
#[derive(Debug, Default)]
pub struct TracingMapView {
    frames: u64,
}

impl TracingMapView {
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl MapView for TracingMapView {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        tracing::info!(
            frame = self.frames,
            zones = frame.zones.len(),
            skipped = frame.skipped.len(),
            lat = frame.viewport.center.lat,
            lng = frame.viewport.center.lng,
            zoom = frame.viewport.zoom,
            "render"
        );
    }
}
