//! View state controller.
//!
//! Owns the viewport (center + zoom), the current zone/camera selection and
//! the filter panel state. There are two ways the viewport changes:
//!
//! - **Selection** ([`ViewController::on_zone_select`],
//!   [`ViewController::on_camera_select`]) derives a new viewport from the
//!   selected target.
//! - **User interaction** ([`ViewController::on_map_user_interaction`])
//!   copies the map's reported viewport verbatim and never runs selection
//!   logic, so a programmatic move echoed back by the map cannot loop.

use serde::Serialize;

use crate::filter::FreeSpotFilter;
use crate::geometry::{centroid, GeometryError};
use crate::models::{Camera, LatLng, ViewState, Zone};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub zone_id: Option<i64>,
    pub camera_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    view: ViewState,
    /// Zoom used when focusing a zone or camera.
    focus_zoom: u8,
    selection: Selection,
    free_spot_filter: FreeSpotFilter,
    filters_open: bool,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ViewState::default(), 18)
    }
}

impl ViewController {
    pub fn new(initial: ViewState, focus_zoom: u8) -> Self {
        Self {
            view: initial,
            focus_zoom,
            selection: Selection::default(),
            free_spot_filter: FreeSpotFilter::default(),
            filters_open: false,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Center on the zone's centroid without ever zooming out.
    ///
    /// A zone without usable geometry leaves the view untouched.
    pub fn on_zone_select(&mut self, zone: &Zone) -> Result<ViewState, GeometryError> {
        let center = centroid(&zone.points)?;
        self.view = ViewState {
            center,
            zoom: self.view.zoom.max(self.focus_zoom),
        };
        self.selection.zone_id = Some(zone.zone_id);
        tracing::debug!(zone_id = zone.zone_id, view = ?self.view, "zone selected");
        Ok(self.view)
    }

    /// Center on a camera at the focus zoom, or clear the camera selection.
    ///
    /// Unlike zone selection the zoom is set unconditionally, even when the
    /// map is already closer.
    pub fn on_camera_select(&mut self, camera: Option<&Camera>) -> ViewState {
        let Some(camera) = camera else {
            self.selection.camera_id = None;
            return self.view;
        };
        self.selection.camera_id = Some(camera.camera_id);
        let position = camera.position();
        if position.is_finite() {
            self.view = ViewState {
                center: position,
                zoom: self.focus_zoom,
            };
        } else {
            tracing::warn!(camera_id = camera.camera_id, "camera has no usable position");
        }
        self.view
    }

    /// Record a viewport reported by the map after the user panned or zoomed.
    ///
    /// Returns `true` if the stored view changed. Non-finite centers are
    /// ignored.
    pub fn on_map_user_interaction(&mut self, center: LatLng, zoom: u8) -> bool {
        if !center.is_finite() {
            tracing::warn!(?center, "ignoring non-finite map center");
            return false;
        }
        let next = ViewState { center, zoom };
        if next == self.view {
            return false;
        }
        self.view = next;
        true
    }

    pub fn clear_zone_selection(&mut self) {
        self.selection.zone_id = None;
    }

    pub fn free_spot_filter(&self) -> FreeSpotFilter {
        self.free_spot_filter
    }

    pub fn set_free_spot_filter(&mut self, filter: FreeSpotFilter) {
        self.free_spot_filter = filter;
    }

    pub fn filters_open(&self) -> bool {
        self.filters_open
    }

    /// Flip the filter panel; returns the new visibility.
    pub fn toggle_filters(&mut self) -> bool {
        self.filters_open = !self.filters_open;
        self.filters_open
    }
}
