//! Zone list → render frame.
//!
//! Each zone that survives the filter becomes one [`ZoneGraphic`]: a shape
//! (filled polygon, or a centerline for parallel zones) plus a marker at the
//! centroid. Shape and marker carry the same colour from
//! [`classify_zone`](crate::classify::classify_zone).
//!
//! A zone that cannot be drawn is logged and listed in
//! [`RenderFrame::skipped`]; the rest of the frame is unaffected.

use serde::Serialize;

use super::popup::{free_spots_label, zone_popup, Popup};
use crate::classify::{classify_zone, ZoneStatus};
use crate::controller::Selection;
use crate::filter::{filter_zones, FreeSpotFilter};
use crate::geometry::{centerline, centroid, GeometryError};
use crate::models::{LatLng, Point, ViewState, Zone};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polygon {
        points: Vec<LatLng>,
        color: &'static str,
    },
    /// Two-point line along a parallel zone's long axis.
    Polyline {
        points: Vec<LatLng>,
        color: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub color: &'static str,
    /// Free-spot count shown on the marker glyph.
    pub label: String,
    pub popup: Popup,
}

/// Everything the map needs to draw one zone. Clicking either the shape or
/// the marker should emit [`MapEvent::ZoneClicked`](super::MapEvent) with
/// `zone_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneGraphic {
    pub zone_id: i64,
    pub status: ZoneStatus,
    pub shape: Shape,
    pub marker: Marker,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub viewport: ViewState,
    pub zones: Vec<ZoneGraphic>,
    /// Zones that passed the filter but could not be drawn.
    pub skipped: Vec<i64>,
}

fn to_latlng(p: &Point) -> LatLng {
    LatLng::new(p.latitude, p.longitude)
}

/// Build the graphic for one zone.
pub fn render_zone(zone: &Zone) -> Result<ZoneGraphic, GeometryError> {
    let center = centroid(&zone.points)?;
    let status = classify_zone(zone);
    let color = status.color();

    let shape = if zone.zone_type.is_parallel() {
        let line = centerline(&zone.points);
        if line.len() != 2 {
            return Err(GeometryError::WrongPointCount(zone.points.len()));
        }
        Shape::Polyline {
            points: line.iter().map(to_latlng).collect(),
            color,
        }
    } else {
        Shape::Polygon {
            points: zone.points.iter().map(to_latlng).collect(),
            color,
        }
    };

    Ok(ZoneGraphic {
        zone_id: zone.zone_id,
        status,
        shape,
        marker: Marker {
            position: center,
            color,
            label: free_spots_label(zone),
            popup: zone_popup(zone),
        },
        selected: false,
    })
}

/// Filter `zones` and build a frame for the given viewport.
pub fn build_frame(
    zones: &[Zone],
    filter: FreeSpotFilter,
    viewport: ViewState,
    selection: Selection,
) -> RenderFrame {
    let mut graphics = Vec::new();
    let mut skipped = Vec::new();

    for zone in filter_zones(zones, filter) {
        match render_zone(zone) {
            Ok(mut graphic) => {
                graphic.selected = selection.zone_id == Some(zone.zone_id);
                graphics.push(graphic);
            }
            Err(e) => {
                tracing::warn!(zone_id = zone.zone_id, error = %e, "skipping zone");
                skipped.push(zone.zone_id);
            }
        }
    }

    RenderFrame {
        viewport,
        zones: graphics,
        skipped,
    }
}
