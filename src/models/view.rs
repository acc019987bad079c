//! Map viewport types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// The map's current center and zoom level.
///
/// Lives for the application session and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for ViewState {
    /// Central Saint Petersburg at city zoom.
    fn default() -> Self {
        Self {
            center: LatLng::new(59.9343, 30.3351),
            zoom: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_city_overview() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 12);
        assert!(view.center.is_finite());
    }

    #[test]
    fn non_finite_coordinates_are_detected() {
        assert!(!LatLng::new(f64::INFINITY, 30.0).is_finite());
        assert!(!LatLng::new(59.0, f64::NAN).is_finite());
    }
}
