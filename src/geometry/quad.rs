//! Quadrilateral helpers used by the render layer and view controller.

use super::GeometryError;
use crate::models::{LatLng, Point};

const CORNERS: usize = 4;

/// Check that `points` is a four-corner quad with finite coordinates.
fn check_quad(points: &[Point]) -> Result<(), GeometryError> {
    if points.len() != CORNERS {
        return Err(GeometryError::WrongPointCount(points.len()));
    }
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(GeometryError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Euclidean distance between two points in latitude/longitude space.
pub fn planar_distance(a: &Point, b: &Point) -> f64 {
    (a.latitude - b.latitude).hypot(a.longitude - b.longitude)
}

/// Arithmetic mean of the four corners.
///
/// Order-independent: any permutation of the same corners yields the same
/// centroid.
pub fn centroid(points: &[Point]) -> Result<LatLng, GeometryError> {
    check_quad(points)?;
    let n = CORNERS as f64;
    let (lat, lng) = points.iter().fold((0.0, 0.0), |(lat, lng), p| {
        (lat + p.latitude, lng + p.longitude)
    });
    Ok(LatLng::new(lat / n, lng / n))
}

/// Endpoints of the zone's long axis, approximated by the longer of the first
/// two edges.
///
/// Returns `(p0, p1)` when `|p0p1| > |p1p2|`, otherwise `(p1, p2)`. Any input
/// that is not four corners yields an empty vector.
pub fn centerline(points: &[Point]) -> Vec<Point> {
    if points.len() != CORNERS {
        return Vec::new();
    }
    let first = planar_distance(&points[0], &points[1]);
    let second = planar_distance(&points[1], &points[2]);
    if first > second {
        vec![points[0], points[1]]
    } else {
        vec![points[1], points[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<Point> {
        vec![
            Point::at(59.0, 30.0),
            Point::at(59.0, 30.4),
            Point::at(59.1, 30.4),
            Point::at(59.1, 30.0),
        ]
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn centroid_is_mean_of_corners() {
        let c = centroid(&quad()).expect("centroid");
        assert_close(c.lat, 59.05);
        assert_close(c.lng, 30.2);
    }

    #[test]
    fn centroid_is_order_independent() {
        let base = centroid(&quad()).expect("centroid");
        let mut rotated = quad();
        rotated.rotate_left(1);
        let mut reversed = quad();
        reversed.reverse();
        for permutation in [rotated, reversed] {
            let c = centroid(&permutation).expect("centroid");
            assert_close(c.lat, base.lat);
            assert_close(c.lng, base.lng);
        }
    }

    #[test]
    fn centroid_rejects_wrong_point_count() {
        let mut points = quad();
        points.pop();
        assert_eq!(centroid(&points), Err(GeometryError::WrongPointCount(3)));
        assert_eq!(centroid(&[]), Err(GeometryError::WrongPointCount(0)));
    }

    #[test]
    fn centroid_rejects_non_finite_corner() {
        let mut points = quad();
        points[2].latitude = f64::NAN;
        assert_eq!(centroid(&points), Err(GeometryError::NonFinite { index: 2 }));
    }

    #[test]
    fn centerline_picks_longer_first_edge() {
        // p0→p1 spans 0.4°, p1→p2 spans 0.1°.
        let line = centerline(&quad());
        assert_eq!(line, vec![quad()[0], quad()[1]]);
    }

    #[test]
    fn centerline_picks_second_edge_when_longer() {
        let points = vec![
            Point::at(0.0, 0.0),
            Point::at(0.0, 1.0),
            Point::at(3.0, 1.0),
            Point::at(3.0, 0.0),
        ];
        assert_eq!(centerline(&points), vec![points[1], points[2]]);
    }

    #[test]
    fn centerline_ties_go_to_second_edge() {
        let points = vec![
            Point::at(0.0, 0.0),
            Point::at(0.0, 1.0),
            Point::at(1.0, 1.0),
            Point::at(1.0, 0.0),
        ];
        assert_eq!(centerline(&points), vec![points[1], points[2]]);
    }

    #[test]
    fn centerline_of_degenerate_input_is_empty() {
        assert!(centerline(&[]).is_empty());
        assert!(centerline(&quad()[..3]).is_empty());
    }

    #[test]
    fn planar_distance_is_euclidean() {
        let d = planar_distance(&Point::at(0.0, 0.0), &Point::at(3.0, 4.0));
        assert_close(d, 5.0);
    }
}
