//! Zone geometry helpers.
//!
//! # Module structure
//!
//! ```text
//! geometry/
//! └── quad.rs: centroid / centerline / planar distance over zone corners
//! ```
//!
//! Every computation here works in raw coordinate space (degrees treated as
//! planar units). That is accurate enough for choosing marker positions and a
//! zone's long axis at street scale; nothing here is geodesic.

pub mod quad;

pub use quad::{centerline, centroid, planar_distance};

/// Errors raised when a zone's corner list cannot be interpreted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The zone does not have exactly four corners.
    #[error("expected 4 zone points, got {0}")]
    WrongPointCount(usize),

    /// A corner has a NaN or infinite latitude/longitude.
    #[error("zone point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}
