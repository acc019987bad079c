//! Client side of the ParkTrack HTTP API.
//!
//! ```text
//! api/
//! ├── client.rs : reqwest-backed [`ApiClient`]
//! ├── query.rs  : query-string types for list endpoints
//! ├── records.rs: per-record schema validation of list payloads
//! └── status.rs : HTTP status → user-facing message mapping
//! ```
//!
//! Controllers depend on the [`ParkingService`] trait, not on [`ApiClient`],
//! so tests can script responses without a server.

use std::future::Future;

pub mod client;
pub mod query;
pub mod records;
pub mod status;

pub use client::ApiClient;
pub use query::{BoundingBox, CameraQuery, ZoneQuery};

use crate::models::{Camera, Zone};

/// A classified transport failure. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response arrived (connection refused, DNS failure, timeout).
    #[error("Network error. Please check your connection.")]
    Network,

    /// The response body was not the expected JSON shape.
    #[error("invalid response payload: {0}")]
    Decode(String),

    /// The request could not be built (bad base URL, header value, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// The remote zone/camera service as seen by the controllers.
pub trait ParkingService: Send + Sync + 'static {
    /// `GET /zones`
    fn zones(
        &self,
        query: &ZoneQuery,
    ) -> impl Future<Output = Result<Vec<Zone>, ApiError>> + Send;

    /// `GET /zones/{zone_id}`
    fn zone(&self, zone_id: i64) -> impl Future<Output = Result<Zone, ApiError>> + Send;

    /// `GET /cameras`
    fn cameras(
        &self,
        query: &CameraQuery,
    ) -> impl Future<Output = Result<Vec<Camera>, ApiError>> + Send;

    /// `GET /cameras/{camera_id}`
    fn camera(&self, camera_id: i64) -> impl Future<Output = Result<Camera, ApiError>> + Send;
}
