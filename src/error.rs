//! Error types shared across the crate.
//!
//! - [`AppError`] is returned by every entry point in [`crate::commands`] and
//!   serializes to `{ kind, message }`.
//! - [`MapError`] is the `{ message, code }` value a fetch controller stores
//!   when a load fails. It is state, not a thrown error.

use serde::Serialize;

use crate::api::ApiError;
use crate::geometry::GeometryError;

/// Top-level error returned by command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// Configuration could not be read or failed validation.
    #[error("{0}")]
    Config(String),

    /// A request to the parking API failed; the message is already
    /// user-facing.
    #[error("{0}")]
    Api(String),

    /// A zone's corners could not be turned into map geometry.
    #[error("{0}")]
    InvalidGeometry(String),

    /// A requested zone or camera is not known.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Io(String),
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self::Api(e.to_string())
    }
}

impl From<GeometryError> for AppError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Classification of a failed load, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Zone or camera list retrieval failed.
    FetchError,
    /// Text search failed. Kept for the point-search API; zone mode never
    /// produces it.
    SearchError,
    /// The load failed without a usable error value (e.g. it panicked).
    UnknownError,
}

/// Error value stored in controller state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapError {
    pub message: String,
    pub code: ErrorCode,
}

impl MapError {
    pub fn fetch(e: &ApiError) -> Self {
        Self {
            message: e.to_string(),
            code: ErrorCode::FetchError,
        }
    }

    pub fn unknown() -> Self {
        Self {
            message: "An unknown error occurred".to_string(),
            code: ErrorCode::UnknownError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_serializes_to_kind_message() {
        let err = AppError::Config("interval_secs must be at least 1".to_string());
        let value = serde_json::to_value(&err).expect("serialize AppError::Config");
        assert_eq!(value["kind"], "Config");
        assert_eq!(value["message"], "interval_secs must be at least 1");
    }

    #[test]
    fn from_api_error_keeps_user_facing_message() {
        let api = ApiError::Status {
            status: 404,
            message: "Resource not found".to_string(),
        };
        let app = AppError::from(api);
        assert!(matches!(app, AppError::Api(_)));
        assert_eq!(app.to_string(), "Resource not found");
    }

    #[test]
    fn from_geometry_error_produces_invalid_geometry() {
        let app = AppError::from(GeometryError::WrongPointCount(3));
        let value = serde_json::to_value(&app).expect("serialize");
        assert_eq!(value["kind"], "InvalidGeometry");
        assert_eq!(value["message"], "expected 4 zone points, got 3");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(AppError::from(io_err), AppError::Io(_)));
    }

    #[test]
    fn map_error_serializes_with_screaming_code() {
        let err = MapError::fetch(&ApiError::Network);
        let value = serde_json::to_value(&err).expect("serialize MapError");
        assert_eq!(value["code"], "FETCH_ERROR");
        assert_eq!(value["message"], "Network error. Please check your connection.");
        let value = serde_json::to_value(MapError::unknown()).expect("serialize");
        assert_eq!(value["code"], "UNKNOWN_ERROR");
    }

    #[test]
    fn search_error_code_name() {
        let value = serde_json::to_value(ErrorCode::SearchError).expect("serialize");
        assert_eq!(value, "SEARCH_ERROR");
    }
}
