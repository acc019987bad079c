//! Mapping from HTTP error responses to user-facing messages.
//!
//! A `message` or `detail` field in the error body wins over the default text
//! for the status. FastAPI validation failures carry `detail` as an array of
//! `{ loc, msg, type }` objects; their `msg` values are joined.

use serde_json::Value;

use super::ApiError;

/// Default message for a status when the body has nothing better.
pub fn default_message(status: u16) -> String {
    match status {
        401 => "Unauthorized. Please check your API token.".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Resource not found".to_string(),
        422 => "Validation error".to_string(),
        500 => "Internal server error".to_string(),
        503 => "Service unavailable".to_string(),
        other => format!("Request failed with status {other}"),
    }
}

/// Pull a human-readable message out of an error body, if there is one.
fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let non_empty = |v: &Value| v.as_str().filter(|s| !s.is_empty()).map(str::to_string);

    if let Some(msg) = value.get("message").and_then(non_empty) {
        return Some(msg);
    }
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

/// Message for a failed response with `status` and raw `body`.
pub fn status_message(status: u16, body: &str) -> String {
    body_message(body).unwrap_or_else(|| default_message(status))
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            message: status_message(status, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_distinct_defaults() {
        let statuses = [401, 403, 404, 422, 500, 503];
        let messages: Vec<String> = statuses.iter().map(|s| default_message(*s)).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(default_message(401), "Unauthorized. Please check your API token.");
        assert_eq!(default_message(503), "Service unavailable");
    }

    #[test]
    fn unknown_status_mentions_code() {
        assert_eq!(default_message(418), "Request failed with status 418");
    }

    #[test]
    fn body_message_field_wins() {
        let body = r#"{"message": "token expired", "detail": "ignored"}"#;
        assert_eq!(status_message(401, body), "token expired");
    }

    #[test]
    fn detail_string_is_used() {
        assert_eq!(status_message(404, r#"{"detail": "Zone not found"}"#), "Zone not found");
    }

    #[test]
    fn validation_detail_array_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["query", "max_pay"], "msg": "value is not a valid integer", "type": "type_error"},
            {"loc": ["query", "camera_id"], "msg": "field required", "type": "missing"}
        ]}"#;
        assert_eq!(
            status_message(422, body),
            "value is not a valid integer; field required"
        );
    }

    #[test]
    fn empty_or_non_json_body_falls_back() {
        assert_eq!(status_message(500, ""), "Internal server error");
        assert_eq!(status_message(500, "<html>oops</html>"), "Internal server error");
        assert_eq!(status_message(403, r#"{"message": ""}"#), "Forbidden");
    }

    #[test]
    fn from_status_keeps_code_and_message() {
        let err = ApiError::from_status(503, "");
        assert_eq!(
            err,
            ApiError::Status {
                status: 503,
                message: "Service unavailable".to_string()
            }
        );
        assert_eq!(err.to_string(), "Service unavailable");
    }
}
