//! reqwest-backed implementation of [`ParkingService`].
//!
//! One shared [`reqwest::Client`] per [`ApiClient`]; every request carries
//! the static bearer token when one is configured. Errors are classified at
//! this boundary and nothing above it sees a `reqwest::Error`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::records::{decode_cameras, decode_zones};
use super::{ApiError, CameraQuery, ParkingService, ZoneQuery};
use crate::config::ApiConfig;
use crate::models::{Camera, Zone};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let token = Some(config.token.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(self.url(path)).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::InvalidRequest(e.to_string())
            } else {
                tracing::debug!(path, error = %e, "request got no response");
                ApiError::Network
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::debug!(path, status = status.as_u16(), %err, "request failed");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ParkingService for ApiClient {
    async fn zones(&self, query: &ZoneQuery) -> Result<Vec<Zone>, ApiError> {
        let payload: Value = self.get("/zones", &query.to_pairs()).await?;
        decode_zones(payload)
    }

    async fn zone(&self, zone_id: i64) -> Result<Zone, ApiError> {
        let zone: Zone = self.get(&format!("/zones/{zone_id}"), &[]).await?;
        zone.check_record().map_err(ApiError::Decode)?;
        Ok(zone)
    }

    async fn cameras(&self, query: &CameraQuery) -> Result<Vec<Camera>, ApiError> {
        let payload: Value = self.get("/cameras", &query.to_pairs()).await?;
        decode_cameras(payload)
    }

    async fn camera(&self, camera_id: i64) -> Result<Camera, ApiError> {
        self.get(&format!("/cameras/{camera_id}"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, token: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            token: token.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new(&config("https://api.parktrack.live/", "")).expect("client");
        assert_eq!(client.base_url(), "https://api.parktrack.live");
        assert_eq!(client.url("/zones"), "https://api.parktrack.live/zones");
    }

    #[test]
    fn blank_token_means_no_auth() {
        let client = ApiClient::new(&config("http://localhost:8000", "  ")).expect("client");
        assert!(client.token.is_none());
        let client = ApiClient::new(&config("http://localhost:8000", "secret")).expect("client");
        assert_eq!(client.token.as_deref(), Some("secret"));
    }
}
