pub mod api;
pub mod classify;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod models;
pub mod render;
pub mod session;
pub mod state;

use std::sync::Arc;

use api::ApiClient;
use config::AppConfig;
use error::AppError;
use render::TracingMapView;
use state::AppState;

/// ParkTrack application entry point.
///
/// Everything the binary does lives here so `main.rs` stays a thin wrapper.
pub async fn run() -> Result<(), AppError> {
    // ── Tracing setup (must happen before anything else) ────────────────────
    //
    // Logs go to a single file in the OS data dir:
    //   Linux    ~/.local/share/parktrack/parktrack.log
    //   macOS    ~/Library/Application Support/parktrack/parktrack.log
    //   Windows  %LOCALAPPDATA%\parktrack\parktrack.log
    //
    // RUST_LOG controls the level; INFO when unset.
    let log_dir = dirs::data_local_dir()
        .unwrap_or_default()
        .join("parktrack");

    // tracing_appender::rolling::never panics if the file cannot be opened.
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::never(&log_dir, "parktrack.log");
    let (non_blocking, _tracing_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    tracing::info!("ParkTrack starting");

    // ── Configuration and state ──────────────────────────────────────────────
    let config = AppConfig::load()?;
    let client = ApiClient::new(&config.api)?;
    tracing::info!(
        base_url = client.base_url(),
        poll_secs = config.polling.interval_secs,
        "configuration loaded"
    );
    let state = Arc::new(AppState::new(client, &config));

    // ── Session ──────────────────────────────────────────────────────────────
    let (events, reader) = session::stdin_events(64);
    let result = session::run_session(state, TracingMapView::default(), events, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for ctrl-c");
        }
    })
    .await;
    reader.abort();

    match &result {
        Ok(()) => tracing::info!("ParkTrack stopped"),
        Err(e) => tracing::error!(error = %e, "ParkTrack stopped with an error"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The configuration a fresh install runs with is valid.
    #[test]
    fn default_config_validates() {
        AppConfig::default().validate().expect("default config");
    }

    #[test]
    fn default_client_builds() {
        let client = ApiClient::new(&AppConfig::default().api).expect("client");
        assert!(client.base_url().starts_with("https://"));
    }
}
