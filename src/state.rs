//! Application state shared by the render loop and command handlers.
//!
//! [`AppState`] owns one fetch controller per remote list and the single
//! [`ViewController`]. Nothing else holds mutable copies of that state.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::api::{CameraQuery, ParkingService};
use crate::config::AppConfig;
use crate::controller::{CameraLoader, FetchController, ViewController, ZoneLoader};
use crate::error::AppError;

pub type ZoneController<S> = FetchController<ZoneLoader<S>>;
pub type CameraController<S> = FetchController<CameraLoader<S>>;

/// Root application state.
///
/// The view controller sits behind a std [`RwLock`]; guards are never held
/// across an `.await`.
pub struct AppState<S: ParkingService> {
    pub service: Arc<S>,
    pub zones: Arc<ZoneController<S>>,
    pub cameras: Arc<CameraController<S>>,
    pub view: RwLock<ViewController>,
    /// Period of the zone poll timer.
    pub poll_interval: Duration,
}

impl<S: ParkingService> AppState<S> {
    pub fn new(service: S, config: &AppConfig) -> Self {
        let service = Arc::new(service);
        let zones = FetchController::new(ZoneLoader::new(
            Arc::clone(&service),
            config.zones.clone(),
        ));
        let cameras = FetchController::new(CameraLoader::new(
            Arc::clone(&service),
            CameraQuery::default(),
        ));
        Self {
            service,
            zones: Arc::new(zones),
            cameras: Arc::new(cameras),
            view: RwLock::new(ViewController::new(
                config.map.initial_view(),
                config.map.focus_zoom,
            )),
            poll_interval: config.polling.interval(),
        }
    }

    pub fn read_view(&self) -> Result<RwLockReadGuard<'_, ViewController>, AppError> {
        self.view
            .read()
            .map_err(|e| AppError::Io(format!("view lock poisoned: {e}")))
    }

    pub fn write_view(&self) -> Result<RwLockWriteGuard<'_, ViewController>, AppError> {
        self.view
            .write()
            .map_err(|e| AppError::Io(format!("view lock poisoned: {e}")))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted [`ParkingService`] for command tests.

    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::api::{ApiError, CameraQuery, ParkingService, ZoneQuery};
    use crate::models::{Camera, Zone};

    #[derive(Default)]
    pub struct FakeService {
        /// `GET /zones` replies in call order, each after its delay.
        pub zone_replies: Mutex<VecDeque<(Duration, Result<Vec<Zone>, ApiError>)>>,
        pub zones_by_id: Vec<Zone>,
        pub cameras: Vec<Camera>,
        pub remote_cameras: Vec<Camera>,
    }

    impl FakeService {
        pub fn with_zones(zones: Vec<Zone>) -> Self {
            let svc = Self::default();
            svc.push_zones(Ok(zones));
            svc
        }

        pub fn push_zones(&self, reply: Result<Vec<Zone>, ApiError>) {
            self.push_zones_after(Duration::ZERO, reply);
        }

        pub fn push_zones_after(&self, delay: Duration, reply: Result<Vec<Zone>, ApiError>) {
            self.zone_replies
                .lock()
                .expect("zone replies lock")
                .push_back((delay, reply));
        }
    }

    impl ParkingService for FakeService {
        fn zones(
            &self,
            _query: &ZoneQuery,
        ) -> impl Future<Output = Result<Vec<Zone>, ApiError>> + Send {
            let (delay, reply) = self
                .zone_replies
                .lock()
                .expect("zone replies lock")
                .pop_front()
                .unwrap_or((Duration::ZERO, Err(ApiError::Network)));
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
        }

        fn zone(&self, zone_id: i64) -> impl Future<Output = Result<Zone, ApiError>> + Send {
            let reply = self
                .zones_by_id
                .iter()
                .find(|z| z.zone_id == zone_id)
                .cloned()
                .ok_or_else(|| ApiError::from_status(404, ""));
            async move { reply }
        }

        fn cameras(
            &self,
            _query: &CameraQuery,
        ) -> impl Future<Output = Result<Vec<Camera>, ApiError>> + Send {
            let reply = Ok(self.cameras.clone());
            async move { reply }
        }

        fn camera(&self, camera_id: i64) -> impl Future<Output = Result<Camera, ApiError>> + Send {
            let reply = self
                .remote_cameras
                .iter()
                .find(|c| c.camera_id == camera_id)
                .cloned()
                .ok_or_else(|| ApiError::from_status(404, ""));
            async move { reply }
        }
    }

    pub fn camera(camera_id: i64, lat: f64, lng: f64) -> Camera {
        Camera {
            camera_id,
            title: format!("Камера {camera_id}"),
            source: format!("cam{camera_id}"),
            image_width: 1280,
            image_height: 720,
            calib: serde_json::Value::Null,
            latitude: lat,
            longitude: lng,
            is_active: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeService;
    use super::*;
    use crate::controller::LoadStatus;

    #[test]
    fn app_state_starts_idle_at_configured_view() {
        let mut config = AppConfig::default();
        config.map.center = [59.8, 30.2];
        config.map.zoom = 11;
        let state = AppState::new(FakeService::default(), &config);

        let view = state.read_view().expect("read view lock").view();
        assert_eq!(view.zoom, 11);
        assert_eq!(view.center.lat, 59.8);
        assert_eq!(state.poll_interval, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn controllers_start_idle() {
        let state = AppState::new(FakeService::default(), &AppConfig::default());
        assert_eq!(state.zones.status().await, LoadStatus::Idle);
        assert_eq!(state.cameras.status().await, LoadStatus::Idle);
        assert!(state.zones.items().await.is_empty());
    }

    #[test]
    fn view_lock_allows_write() {
        let state = AppState::new(FakeService::default(), &AppConfig::default());
        {
            let mut view = state.write_view().expect("write view lock");
            view.toggle_filters();
        }
        assert!(state.read_view().expect("read view lock").filters_open());
    }
}
