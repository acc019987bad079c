//! The map session loop.
//!
//! Starts the camera load and the zone poll timer, then redraws the
//! [`MapView`] whenever the zone list changes or an event asks for it.
//! Events that wait on the network run as background tasks, so the loop
//! keeps handling input and shutdown while a request is outstanding.
//! Teardown stops the poll timer and aborts any load still in flight.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::api::ParkingService;
use crate::commands::map::{current_frame, dispatch};
use crate::error::AppError;
use crate::render::{MapEvent, MapView};
use crate::state::AppState;

async fn redraw<S: ParkingService, V: MapView>(
    state: &AppState<S>,
    view: &mut V,
) -> Result<(), AppError> {
    let frame = current_frame(state).await?;
    view.render(&frame);
    Ok(())
}

/// Run until `shutdown` resolves.
///
/// A closed event channel is not a shutdown: the loop keeps redrawing on
/// data changes until `shutdown` fires.
pub async fn run_session<S, V>(
    state: Arc<AppState<S>>,
    mut view: V,
    mut events: mpsc::Receiver<MapEvent>,
    shutdown: impl Future<Output = ()>,
) -> Result<(), AppError>
where
    S: ParkingService,
    V: MapView,
{
    let mut revisions = state.zones.subscribe();

    let cameras = Arc::clone(&state.cameras);
    let camera_load = tokio::spawn(async move {
        cameras.fetch().await;
    });
    let poll = state.zones.start_polling(state.poll_interval);

    redraw(&state, &mut view).await?;

    tokio::pin!(shutdown);
    let mut events_open = true;
    let mut background: JoinSet<Result<bool, AppError>> = JoinSet::new();
    let result = loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown requested");
                break Ok(());
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                if let Err(e) = redraw(&state, &mut view).await {
                    break Err(e);
                }
            }
            event = events.recv(), if events_open => {
                let Some(event) = event else {
                    tracing::debug!("event source closed");
                    events_open = false;
                    continue;
                };
                if event.awaits_network() {
                    let state = Arc::clone(&state);
                    background.spawn(async move { dispatch(event, &state).await });
                    continue;
                }
                match dispatch(event, &state).await {
                    Ok(true) => {
                        if let Err(e) = redraw(&state, &mut view).await {
                            break Err(e);
                        }
                    }
                    Ok(false) => {}
                    Err(e) => tracing::warn!(error = %e, "event rejected"),
                }
            }
            Some(joined) = background.join_next(), if !background.is_empty() => {
                match joined {
                    Ok(Ok(true)) => {
                        if let Err(e) = redraw(&state, &mut view).await {
                            break Err(e);
                        }
                    }
                    Ok(Ok(false)) => {}
                    Ok(Err(e)) => tracing::warn!(error = %e, "event rejected"),
                    Err(e) => tracing::error!(error = %e, "event task did not complete"),
                }
            }
        }
    };

    poll.stop();
    camera_load.abort();
    background.abort_all();
    result
}

/// Read newline-delimited JSON [`MapEvent`]s from stdin.
///
/// Malformed lines are logged and skipped. The task ends at EOF or when the
/// receiver is dropped.
pub fn stdin_events(capacity: usize) -> (mpsc::Receiver<MapEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity);
    let task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<MapEvent>(line) {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "ignoring malformed event"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
    (rx, task)
}
