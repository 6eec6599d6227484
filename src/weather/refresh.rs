//! Periodic weather refresh
//!
//! Re-issues the local lookup on a fixed interval and forwards every outcome
//! to the UI. The loop runs until its [`RefreshHandle`] is dropped or the
//! receiving side goes away.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::core::location::LocationProvider;
use crate::weather::client::WeatherClient;
use crate::weather::lookup::{lookup_local, LocalWeather};

/// Owner of a running refresh loop; aborts the loop when dropped
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Whether the loop has stopped on its own
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        debug!("stopping weather refresh");
        self.task.abort();
    }
}

/// Start refreshing immediately and then every `every`.
///
/// `wrap` turns each outcome into the receiver's message type.
pub fn spawn_refresh<M, F>(
    every: Duration,
    location: Arc<dyn LocationProvider>,
    client: Arc<dyn WeatherClient>,
    tx: mpsc::Sender<M>,
    wrap: F,
) -> RefreshHandle
where
    M: Send + 'static,
    F: Fn(LocalWeather) -> M + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut tick = interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick.tick().await;
            debug!("refreshing local weather");
            let outcome = lookup_local(location.as_ref(), client.as_ref()).await;
            if tx.send(wrap(outcome)).await.is_err() {
                break;
            }
        }
    });

    RefreshHandle { task }
}
