#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cancellable interval polling.
//!
//! Admin dashboards refresh on a fixed cadence (30s or 60s in the
//! original flows). Instead of an ad hoc timer whose teardown is the
//! caller's problem, polling here is a scoped resource: [`PollHandle`]
//! is acquired when the owning view appears and released when it goes
//! away. Both [`PollHandle::stop`] and dropping the handle guarantee no
//! further ticks are dispatched — an orphaned timer cannot outlive its
//! owner.

use std::future::Future;
use std::time::Duration;

/// Handle to a running poll loop. Dropping it cancels the loop.
#[derive(Debug)]
pub struct PollHandle {
    task: tokio::task::JoinHandle<()>,
    label: &'static str,
}

impl PollHandle {
    /// Spawns a poll loop that runs `tick` every `period`.
    ///
    /// The first tick fires after one full period, matching timer
    /// semantics where acquisition itself does not refresh (the caller
    /// has just fetched). Ticks never overlap: a tick that outruns the
    /// period delays the next one.
    pub fn spawn<F, Fut>(label: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        log::debug!("[{label}] polling every {period:?}");
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // A tokio interval completes its first tick immediately;
            // swallow it so the loop waits a full period first.
            interval.tick().await;
            loop {
                interval.tick().await;
                tick().await;
            }
        });
        Self { task, label }
    }

    /// Stops the poll loop. Idempotent; safe to call before drop.
    pub fn stop(&self) {
        log::debug!("[{}] polling stopped", self.label);
        self.task.abort();
    }

    /// Whether the loop has fully wound down.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
