//! Graceful shutdown controller.
//!
//! When enabled via [`crate::app::App::with_graceful_shutdown`], the server stops accepting
//! new connections as soon as `SIGINT`/`SIGTERM` (or `Ctrl+C` on platforms without `SIGTERM`)
//! is observed, then gives in-flight requests a grace period to finish on their own before
//! forcing the remainder closed.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Default time given to in-flight requests to finish after a shutdown signal, before the
/// controller stops waiting and lets the server exit regardless.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Tracks in-flight connections and coordinates a graceful shutdown across the accept loop.
///
/// `trigger()` is called once, by the signal listener task; `active_guard()` is called once
/// per accepted connection so the controller knows when it is safe to stop waiting.
pub(crate) struct ShutdownController {
    notify: Arc<Notify>,
    triggered: AtomicBool,
    active: Arc<AtomicUsize>,
    grace_period: Duration,
}

impl ShutdownController {
    /// Creates a controller with the given grace period.
    pub(crate) fn new(grace_period: Duration) -> Self {
        ShutdownController {
            notify: Arc::new(Notify::new()),
            triggered: AtomicBool::new(false),
            active: Arc::new(AtomicUsize::new(0)),
            grace_period,
        }
    }

    /// Registers one in-flight connection; drop the returned guard when it completes.
    pub(crate) fn active_guard(&self) -> ActiveGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ActiveGuard { active: Arc::clone(&self.active) }
    }

    /// Signals that the accept loop should stop taking new connections. Idempotent: only the
    /// first call has any effect, matching the "exactly once" `SIGINT`/`SIGTERM` contract.
    pub(crate) fn trigger(&self) {
        if self
            .triggered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.notify.notify_waiters();
        }
    }

    /// Resolves once `trigger()` has been called.
    pub(crate) async fn triggered(&self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        self.notify.notified().await;
    }

    /// Waits for every in-flight connection to finish, up to the configured grace period.
    /// Returns once the count reaches zero or the deadline passes, whichever is first.
    pub(crate) async fn wait_for_drain(&self) {
        let deadline = tokio::time::Instant::now() + self.grace_period;
        while self.active.load(Ordering::SeqCst) > 0 {
            if tokio::time::Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    /// Spawns the platform signal listener that calls [`Self::trigger`] on `SIGINT`/`SIGTERM`.
    pub(crate) fn spawn_signal_listener(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            wait_for_shutdown_signal().await;
            controller.trigger();
        });
    }
}

/// A permit representing one in-flight connection; decrements the active count on drop.
pub(crate) struct ActiveGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
