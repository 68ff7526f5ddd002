use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// What asked the dashboard to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelSource {
    ExitKey,
    Interrupt,
    Terminate,
    InputClosed,
}

impl fmt::Display for CancelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CancelSource::ExitKey => "exit key",
            CancelSource::Interrupt => "SIGINT",
            CancelSource::Terminate => "SIGTERM",
            CancelSource::InputClosed => "input closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared stop signal. Goes from not-cancelled to cancelled once and stays there.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    inner: Arc<Inner>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that performed the transition.
    pub fn cancel(&self, source: CancelSource) -> bool {
        let first = !self.inner.cancelled.swap(true, Ordering::SeqCst);
        if first {
            tracing::info!(%source, "cancellation requested");
            self.inner.notify.notify_waiters();
        }
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called, immediately if it already was.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a concurrent cancel cannot slip between.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Runs the terminal restore routine exactly once, when dropped.
pub struct TerminalGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> TerminalGuard<F> {
    pub fn new(restore: F) -> Self {
        TerminalGuard {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Cancels on SIGINT or (on Unix) SIGTERM. Returns early if cancelled elsewhere.
pub async fn watch_signals(cancel: Cancellation) {
    let source = tokio::select! {
        _ = interrupt() => CancelSource::Interrupt,
        _ = terminate() => CancelSource::Terminate,
        _ = cancel.cancelled() => return,
    };
    cancel.cancel(source);
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for SIGINT");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::*;

    #[test]
    fn cancel_is_monotonic_and_idempotent() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert!(cancel.cancel(CancelSource::ExitKey));
        assert!(cancel.is_cancelled());
        assert!(!cancel.cancel(CancelSource::Interrupt));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let cancel = Cancellation::new();
        let observer = cancel.clone();
        cancel.cancel(CancelSource::Terminate);
        assert!(observer.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wakes_waiters() {
        let cancel = Cancellation::new();
        let trigger = cancel.clone();
        let waiter = tokio::spawn(async move {
            cancel.cancelled().await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel(CancelSource::ExitKey);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter not woken")
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_when_already_set() {
        let cancel = Cancellation::new();
        cancel.cancel(CancelSource::InputClosed);
        cancel.cancelled().await;
    }

    #[tokio::test]
    async fn signal_watcher_exits_when_cancelled_elsewhere() {
        let cancel = Cancellation::new();
        cancel.cancel(CancelSource::ExitKey);
        watch_signals(cancel).await;
    }

    #[test]
    fn guard_restores_exactly_once() {
        let calls = Cell::new(0);
        {
            let _guard = TerminalGuard::new(|| calls.set(calls.get() + 1));
            assert_eq!(calls.get(), 0);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancel_source_names() {
        assert_eq!(CancelSource::ExitKey.to_string(), "exit key");
        assert_eq!(CancelSource::Terminate.to_string(), "SIGTERM");
    }
}
