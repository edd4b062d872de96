//! Periodic background refresh.
//!
//! A refresh task calls its tick function once per period. Consecutive
//! failures stretch the delay exponentially up to a cap; the first success
//! restores the normal period. Ticks are silent: failures are logged, never
//! surfaced. The task stops when its [`RefreshHandle`] is cancelled or
//! dropped.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub period: Duration,
    pub max_backoff: Duration,
}

impl RefreshPolicy {
    /// Delay before the next tick after `failures` consecutive failures.
    pub fn delay_after(&self, failures: u32) -> Duration {
        let factor = 1u32.checked_shl(failures.min(31)).unwrap_or(u32::MAX);
        self.period
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff.max(self.period))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Running,
    Paused,
    Cancelled,
}

/// Owner of a running refresh task.
#[derive(Debug)]
pub struct RefreshHandle {
    control: watch::Sender<Control>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop ticking until [`resume`](Self::resume). A pending delay is
    /// discarded.
    pub fn pause(&self) {
        self.control.send_replace(Control::Paused);
    }

    /// Start ticking again; the next tick comes one full period later.
    pub fn resume(&self) {
        self.control.send_if_modified(|c| {
            if *c == Control::Paused {
                *c = Control::Running;
                true
            } else {
                false
            }
        });
    }

    pub fn is_paused(&self) -> bool {
        *self.control.borrow() == Control::Paused
    }

    pub fn cancel(&self) {
        self.control.send_replace(Control::Cancelled);
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a refresh task. `tick` reports whether the refresh succeeded.
pub fn spawn_refresh<F, Fut>(policy: RefreshPolicy, mut tick: F) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let (control, mut rx) = watch::channel(Control::Running);

    let task = tokio::spawn(async move {
        let mut failures: u32 = 0;
        loop {
            loop {
                let state = *rx.borrow_and_update();
                match state {
                    Control::Running => break,
                    Control::Cancelled => return,
                    Control::Paused => {}
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }

            let delay = policy.delay_after(failures);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    continue;
                }
            }

            if tick().await {
                failures = 0;
                trace!("refresh tick ok");
            } else {
                failures = failures.saturating_add(1);
                debug!(
                    failures,
                    next_delay_ms = policy.delay_after(failures).as_millis() as u64,
                    "refresh tick failed"
                );
            }
        }
    });

    RefreshHandle { control, task }
}
