//! Once-per-second play time counter for the active slot.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// Increments a manager-owned seconds counter while enabled.
///
/// The tracker only holds a [`Weak`] reference to the counter. When the
/// manager rebinds to a new slot it drops the old counter, and any tick that
/// fails to upgrade stops the task instead of touching freed state. Dropping
/// the tracker aborts the task.
pub struct PlaytimeTracker {
    counter: Weak<AtomicU64>,
    enabled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PlaytimeTracker {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Start ticking `counter` every `period` on `runtime`.
    pub fn spawn(runtime: &Handle, counter: &Arc<AtomicU64>, period: Duration) -> Self {
        let weak = Arc::downgrade(counter);
        let enabled = Arc::new(AtomicBool::new(true));

        let task = {
            let weak = weak.clone();
            let enabled = Arc::clone(&enabled);
            runtime.spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // first tick completes immediately
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if !advance(&weak, &enabled) {
                        debug!("Playtime counter released, tracker stopping");
                        break;
                    }
                }
            })
        };

        Self {
            counter: weak,
            enabled,
            task,
        }
    }

    /// Pause or resume counting. The accumulated value is kept either way.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Apply one tick immediately. Returns `false` once the counter is gone.
    pub fn tick(&self) -> bool {
        advance(&self.counter, &self.enabled)
    }

    pub fn is_bound(&self) -> bool {
        self.counter.strong_count() > 0
    }
}

impl Drop for PlaytimeTracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn advance(counter: &Weak<AtomicU64>, enabled: &AtomicBool) -> bool {
    let Some(counter) = counter.upgrade() else {
        return false;
    };
    if enabled.load(Ordering::Relaxed) {
        let seconds = counter.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("Seconds played: {}", seconds);
    }
    true
}
