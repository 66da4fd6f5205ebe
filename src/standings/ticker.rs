use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::SharedStore;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(3000);

/// Periodic live-score updates for one mounted leaderboard view.
///
/// `mount` spawns a tokio task that ticks the selected series' leaderboard
/// every `period`; `unmount` aborts it. Dropping the ticker aborts it too.
pub struct LiveTicker {
    store: SharedStore,
    period: Duration,
    seed: Option<u64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LiveTicker {
    pub fn new(store: SharedStore, period: Duration, seed: Option<u64>) -> Self {
        LiveTicker {
            store,
            // tokio's interval rejects a zero period
            period: period.max(Duration::from_millis(1)),
            seed,
            task: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts ticking. Returns false if a task is already running.
    /// Must be called from inside a tokio runtime.
    pub fn mount(&self) -> bool {
        let mut task = self.lock();
        if task.as_ref().map_or(false, |h| !h.is_finished()) {
            return false;
        }

        let store = self.store.clone();
        let period = self.period;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        *task = Some(tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticks.tick().await;
            loop {
                ticks.tick().await;
                let revision = store.apply(|s| {
                    let next = s.tick_leaderboard(&mut rng);
                    let revision = next.revision();
                    (next, revision)
                });
                debug!(revision, "Leaderboard ticked");
            }
        }));
        info!(period_ms = period.as_millis() as u64, "Live ticker mounted");
        true
    }

    /// Stops ticking. Safe to call any number of times; returns whether a
    /// running task was stopped.
    pub fn unmount(&self) -> bool {
        match self.lock().take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    info!("Live ticker unmounted");
                }
                was_running
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().as_ref().map_or(false, |h| !h.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for LiveTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{initial_store, MAIN_SERIES};
    use crate::store::StoreHandle;

    fn ticker(period_ms: u64) -> (SharedStore, LiveTicker) {
        let store = StoreHandle::shared(initial_store(MAIN_SERIES).unwrap());
        let ticker = LiveTicker::new(store.clone(), Duration::from_millis(period_ms), Some(7));
        (store, ticker)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (store, ticker) = ticker(3000);
        assert!(ticker.mount());
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(9500)).await;
        assert_eq!(store.snapshot().revision(), 3);

        let snapshot = store.snapshot();
        let live = snapshot.selected().leaderboard.iter().filter(|t| t.live).count();
        assert_eq!(live, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_mount_is_rejected() {
        let (store, ticker) = ticker(1000);
        assert!(ticker.mount());
        assert!(!ticker.mount());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        // one task, so two ticks rather than four
        assert_eq!(store.snapshot().revision(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_ticks_and_is_idempotent() {
        let (store, ticker) = ticker(1000);
        assert!(!ticker.unmount());

        ticker.mount();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(ticker.unmount());
        assert!(!ticker.unmount());
        assert!(!ticker.is_running());

        let revision = store.snapshot().revision();
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(store.snapshot().revision(), revision);

        // remounting after unmount starts a fresh task
        assert!(ticker.mount());
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(store.snapshot().revision(), revision + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (store, ticker) = ticker(1000);
        ticker.mount();
        drop(ticker);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(store.snapshot().revision(), 0);
    }
}
