use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::EventSeriesStore;

pub type SharedStore = Arc<StoreHandle>;

struct Current {
    store: EventSeriesStore,
    changed_at: DateTime<Utc>,
}

/// Holds the single current snapshot. Mutators run while the lock is held,
/// so each read-then-replace is atomic with respect to other callers.
pub struct StoreHandle {
    current: Mutex<Current>,
}

impl StoreHandle {
    pub fn new(store: EventSeriesStore) -> Self {
        StoreHandle {
            current: Mutex::new(Current {
                store,
                changed_at: Utc::now(),
            }),
        }
    }

    pub fn shared(store: EventSeriesStore) -> SharedStore {
        Arc::new(Self::new(store))
    }

    pub fn snapshot(&self) -> EventSeriesStore {
        self.lock().store.clone()
    }

    /// Snapshot plus the time it last changed
    pub fn snapshot_with_time(&self) -> (EventSeriesStore, DateTime<Utc>) {
        let current = self.lock();
        (current.store.clone(), current.changed_at)
    }

    /// Replaces the snapshot with the one `f` derives from it
    pub fn apply<T>(&self, f: impl FnOnce(&EventSeriesStore) -> (EventSeriesStore, T)) -> T {
        let mut current = self.lock();
        let (next, out) = f(&current.store);
        Self::replace(&mut current, next);
        out
    }

    /// Like `apply`, but a failing `f` leaves the snapshot untouched
    pub fn try_apply<T, E>(
        &self,
        f: impl FnOnce(&EventSeriesStore) -> Result<(EventSeriesStore, T), E>,
    ) -> Result<T, E> {
        let mut current = self.lock();
        let (next, out) = f(&current.store)?;
        Self::replace(&mut current, next);
        Ok(out)
    }

    fn replace(current: &mut Current, next: EventSeriesStore) {
        if next.revision() != current.store.revision() {
            current.changed_at = Utc::now();
        }
        current.store = next;
    }

    // The snapshot is swapped in one assignment, so a poisoned lock still
    // guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::seed::{initial_store, MAIN_SERIES};

    #[test]
    fn test_apply_replaces_snapshot() {
        let handle = StoreHandle::new(initial_store(MAIN_SERIES).unwrap());
        let before = handle.snapshot();

        let applied = handle.apply(|store| {
            let result = store.delete_event(1);
            (result.store, result.applied)
        });
        assert!(applied);
        assert!(handle.snapshot().find_event(1).is_none());
        // the earlier snapshot is a separate value
        assert!(before.find_event(1).is_some());
    }

    #[test]
    fn test_failed_try_apply_keeps_snapshot() {
        let handle = StoreHandle::new(initial_store(MAIN_SERIES).unwrap());
        let (_, changed_at) = handle.snapshot_with_time();

        let result: Result<(), StoreError> = handle.try_apply(|store| {
            let next = store.select("No Such Series")?;
            Ok((next, ()))
        });
        assert!(result.is_err());
        let (store, after) = handle.snapshot_with_time();
        assert_eq!(store.revision(), 0);
        assert_eq!(after, changed_at);
    }
}
