//! Capacity-bounded, in-memory store for per-condition alert histories.

use std::{
    collections::{HashMap, VecDeque},
    num::NonZeroUsize,
};

use parking_lot::Mutex;

use crate::models::AlertHistory;

/// Bounded map from alert pattern to [`AlertHistory`].
///
/// When inserting a new pattern would exceed the capacity, the
/// oldest-inserted entry is evicted. Replacing an existing pattern's history
/// keeps its insertion slot, so a busy condition does not outlive the bound
/// just by being updated.
///
/// The store is rebuilt from scratch on restart; still-active conditions
/// simply replay their first-sighting behavior.
#[derive(Debug)]
pub struct HistoryStore {
    capacity: NonZeroUsize,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, AlertHistory>,
    insertion_order: VecDeque<String>,
}

impl HistoryStore {
    /// Creates an empty store bounded to `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity, inner: Mutex::new(Inner::default()) }
    }

    /// Returns a copy of the history for `pattern`, if present.
    pub fn get(&self, pattern: &str) -> Option<AlertHistory> {
        self.inner.lock().entries.get(pattern).cloned()
    }

    /// Returns whether `pattern` currently has a history.
    pub fn contains_key(&self, pattern: &str) -> bool {
        self.inner.lock().entries.contains_key(pattern)
    }

    /// Inserts or replaces the history for `pattern`, evicting the
    /// oldest-inserted entry if the capacity would be exceeded.
    pub fn put(&self, pattern: &str, history: AlertHistory) {
        let mut inner = self.inner.lock();
        if inner.entries.insert(pattern.to_owned(), history).is_some() {
            return;
        }
        inner.insertion_order.push_back(pattern.to_owned());
        while inner.entries.len() > self.capacity.get() {
            let Some(evicted) = inner.insertion_order.pop_front() else {
                break;
            };
            inner.entries.remove(&evicted);
            tracing::debug!(pattern = %evicted, "history store at capacity; evicted oldest entry");
        }
    }

    /// Number of tracked conditions.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns whether the store tracks no conditions.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
