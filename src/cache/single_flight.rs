//! Keyed single-flight guard.
//!
//! Serializes fetch-and-populate critical sections per request key so that
//! at most one fetch for a given resource is in flight at a time. A late
//! arrival blocks until the leader finishes, then re-reads the cache instead
//! of issuing a duplicate request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A keyed mutex: one lock per request key, created on demand.
#[derive(Debug, Default)]
pub struct SingleFlight {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SingleFlight {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// Callers racing on the same key execute `f` one at a time; callers on
    /// different keys do not contend.
    pub fn run<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lock = {
            let mut locks = self.locks.lock().expect("single-flight registry poisoned");
            Arc::clone(locks.entry(key.to_string()).or_default())
        };

        let _guard = lock.lock().expect("single-flight key lock poisoned");
        f()
    }
}
