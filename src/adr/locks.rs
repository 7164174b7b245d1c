//! Per-device serialisation.
//!
//! Work for one device runs under that device's async mutex; the map lock is
//! only held while looking up, inserting or removing the entry. An entry lives
//! only as long as some task holds or waits on it.

use crate::history::DeviceKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<DeviceKey, Arc<AsyncMutex<()>>>;

/// Lock-per-key map
#[derive(Debug, Default, Clone)]
pub struct DeviceLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive access to one device; dropping it unlocks the device and
/// forgets the key if nobody else is waiting
#[derive(Debug)]
pub struct DeviceGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: DeviceLocks,
    key: DeviceKey,
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        // Unlock first so our own reference no longer counts
        drop(self.guard.take());
        self.locks.release(&self.key);
    }
}

impl DeviceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub async fn acquire(&self, key: &DeviceKey) -> DeviceGuard {
        let lock = Arc::clone(self.map().entry(key.clone()).or_default());
        DeviceGuard {
            guard: Some(lock.lock_owned().await),
            locks: self.clone(),
            key: key.clone(),
        }
    }

    /// Number of devices currently locked or waited on
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, key: &DeviceKey) {
        let mut locks = self.map();
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }

    fn map(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
