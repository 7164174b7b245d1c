//! In-memory frame history store.
//!
//! One [`FrameRing`] per device behind a single map lock. Lock hold times are
//! a hash lookup plus a slot write, so devices do not contend in practice.

use super::{DeviceKey, Frame, FrameHistoryStore, FrameRing};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Statistics for store monitoring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    /// Devices with at least one frame
    pub devices: usize,
    /// Frames held across all devices
    pub frames: usize,
    /// Frames evicted because a ring was full
    pub evictions: u64,
}

/// Process-local [`FrameHistoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryHistoryStore {
    inner: Arc<Mutex<HashMap<DeviceKey, FrameRing>>>,
    capacity: usize,
}

impl MemoryHistoryStore {
    /// Create a store keeping at most `capacity` frames per device
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    /// Frames kept per device
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current occupancy
    pub fn stats(&self) -> Result<HistoryStats, StoreError> {
        let inner = self.lock()?;
        Ok(HistoryStats {
            devices: inner.values().filter(|r| !r.is_empty()).count(),
            frames: inner.values().map(FrameRing::len).sum(),
            evictions: inner.values().map(FrameRing::evictions).sum(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<DeviceKey, FrameRing>>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("history lock poisoned".to_string()))
    }
}

#[async_trait]
impl FrameHistoryStore for MemoryHistoryStore {
    async fn push(&self, key: &DeviceKey, frame: Frame) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let capacity = self.capacity;
        inner
            .entry(key.clone())
            .or_insert_with(|| FrameRing::new(capacity))
            .push(frame);
        Ok(())
    }

    async fn get(&self, key: &DeviceKey) -> Result<Vec<Frame>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.get(key).map(FrameRing::snapshot).unwrap_or_default())
    }

    async fn clear(&self, key: &DeviceKey) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.remove(key);
        Ok(())
    }

    fn max_frames(&self) -> Option<usize> {
        Some(self.capacity)
    }
}
