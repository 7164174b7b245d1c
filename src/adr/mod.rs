//! # Adaptive Data Rate Engine
//!
//! Network-side ADR: every ADR-enabled uplink is recorded in the device's
//! frame history, and when a downlink opportunity comes up for a device that
//! is owed an ADR command the engine decides whether to send a LinkADRReq.
//!
//! ## Decision
//!
//! - The best SNR in the window minus the current data rate's demodulation
//!   floor minus the safety margin gives the spare link budget.
//! - Each full step of budget (3 dB) raises the data rate by one, up to the
//!   band's ADR maximum; leftover steps lower transmit power.
//! - Frame counter gaps in the window set the retransmission count.
//!
//! ## Usage
//!
//! ```rust
//! use lorawan_adr::{AdrConfig, AdrEngine, Device, DownlinkMessage, MemoryHistoryStore};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let engine = AdrEngine::new(MemoryHistoryStore::new(32), AdrConfig::default());
//! let mut device = Device::new("app", "dev");
//! let mut downlink = DownlinkMessage::new();
//!
//! // Nothing is owed to a fresh device
//! engine.handle_downlink_adr(&mut downlink, &mut device).await.unwrap();
//! assert!(downlink.f_opts().is_empty());
//! # });
//! ```

pub mod decision;
mod downlink;
pub mod locks;
pub mod stats;
mod uplink;

use crate::config::AdrConfig;
use crate::error::{AdrError, StoreError};
use crate::history::{DeviceKey, Frame, FrameHistoryStore, MemoryHistoryStore};
use log::warn;
use std::future::Future;
use std::sync::Arc;

pub use decision::{decide, AdrDecision, LinkSettings};
pub use locks::{DeviceGuard, DeviceLocks};
pub use stats::{loss_percentage, max_snr};

/// ADR engine bound to a frame history backend
pub struct AdrEngine<S: FrameHistoryStore> {
    store: Arc<S>,
    config: AdrConfig,
    locks: DeviceLocks,
}

impl<S: FrameHistoryStore> Clone for AdrEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            locks: self.locks.clone(),
        }
    }
}

impl<S: FrameHistoryStore> AdrEngine<S> {
    /// Create an engine over `store`
    pub fn new(store: S, config: AdrConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create an engine over a store shared with other components
    ///
    /// A store that keeps fewer frames than `min_history` can never trigger a
    /// decision; this is logged as a warning.
    pub fn with_shared_store(store: Arc<S>, config: AdrConfig) -> Self {
        let engine = Self {
            store,
            config,
            locks: DeviceLocks::new(),
        };
        if let Err(e) = engine.check_store_capacity() {
            warn!("ADR: {e}");
        }
        engine
    }

    /// Whether the store keeps enough frames per device to reach `min_history`
    pub fn check_store_capacity(&self) -> Result<(), AdrError> {
        match self.store.max_frames() {
            Some(max) if max < self.config.min_history => Err(AdrError::Config(format!(
                "history store keeps {max} frames per device, decisions need {}",
                self.config.min_history
            ))),
            _ => Ok(()),
        }
    }

    pub fn config(&self) -> &AdrConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn locks(&self) -> &DeviceLocks {
        &self.locks
    }

    /// Current history of a device
    pub async fn frames(&self, key: &DeviceKey) -> Result<Vec<Frame>, AdrError> {
        self.with_timeout(self.store.get(key)).await
    }

    /// Run a store call under the configured deadline
    async fn with_timeout<T, F>(&self, call: F) -> Result<T, AdrError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let deadline = self.config.store_timeout();
        match tokio::time::timeout(deadline, call).await {
            Ok(result) => result.map_err(AdrError::from),
            Err(_) => Err(AdrError::Store(StoreError::Timeout(deadline))),
        }
    }
}

impl AdrEngine<MemoryHistoryStore> {
    /// Create an engine over an in-memory store sized by `history_capacity`
    pub fn in_memory(config: AdrConfig) -> Self {
        Self::new(MemoryHistoryStore::new(config.history_capacity), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_follows_config() {
        let config = AdrConfig {
            history_capacity: 48,
            ..Default::default()
        };
        let engine = AdrEngine::in_memory(config);
        assert_eq!(engine.store().capacity(), 48);
        assert!(engine.check_store_capacity().is_ok());
    }

    #[test]
    fn test_undersized_store_reported() {
        let engine = AdrEngine::new(MemoryHistoryStore::new(8), AdrConfig::default());
        let err = engine.check_store_capacity().unwrap_err();
        assert!(matches!(err, AdrError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: history store keeps 8 frames per device, decisions need 20"
        );
    }
}
