//! # Per-Device Frame History
//!
//! The ADR decision is made over a window of recent uplinks. This module
//! defines the observation record ([`Frame`]), the device identity it is keyed
//! by ([`DeviceKey`]), and the [`FrameHistoryStore`] interface the engine
//! talks to.
//!
//! Backends only need to keep frames per device in push order with a bounded
//! size. [`MemoryHistoryStore`] is the in-process implementation; remote
//! backends implement the same trait and report failures as
//! [`StoreError::Unavailable`].

pub mod memory;
pub mod ring;

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use memory::MemoryHistoryStore;
pub use ring::FrameRing;

/// One observed uplink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Uplink frame counter
    pub f_cnt: u32,
    /// Best SNR across the receiving gateways (dB)
    pub snr: f32,
    /// Number of gateways that received the frame
    pub gateway_count: u32,
}

impl Frame {
    pub fn new(f_cnt: u32, snr: f32, gateway_count: u32) -> Self {
        Self {
            f_cnt,
            snr,
            gateway_count,
        }
    }
}

/// Identity of a device: application plus device identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceKey {
    pub app_id: String,
    pub dev_id: String,
}

impl DeviceKey {
    pub fn new(app_id: impl Into<String>, dev_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            dev_id: dev_id.into(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_id, self.dev_id)
    }
}

/// Ordered, bounded per-device frame log
#[async_trait]
pub trait FrameHistoryStore: Send + Sync {
    /// Append one frame to the device's history
    async fn push(&self, key: &DeviceKey, frame: Frame) -> Result<(), StoreError>;

    /// Snapshot of the device's history in push order
    async fn get(&self, key: &DeviceKey) -> Result<Vec<Frame>, StoreError>;

    /// Remove every frame of the device
    async fn clear(&self, key: &DeviceKey) -> Result<(), StoreError>;

    /// Frames kept per device, if the backend bounds it
    fn max_frames(&self) -> Option<usize> {
        None
    }
}
