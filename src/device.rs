//! # Device ADR State
//!
//! The slice of the registry's device record the ADR engine reads and writes.
//! The registry owns the record; the engine mutates it in place while holding
//! the device's lock.

use crate::history::DeviceKey;
use serde::{Deserialize, Serialize};

/// ADR fields of a device record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdrState {
    /// Data rate identifier last reported by the device, e.g. "SF8BW125"
    pub data_rate: Option<String>,
    /// Regional band identifier, e.g. "EU_863_870"
    pub band: Option<String>,
    /// Transmit power in dBm; `None` until the first LinkADRReq, meaning the band default
    pub tx_power: Option<i8>,
    /// Transmissions per unconfirmed uplink
    pub nb_trans: u8,
    /// A LinkADRReq is owed to the device
    pub send_req: bool,
    /// Installation margin in dB overriding the engine default
    pub margin: Option<f32>,
}

impl Default for AdrState {
    fn default() -> Self {
        Self {
            data_rate: None,
            band: None,
            tx_power: None,
            nb_trans: 1,
            send_req: false,
            margin: None,
        }
    }
}

/// Device record as seen by the ADR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub app_id: String,
    pub dev_id: String,
    #[serde(default)]
    pub adr: AdrState,
}

impl Device {
    pub fn new(app_id: impl Into<String>, dev_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            dev_id: dev_id.into(),
            adr: AdrState::default(),
        }
    }

    /// Key the device's frame history is stored under
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.app_id.clone(), self.dev_id.clone())
    }
}
