//! # Uplink and Downlink Messages
//!
//! The parts of the network server's message types the ADR handlers touch.
//! Deduplication has already happened: an [`UplinkMessage`] carries the
//! metadata of every gateway that received the frame.
//!
//! Protocol substructures are optional because upstream decoding may not
//! have produced them; the handlers report their absence as malformed input.

use crate::mac::MacCommand;
use serde::{Deserialize, Serialize};

/// MAC header fields of an uplink relevant to ADR
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkMacPayload {
    /// Uplink frame counter
    pub f_cnt: u32,
    /// Device runs ADR
    pub adr: bool,
    /// Device asks the network to prove it is alive
    pub adr_ack_req: bool,
}

/// LoRaWAN protocol metadata of an uplink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorawanMetadata {
    /// Data rate the uplink was received at, e.g. "SF8BW125"
    pub data_rate: String,
    /// Frequency plan the receiving gateways operate, e.g. "EU_863_870"
    pub frequency_plan: Option<String>,
}

/// Reception metadata of a single gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayMetadata {
    pub gateway_id: String,
    /// Signal-to-noise ratio (dB)
    pub snr: f32,
    /// Received signal strength (dBm)
    pub rssi: f32,
}

/// MAC header fields of a downlink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownlinkMacPayload {
    /// Acknowledges the last uplink
    pub ack: bool,
    /// MAC commands piggybacked in FOpts
    pub f_opts: Vec<MacCommand>,
}

/// A downlink frame under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownlinkMessage {
    pub mac: Option<DownlinkMacPayload>,
}

impl DownlinkMessage {
    /// Downlink with an empty MAC payload
    pub fn new() -> Self {
        Self {
            mac: Some(DownlinkMacPayload::default()),
        }
    }

    /// FOpts, empty when there is no MAC payload
    pub fn f_opts(&self) -> &[MacCommand] {
        self.mac.as_ref().map(|m| m.f_opts.as_slice()).unwrap_or_default()
    }
}

/// A deduplicated uplink
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UplinkMessage {
    pub mac: Option<UplinkMacPayload>,
    pub lorawan: Option<LorawanMetadata>,
    pub gateways: Vec<GatewayMetadata>,
    /// Downlink the network server will answer with, if any
    pub response_template: Option<DownlinkMessage>,
}

impl UplinkMessage {
    /// Uplink received at `data_rate` with an empty response template
    pub fn new(f_cnt: u32, data_rate: impl Into<String>) -> Self {
        Self {
            mac: Some(UplinkMacPayload {
                f_cnt,
                ..Default::default()
            }),
            lorawan: Some(LorawanMetadata {
                data_rate: data_rate.into(),
                frequency_plan: None,
            }),
            gateways: Vec::new(),
            response_template: Some(DownlinkMessage::new()),
        }
    }

    /// Highest SNR across the receiving gateways, 0 when none reported
    pub fn best_snr(&self) -> f32 {
        self.gateways
            .iter()
            .map(|g| g.snr)
            .fold(None, |best: Option<f32>, snr| Some(best.map_or(snr, |b| b.max(snr))))
            .unwrap_or(0.0)
    }

    /// Number of gateways that received the uplink
    pub fn gateway_count(&self) -> u32 {
        self.gateways.len() as u32
    }
}
