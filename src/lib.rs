//! # lorawan-adr - Adaptive Data Rate for LoRaWAN Network Servers
//!
//! The lorawan-adr crate implements the network-side ADR control loop of a
//! LoRaWAN network server: it watches the link quality of each device's
//! uplinks and sends LinkADRReq MAC commands that move the device to the
//! fastest data rate, lowest transmit power and smallest retransmission count
//! that still deliver reliably.
//!
//! ## Features
//!
//! - Per-device frame history with bounded, oldest-first eviction
//! - Uplink handling of the ADR and ADRAckReq bits
//! - Link-margin based data rate and power selection
//! - Loss-driven retransmission count (NbTrans)
//! - Regional parameter tables for the common frequency plans
//! - LinkADRReq encoding and decoding
//! - Per-device serialisation with no global lock
//!
//! ## Usage
//!
//! ```rust
//! use lorawan_adr::{
//!     AdrConfig, AdrEngine, Device, DownlinkMessage, GatewayMetadata, LinkAdrReqPayload,
//!     MemoryHistoryStore, UplinkMessage,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let engine = AdrEngine::new(MemoryHistoryStore::new(32), AdrConfig::default());
//! let mut device = Device::new("my-app", "my-device");
//! device.adr.band = Some("EU_863_870".into());
//!
//! for f_cnt in 0..20 {
//!     let mut uplink = UplinkMessage::new(f_cnt, "SF8BW125");
//!     uplink.mac.as_mut().unwrap().adr = true;
//!     uplink.mac.as_mut().unwrap().adr_ack_req = f_cnt == 19;
//!     uplink.gateways.push(GatewayMetadata { gateway_id: "gw".into(), snr: 10.0, rssi: -80.0 });
//!     engine.handle_uplink_adr(&mut uplink, &mut device).await.unwrap();
//! }
//!
//! let mut downlink = DownlinkMessage::new();
//! engine.handle_downlink_adr(&mut downlink, &mut device).await.unwrap();
//! let req = LinkAdrReqPayload::from_mac_command(&downlink.f_opts()[0]).unwrap();
//! assert_eq!(req.data_rate, 5);
//! # });
//! ```

pub mod adr;
pub mod band;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod history;
pub mod logging;
pub mod mac;
pub mod message;

pub use crate::error::{AdrError, StoreError};
pub use crate::logging::{init_logger, log_info};

pub use adr::{decide, loss_percentage, max_snr, AdrDecision, AdrEngine, LinkSettings};
pub use band::{Band, BandParameters, DataRateSpec};
pub use config::{AdrConfig, LossThresholds};
pub use device::{AdrState, Device};
pub use history::{DeviceKey, Frame, FrameHistoryStore, MemoryHistoryStore};
pub use mac::{ChMask, LinkAdrReqPayload, MacCommand, Redundancy};
pub use message::{DownlinkMacPayload, DownlinkMessage, GatewayMetadata, LorawanMetadata, UplinkMacPayload, UplinkMessage};
