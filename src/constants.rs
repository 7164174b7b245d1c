//! LoRaWAN ADR Constants
//!
//! This module defines constants used by the ADR engine, based on the
//! LoRaWAN 1.0.x MAC layer and the regional parameters.

/// LinkADRReq command identifier (network to device)
pub const LINK_ADR_REQ: u8 = 0x03;

/// LinkADRReq payload length in bytes
pub const LINK_ADR_REQ_LEN: usize = 4;

/// Largest value a 4-bit MAC field can carry (DataRate, TXPower, NbTrans)
pub const MAC_NIBBLE_MAX: u8 = 0x0F;

/// Largest value of the 3-bit ChMaskCntl field
pub const CH_MASK_CNTL_MAX: u8 = 0x07;

/// Number of channels addressable by one 16-bit channel mask
pub const CH_MASK_BITS: usize = 16;

// ----------------------------------------------------------------------------
// Decision defaults
// ----------------------------------------------------------------------------

/// Installation margin subtracted from the link budget (dB)
pub const DEFAULT_ADR_MARGIN_DB: f32 = 15.0;

/// Link budget consumed by one data-rate or power step (dB)
pub const ADR_STEP_DB: f32 = 3.0;

/// Frames needed before a decision is considered meaningful
pub const DEFAULT_MIN_HISTORY: usize = 20;

/// Frames kept per device before the oldest is evicted
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// NbTrans bounds for unconfirmed uplinks
pub const MIN_NB_TRANS: u8 = 1;
pub const MAX_NB_TRANS: u8 = 3;

/// Loss percentage below which redundancy is reduced; exactly 5% keeps it
pub const LOSS_REDUCE_BELOW: u8 = 5;

/// Loss percentage below which redundancy is kept
pub const LOSS_KEEP_BELOW: u8 = 15;

/// Loss percentage below which one retransmission is added; above it NbTrans is maxed
pub const LOSS_INCREASE_BELOW: u8 = 25;

/// Deadline for a single history store call (ms)
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 500;
