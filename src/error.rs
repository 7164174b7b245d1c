//! # ADR Error Handling
//!
//! This module defines the AdrError enum, which represents the different error
//! types that can occur in the lorawan-adr crate, and the StoreError enum
//! reported by frame history backends.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by a frame history backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backing medium could not be reached or refused the operation.
    #[error("History store unavailable: {0}")]
    Unavailable(String),

    /// The operation did not complete within the configured deadline.
    #[error("History store timed out after {0:?}")]
    Timeout(Duration),
}

/// Represents the different error types that can occur in the ADR engine.
#[derive(Debug, Error)]
pub enum AdrError {
    /// The uplink is missing a protocol substructure the handler needs.
    #[error("Malformed uplink: {0}")]
    MalformedUplink(String),

    /// The downlink is missing a protocol substructure the handler needs.
    #[error("Malformed downlink: {0}")]
    MalformedDownlink(String),

    /// The device is configured for a region this engine does not know.
    #[error("Unknown band: {0}")]
    UnknownBand(String),

    /// The device's data rate is not defined for its band.
    #[error("Invalid data rate {data_rate} for band {band}")]
    InvalidDataRate { band: String, data_rate: String },

    /// The device's transmit power is not a power level of its band.
    #[error("Invalid TX power {dbm} dBm for band {band}")]
    InvalidTxPower { band: String, dbm: i8 },

    /// A MAC command payload had the wrong length.
    #[error("Invalid MAC payload length: expected {expected}, got {actual}")]
    MacPayloadLength { expected: usize, actual: usize },

    /// A MAC command with an unexpected command identifier was handed to a decoder.
    #[error("Unexpected MAC command: 0x{0:02X}")]
    UnexpectedCommand(u8),

    /// A MAC command field does not fit its bit width.
    #[error("{field} out of range: {value} (max {max})")]
    FieldOutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },

    /// The configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The frame history store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdrError {
    /// Whether retrying on the next uplink may succeed without upstream changes.
    pub fn is_transient(&self) -> bool {
        matches!(self, AdrError::Store(_))
    }
}

impl From<std::io::Error> for AdrError {
    fn from(err: std::io::Error) -> Self {
        AdrError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AdrError {
    fn from(err: serde_json::Error) -> Self {
        AdrError::Config(err.to_string())
    }
}
