//! Unit tests for the `AdrError` and `StoreError` enums and their `Display` output.

use lorawan_adr::error::{AdrError, StoreError};
use std::time::Duration;

/// Tests that the `MalformedUplink` variant is correctly formatted.
#[test]
fn test_malformed_uplink_error() {
    let err = AdrError::MalformedUplink("missing MAC payload".to_string());
    assert_eq!(err.to_string(), "Malformed uplink: missing MAC payload");
}

/// Tests that the `UnknownBand` variant is correctly formatted.
#[test]
fn test_unknown_band_error() {
    let err = AdrError::UnknownBand("INVALID".to_string());
    assert_eq!(err.to_string(), "Unknown band: INVALID");
}

/// Tests that the `InvalidDataRate` variant names the band.
#[test]
fn test_invalid_data_rate_error() {
    let err = AdrError::InvalidDataRate {
        band: "EU_863_870".to_string(),
        data_rate: "SF6BW125".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid data rate SF6BW125 for band EU_863_870");
}

/// Tests that the `InvalidTxPower` variant is correctly formatted.
#[test]
fn test_invalid_tx_power_error() {
    let err = AdrError::InvalidTxPower {
        band: "EU_863_870".to_string(),
        dbm: 13,
    };
    assert_eq!(err.to_string(), "Invalid TX power 13 dBm for band EU_863_870");
}

/// Tests that the `MacPayloadLength` variant is correctly formatted.
#[test]
fn test_mac_payload_length_error() {
    let err = AdrError::MacPayloadLength { expected: 4, actual: 3 };
    assert_eq!(err.to_string(), "Invalid MAC payload length: expected 4, got 3");
}

/// Tests that the `UnexpectedCommand` variant prints the CID in hex.
#[test]
fn test_unexpected_command_error() {
    let err = AdrError::UnexpectedCommand(0x0A);
    assert_eq!(err.to_string(), "Unexpected MAC command: 0x0A");
}

/// Tests that store errors pass their message through unchanged.
#[test]
fn test_store_error_is_transparent() {
    let err = AdrError::from(StoreError::Unavailable("connection refused".to_string()));
    assert_eq!(err.to_string(), "History store unavailable: connection refused");

    let err = AdrError::from(StoreError::Timeout(Duration::from_millis(500)));
    assert_eq!(err.to_string(), "History store timed out after 500ms");
}

/// Only store failures are worth retrying.
#[test]
fn test_is_transient() {
    assert!(AdrError::Store(StoreError::Unavailable("down".into())).is_transient());
    assert!(!AdrError::UnknownBand("INVALID".into()).is_transient());
    assert!(!AdrError::Config("bad".into()).is_transient());
}

/// Tests that JSON failures surface as configuration errors.
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
    let err: AdrError = json_err.into();
    assert!(matches!(err, AdrError::Config(_)));
    assert!(err.to_string().starts_with("Configuration error: "));
}
