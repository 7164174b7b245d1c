//! Unit tests for the logging helpers in the `lorawan-adr` crate.

use lorawan_adr::logging::{
    init_logger, init_logger_with_level, log_debug, log_error, log_info, log_warn, OPERATOR_TARGET,
};
use lorawan_adr::MacCommand;

/// The helpers must not panic whether or not a logger is installed.
#[test]
fn test_logging() {
    log_error("ADR decision failed");
    log_warn("history below threshold");
    log_info("LinkADRReq emitted");
    log_debug("frame recorded");
}

/// Initialization is idempotent: later calls leave the first logger in place.
#[test]
fn test_init_logger() {
    init_logger();
    init_logger_with_level(log::LevelFilter::Debug);
    init_logger();
}

/// Anything printable can be reported, including MAC commands and lazily
/// formatted arguments.
#[test]
fn test_logging_display_values() {
    init_logger_with_level(log::LevelFilter::Debug);
    let cmd = MacCommand::new(0x03, vec![0x51u8, 0xFF, 0x00, 0x01]);
    log_info(&cmd);
    log_debug(format_args!("emitted {cmd} for {}", "app/dev"));
    assert!(OPERATOR_TARGET.starts_with("lorawan_adr"));
}
