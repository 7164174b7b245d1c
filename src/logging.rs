use log::{log, log_enabled, Level};
use std::fmt;

/// Initializes the logger with the `env_logger` crate.
///
/// The filter is read from `RUST_LOG`; without it only warnings and errors
/// are printed.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();
}

/// Initializes the logger with an explicit default level.
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logger_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .try_init();
}

/// Log target for operator-facing messages from the CLI and embedding
/// services, separate from the engine's per-device `lorawan_adr::adr` logs.
pub const OPERATOR_TARGET: &str = "lorawan_adr::operator";

fn emit(level: Level, message: &dyn fmt::Display) {
    if log_enabled!(target: OPERATOR_TARGET, level) {
        log!(target: OPERATOR_TARGET, level, "{message}");
    }
}

/// Reports a failed decision or command to the operator.
pub fn log_error(message: impl fmt::Display) {
    emit(Level::Error, &message);
}

/// Reports a suspicious but recoverable condition, e.g. a short history.
pub fn log_warn(message: impl fmt::Display) {
    emit(Level::Warn, &message);
}

/// Reports an emitted LinkADRReq or other outcome.
pub fn log_info(message: impl fmt::Display) {
    emit(Level::Info, &message);
}

/// Reports simulation steps and other detail.
pub fn log_debug(message: impl fmt::Display) {
    emit(Level::Debug, &message);
}
