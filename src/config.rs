//! # ADR Engine Configuration
//!
//! Tunables for the decision engine and the history store. Defaults reproduce
//! the behavior network operators expect out of the box; everything can be
//! overridden from a JSON file.
//!
//! ```rust,no_run
//! use lorawan_adr::config::AdrConfig;
//!
//! let config = AdrConfig::load_from_file("adr.json").unwrap_or_default();
//! assert!(config.validate().is_ok());
//! ```

use crate::constants::*;
use crate::error::AdrError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Loss percentage bands used to pick NbTrans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossThresholds {
    /// Loss below this → one retransmission fewer
    ///
    /// The default of 5 keeps NbTrans at exactly 5% loss. Set 6 to also
    /// reduce at 5%, matching servers that treat the boundary inclusively.
    pub reduce_below: u8,

    /// Loss below this → unchanged
    pub keep_below: u8,

    /// Loss below this → one retransmission more; at or above → maximum
    pub increase_below: u8,
}

impl Default for LossThresholds {
    fn default() -> Self {
        Self {
            reduce_below: LOSS_REDUCE_BELOW,
            keep_below: LOSS_KEEP_BELOW,
            increase_below: LOSS_INCREASE_BELOW,
        }
    }
}

/// ADR engine configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdrConfig {
    /// Safety margin in dB used when the device carries no margin of its own
    pub default_margin_db: f32,

    /// Minimum number of frames before a decision is made
    pub min_history: usize,

    /// Frames kept per device (oldest evicted first)
    pub history_capacity: usize,

    /// Loss → NbTrans mapping
    pub loss_thresholds: LossThresholds,

    /// Upper bound for NbTrans
    pub max_nb_trans: u8,

    /// Deadline for each history store call in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for AdrConfig {
    fn default() -> Self {
        Self {
            default_margin_db: DEFAULT_ADR_MARGIN_DB,
            min_history: DEFAULT_MIN_HISTORY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            loss_thresholds: LossThresholds::default(),
            max_nb_trans: MAX_NB_TRANS,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

impl AdrConfig {
    /// Store deadline as a Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Check that the configuration is internally consistent
    pub fn validate(&self) -> Result<(), AdrError> {
        if !self.default_margin_db.is_finite() || self.default_margin_db < 0.0 {
            return Err(AdrError::Config(format!(
                "default_margin_db must be a non-negative number, got {}",
                self.default_margin_db
            )));
        }
        if self.history_capacity == 0 {
            return Err(AdrError::Config("history_capacity must be at least 1".into()));
        }
        if self.min_history == 0 || self.min_history > self.history_capacity {
            return Err(AdrError::Config(format!(
                "min_history must be in 1..={}, got {}",
                self.history_capacity, self.min_history
            )));
        }
        let t = &self.loss_thresholds;
        if !(t.reduce_below <= t.keep_below && t.keep_below <= t.increase_below && t.increase_below <= 100) {
            return Err(AdrError::Config(format!(
                "loss thresholds must be ordered within 0..=100, got {}/{}/{}",
                t.reduce_below, t.keep_below, t.increase_below
            )));
        }
        if !(MIN_NB_TRANS..=MAC_NIBBLE_MAX).contains(&self.max_nb_trans) {
            return Err(AdrError::Config(format!(
                "max_nb_trans must be in {}..={}, got {}",
                MIN_NB_TRANS, MAC_NIBBLE_MAX, self.max_nb_trans
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(AdrError::Config("store_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AdrError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The loaded configuration is
    /// validated before it is returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdrError> {
        let json = fs::read_to_string(path)?;
        let config: AdrConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
