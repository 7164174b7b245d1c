//! ADR decision: link-margin allocation and loss-driven redundancy.
//!
//! The decision is a pure function of the history window, the device's
//! current settings and its band. Orchestration (gating, store access,
//! encoding) lives in the downlink handler.

use super::stats::{loss_percentage, max_snr};
use crate::band::BandParameters;
use crate::config::{AdrConfig, LossThresholds};
use crate::constants::MIN_NB_TRANS;
use crate::error::AdrError;
use crate::history::Frame;
use std::fmt;

/// Radio settings a LinkADRReq controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    /// Data rate index
    pub data_rate: u8,
    /// TXPower index
    pub tx_power: u8,
    /// Transmissions per unconfirmed uplink
    pub nb_trans: u8,
}

impl fmt::Display for LinkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DR{} TXPower{} NbTrans{}", self.data_rate, self.tx_power, self.nb_trans)
    }
}

/// Outcome of one decision round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdrDecision {
    pub current: LinkSettings,
    pub target: LinkSettings,
    /// Best SNR in the window (dB)
    pub max_snr: f32,
    /// Link budget above the demodulation floor after the margin (dB)
    pub link_margin: f32,
    /// Steps the margin allowed, before allocation
    pub steps: u32,
    /// Loss over the window (%)
    pub loss_percentage: u8,
}

impl AdrDecision {
    /// Whether the target differs from the current settings
    pub fn is_change(&self) -> bool {
        self.current != self.target
    }
}

/// Compute target settings for a device
///
/// `margin_db` is the safety margin subtracted from the link budget. Fails if
/// the current data rate index is not defined for the band.
pub fn decide(
    frames: &[Frame],
    params: &BandParameters,
    current: LinkSettings,
    margin_db: f32,
    config: &AdrConfig,
) -> Result<AdrDecision, AdrError> {
    let current_dr = params
        .data_rate_by_index(current.data_rate)
        .ok_or_else(|| AdrError::InvalidDataRate {
            band: params.band.to_string(),
            data_rate: format!("DR{}", current.data_rate),
        })?;

    let snr = max_snr(frames);
    let link_margin = snr - current_dr.required_snr - margin_db;
    let steps = if link_margin > 0.0 {
        (link_margin / params.dr_step_db).floor() as u32
    } else {
        0
    };

    let mut remaining = steps;
    let mut data_rate = current.data_rate;
    while remaining > 0 {
        match next_data_rate(params, data_rate) {
            Some(next) => {
                data_rate = next;
                remaining -= 1;
            }
            None => break,
        }
    }

    let mut tx_power = current.tx_power;
    let weakest = params.min_tx_power_index();
    while remaining > 0 && tx_power < weakest {
        tx_power += 1;
        remaining -= 1;
    }

    let loss = loss_percentage(frames);
    let nb_trans = target_nb_trans(current.nb_trans, loss, &config.loss_thresholds, config.max_nb_trans);

    Ok(AdrDecision {
        current,
        target: LinkSettings {
            data_rate,
            tx_power,
            nb_trans,
        },
        max_snr: snr,
        link_margin,
        steps,
        loss_percentage: loss,
    })
}

/// Next faster data rate ADR may assign, if any
fn next_data_rate(params: &BandParameters, data_rate: u8) -> Option<u8> {
    params
        .data_rates
        .iter()
        .map(|dr| dr.index)
        .find(|&index| index > data_rate)
        .filter(|&index| index <= params.max_adr_data_rate)
}

/// Map window loss onto NbTrans, bounded to `1..=max`
pub fn target_nb_trans(current: u8, loss: u8, thresholds: &LossThresholds, max: u8) -> u8 {
    let current = current.clamp(MIN_NB_TRANS, max);
    if loss < thresholds.reduce_below {
        current.saturating_sub(1).max(MIN_NB_TRANS)
    } else if loss < thresholds.keep_below {
        current
    } else if loss < thresholds.increase_below {
        (current + 1).min(max)
    } else {
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::Band;

    fn window(snr: f32, count: u32) -> Vec<Frame> {
        (0..count).map(|i| Frame::new(i, snr, 3)).collect()
    }

    fn eu868() -> &'static BandParameters {
        Band::Eu863870.parameters()
    }

    #[test]
    fn test_one_step_raises_data_rate() {
        // SF8: 10 - (-10) - 15 = 5 dB -> 1 step
        let current = LinkSettings { data_rate: 4, tx_power: 1, nb_trans: 1 };
        let decision = decide(&window(10.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.steps, 1);
        assert_eq!(decision.target, LinkSettings { data_rate: 5, tx_power: 1, nb_trans: 1 });
        assert!(decision.is_change());
    }

    #[test]
    fn test_remaining_steps_lower_power() {
        // SF12: 10 - (-20) - 15 = 15 dB -> 5 steps, DR0 -> DR5 uses all of them
        let current = LinkSettings { data_rate: 0, tx_power: 1, nb_trans: 1 };
        let decision = decide(&window(10.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.target.data_rate, 5);
        assert_eq!(decision.target.tx_power, 1);

        // 24 dB -> 8 steps: 5 for data rate, 3 for power
        let decision = decide(&window(19.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.steps, 8);
        assert_eq!(decision.target.data_rate, 5);
        assert_eq!(decision.target.tx_power, 4);
    }

    #[test]
    fn test_power_floor() {
        let current = LinkSettings { data_rate: 5, tx_power: 4, nb_trans: 1 };
        let decision = decide(&window(40.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.target.tx_power, eu868().min_tx_power_index());
    }

    #[test]
    fn test_negative_margin_changes_nothing() {
        let current = LinkSettings { data_rate: 5, tx_power: 1, nb_trans: 1 };
        let decision = decide(&window(-20.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.steps, 0);
        assert!(!decision.is_change());
    }

    #[test]
    fn test_data_rate_above_adr_max_is_kept() {
        // SF7BW250 is DR6, above the ADR maximum of DR5
        let current = LinkSettings { data_rate: 6, tx_power: 1, nb_trans: 1 };
        let decision = decide(&window(10.0, 20), eu868(), current, 15.0, &AdrConfig::default()).unwrap();
        assert_eq!(decision.target.data_rate, 6);
    }

    #[test]
    fn test_undefined_data_rate_index() {
        let current = LinkSettings { data_rate: 9, tx_power: 1, nb_trans: 1 };
        assert!(decide(&window(10.0, 20), eu868(), current, 15.0, &AdrConfig::default()).is_err());
    }

    #[test]
    fn test_target_nb_trans_bands() {
        let t = LossThresholds::default();
        assert_eq!(target_nb_trans(1, 0, &t, 3), 1);
        assert_eq!(target_nb_trans(3, 4, &t, 3), 2);
        assert_eq!(target_nb_trans(2, 5, &t, 3), 2);
        assert_eq!(target_nb_trans(2, 14, &t, 3), 2);
        assert_eq!(target_nb_trans(1, 15, &t, 3), 2);
        assert_eq!(target_nb_trans(3, 24, &t, 3), 3);
        assert_eq!(target_nb_trans(1, 25, &t, 3), 3);
        assert_eq!(target_nb_trans(2, 100, &t, 3), 3);
    }

    #[test]
    fn test_target_nb_trans_normalises_zero() {
        let t = LossThresholds::default();
        assert_eq!(target_nb_trans(0, 9, &t, 3), 1);
    }
}
