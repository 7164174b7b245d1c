//! Regional parameter tables (LoRaWAN Regional Parameters 1.0.2).
//!
//! Demodulation floors are per spreading factor and independent of bandwidth.

use super::{Band, BandParameters, DataRateSpec};
use crate::constants::ADR_STEP_DB;

const fn lora(index: u8, name: &'static str, spreading_factor: u8, bandwidth_khz: u16) -> DataRateSpec {
    DataRateSpec {
        index,
        name,
        spreading_factor,
        bandwidth_khz,
        required_snr: demodulation_floor(spreading_factor),
    }
}

const fn demodulation_floor(spreading_factor: u8) -> f32 {
    match spreading_factor {
        7 => -7.5,
        8 => -10.0,
        9 => -12.5,
        10 => -15.0,
        11 => -17.5,
        _ => -20.0,
    }
}

/// DR0..DR6 of the dynamic-channel-plan regions (EU-like)
const EU_LIKE_DATA_RATES: [DataRateSpec; 7] = [
    lora(0, "SF12BW125", 12, 125),
    lora(1, "SF11BW125", 11, 125),
    lora(2, "SF10BW125", 10, 125),
    lora(3, "SF9BW125", 9, 125),
    lora(4, "SF8BW125", 8, 125),
    lora(5, "SF7BW125", 7, 125),
    lora(6, "SF7BW250", 7, 250),
];

/// DR0..DR5, no 250 kHz channel
const SF_ONLY_DATA_RATES: [DataRateSpec; 6] = [
    lora(0, "SF12BW125", 12, 125),
    lora(1, "SF11BW125", 11, 125),
    lora(2, "SF10BW125", 10, 125),
    lora(3, "SF9BW125", 9, 125),
    lora(4, "SF8BW125", 8, 125),
    lora(5, "SF7BW125", 7, 125),
];

/// Uplink DR0..DR4 of the 64+8 channel plans
const US_LIKE_DATA_RATES: [DataRateSpec; 5] = [
    lora(0, "SF10BW125", 10, 125),
    lora(1, "SF9BW125", 9, 125),
    lora(2, "SF8BW125", 8, 125),
    lora(3, "SF7BW125", 7, 125),
    lora(4, "SF8BW500", 8, 500),
];

const EU_433_POWERS: [i8; 6] = [10, 7, 4, 1, -2, -5];
const US_LIKE_POWERS: [i8; 11] = [30, 28, 26, 24, 22, 20, 18, 16, 14, 12, 10];

pub(super) static EU_863_870: BandParameters = BandParameters {
    band: Band::Eu863870,
    data_rates: &EU_LIKE_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &[20, 14, 11, 8, 5, 2],
    default_tx_power: 1,
    // 8 LoRa channels plus the FSK channel at index 8
    channel_count: 9,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};

pub(super) static US_902_928: BandParameters = BandParameters {
    band: Band::Us902928,
    data_rates: &US_LIKE_DATA_RATES,
    max_adr_data_rate: 3,
    tx_powers: &US_LIKE_POWERS,
    default_tx_power: 5,
    channel_count: 72,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: false,
};

pub(super) static CN_779_787: BandParameters = BandParameters {
    band: Band::Cn779787,
    data_rates: &EU_LIKE_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &EU_433_POWERS,
    default_tx_power: 0,
    channel_count: 16,
    default_channels: &[0, 1, 2],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};

pub(super) static EU_433: BandParameters = BandParameters {
    band: Band::Eu433,
    data_rates: &EU_LIKE_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &EU_433_POWERS,
    default_tx_power: 0,
    channel_count: 16,
    default_channels: &[0, 1, 2],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};

pub(super) static AU_915_928: BandParameters = BandParameters {
    band: Band::Au915928,
    data_rates: &US_LIKE_DATA_RATES,
    max_adr_data_rate: 3,
    tx_powers: &US_LIKE_POWERS,
    default_tx_power: 5,
    channel_count: 72,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: false,
};

pub(super) static CN_470_510: BandParameters = BandParameters {
    band: Band::Cn470510,
    data_rates: &SF_ONLY_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &[17, 16, 14, 12, 10, 7, 5, 2],
    default_tx_power: 0,
    channel_count: 96,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: false,
};

pub(super) static AS_923: BandParameters = BandParameters {
    band: Band::As923,
    data_rates: &EU_LIKE_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &[14, 12, 10, 8, 6, 4],
    default_tx_power: 0,
    channel_count: 16,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};

pub(super) static KR_920_923: BandParameters = BandParameters {
    band: Band::Kr920923,
    data_rates: &SF_ONLY_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &[20, 14, 10, 8, 5, 2, 0],
    default_tx_power: 1,
    channel_count: 16,
    default_channels: &[0, 1, 2, 3, 4, 5, 6, 7],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};

pub(super) static IN_865_867: BandParameters = BandParameters {
    band: Band::In865867,
    data_rates: &SF_ONLY_DATA_RATES,
    max_adr_data_rate: 5,
    tx_powers: &US_LIKE_POWERS,
    default_tx_power: 0,
    channel_count: 16,
    default_channels: &[0, 1, 2],
    dr_step_db: ADR_STEP_DB,
    link_adr_supported: true,
};
