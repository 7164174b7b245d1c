//! # Regional Band Parameters
//!
//! Static per-region tables the ADR decision engine reads: valid data rates
//! with their demodulation floors, transmit power levels, default channel
//! masks and the dB value of one ADR step.
//!
//! Regions are a closed set. Parsing an unknown identifier fails with
//! [`AdrError::UnknownBand`], which is distinct from a known region being
//! asked for a data rate or power level it does not define.
//!
//! ```rust
//! use lorawan_adr::band::Band;
//!
//! let params = "EU_863_870".parse::<Band>().unwrap().parameters();
//! assert_eq!(params.data_rate_index("SF7BW125").unwrap(), 5);
//! assert_eq!(params.tx_power_dbm(1).unwrap(), 14);
//! ```

mod tables;

use crate::error::AdrError;
use crate::mac::ChMask;
use std::fmt;
use std::str::FromStr;

/// Supported regional frequency plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Europe 863-870 MHz
    Eu863870,
    /// United States 902-928 MHz
    Us902928,
    /// China 779-787 MHz
    Cn779787,
    /// Europe 433 MHz
    Eu433,
    /// Australia 915-928 MHz
    Au915928,
    /// China 470-510 MHz
    Cn470510,
    /// Asia 923 MHz
    As923,
    /// South Korea 920-923 MHz
    Kr920923,
    /// India 865-867 MHz
    In865867,
}

impl Band {
    /// Every supported band
    pub const ALL: [Band; 9] = [
        Band::Eu863870,
        Band::Us902928,
        Band::Cn779787,
        Band::Eu433,
        Band::Au915928,
        Band::Cn470510,
        Band::As923,
        Band::Kr920923,
        Band::In865867,
    ];

    /// Canonical identifier, as stored on device records
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Eu863870 => "EU_863_870",
            Band::Us902928 => "US_902_928",
            Band::Cn779787 => "CN_779_787",
            Band::Eu433 => "EU_433",
            Band::Au915928 => "AU_915_928",
            Band::Cn470510 => "CN_470_510",
            Band::As923 => "AS_923",
            Band::Kr920923 => "KR_920_923",
            Band::In865867 => "IN_865_867",
        }
    }

    /// Parameter table for this band
    pub fn parameters(&self) -> &'static BandParameters {
        match self {
            Band::Eu863870 => &tables::EU_863_870,
            Band::Us902928 => &tables::US_902_928,
            Band::Cn779787 => &tables::CN_779_787,
            Band::Eu433 => &tables::EU_433,
            Band::Au915928 => &tables::AU_915_928,
            Band::Cn470510 => &tables::CN_470_510,
            Band::As923 => &tables::AS_923,
            Band::Kr920923 => &tables::KR_920_923,
            Band::In865867 => &tables::IN_865_867,
        }
    }
}

impl FromStr for Band {
    type Err = AdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .iter()
            .copied()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| AdrError::UnknownBand(s.to_string()))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One LoRa data rate of a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRateSpec {
    /// Data rate index (DRx) as carried in LinkADRReq
    pub index: u8,
    /// Identifier as reported in uplink metadata, e.g. "SF7BW125"
    pub name: &'static str,
    /// Spreading factor
    pub spreading_factor: u8,
    /// Bandwidth in kHz
    pub bandwidth_khz: u16,
    /// Minimum SNR for demodulation (dB)
    pub required_snr: f32,
}

/// Static ADR parameters of one band
#[derive(Debug, PartialEq)]
pub struct BandParameters {
    /// Band these parameters belong to
    pub band: Band,
    /// Uplink data rates in ascending index order
    pub data_rates: &'static [DataRateSpec],
    /// Highest data rate index ADR may assign
    pub max_adr_data_rate: u8,
    /// Transmit power in dBm, indexed by TXPower (index 0 is the strongest)
    pub tx_powers: &'static [i8],
    /// TXPower index a device uses before any ADR command
    pub default_tx_power: u8,
    /// Number of channels covered by the default channel mask layout
    pub channel_count: u8,
    /// Channels enabled by default
    pub default_channels: &'static [u8],
    /// Link budget consumed per ADR step (dB); one step is one data rate
    /// index or one TXPower index
    pub dr_step_db: f32,
    /// Whether the full channel plan fits one LinkADRReq
    pub link_adr_supported: bool,
}

impl BandParameters {
    /// Data rate definition by identifier
    pub fn data_rate(&self, name: &str) -> Result<&DataRateSpec, AdrError> {
        self.data_rates
            .iter()
            .find(|dr| dr.name == name)
            .ok_or_else(|| AdrError::InvalidDataRate {
                band: self.band.to_string(),
                data_rate: name.to_string(),
            })
    }

    /// Data rate index by identifier
    pub fn data_rate_index(&self, name: &str) -> Result<u8, AdrError> {
        self.data_rate(name).map(|dr| dr.index)
    }

    /// Data rate definition by index
    pub fn data_rate_by_index(&self, index: u8) -> Option<&DataRateSpec> {
        self.data_rates.iter().find(|dr| dr.index == index)
    }

    /// Demodulation floor of a data rate
    pub fn required_snr(&self, name: &str) -> Result<f32, AdrError> {
        self.data_rate(name).map(|dr| dr.required_snr)
    }

    /// Transmit power of a TXPower index
    pub fn tx_power_dbm(&self, index: u8) -> Option<i8> {
        self.tx_powers.get(index as usize).copied()
    }

    /// TXPower index of a transmit power in dBm
    pub fn tx_power_index(&self, dbm: i8) -> Result<u8, AdrError> {
        self.tx_powers
            .iter()
            .position(|&p| p == dbm)
            .map(|i| i as u8)
            .ok_or_else(|| AdrError::InvalidTxPower {
                band: self.band.to_string(),
                dbm,
            })
    }

    /// Weakest TXPower index
    pub fn min_tx_power_index(&self) -> u8 {
        self.tx_powers.len().saturating_sub(1) as u8
    }

    /// Default channel mask, auxiliary channels left disabled
    pub fn default_ch_mask(&self) -> ChMask {
        ChMask::from_channels(self.default_channels.iter().copied())
    }
}
