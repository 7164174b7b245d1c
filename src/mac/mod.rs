//! # LoRaWAN MAC Commands
//!
//! Carrier type for MAC commands piggybacked in FOpts, the channel mask
//! bitfield, and the LinkADRReq codec.

pub mod link_adr;

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

pub use link_adr::{LinkAdrReqPayload, Redundancy};

/// One MAC command as carried in a frame's FOpts field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacCommand {
    /// Command identifier
    pub cid: u8,
    /// Command payload, without the CID
    pub payload: Bytes,
}

impl MacCommand {
    /// Create a command from its identifier and payload
    pub fn new(cid: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            cid,
            payload: payload.into(),
        }
    }

    /// Serialize as CID followed by payload
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + self.payload.len());
        buf.put_u8(self.cid);
        buf.put_slice(&self.payload);
        buf.freeze()
    }
}

impl fmt::Display for MacCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CID 0x{:02X} [{}]", self.cid, hex::encode_upper(&self.payload))
    }
}

/// 16-bit channel mask; bit i set means channel i is enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChMask(u16);

impl ChMask {
    /// Mask from its raw value
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Mask with the given channels enabled; channels above 15 are ignored
    pub fn from_channels<I: IntoIterator<Item = u8>>(channels: I) -> Self {
        channels
            .into_iter()
            .filter(|&c| (c as usize) < crate::constants::CH_MASK_BITS)
            .fold(Self(0), |mask, c| Self(mask.0 | (1 << c)))
    }

    /// Raw 16-bit value
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Whether channel `index` is enabled
    pub fn is_enabled(&self, index: usize) -> bool {
        index < crate::constants::CH_MASK_BITS && self.0 & (1 << index) != 0
    }

    /// Enable or disable channel `index`
    pub fn set(&mut self, index: usize, enabled: bool) {
        if index >= crate::constants::CH_MASK_BITS {
            return;
        }
        if enabled {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Number of enabled channels
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Display for ChMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ch_mask_from_channels() {
        let mask = ChMask::from_channels(0..8);
        assert_eq!(mask.raw(), 0x00FF);
        assert_eq!(mask.count(), 8);
        assert!(!mask.is_enabled(8));
        assert!(!mask.is_enabled(40));
    }

    #[test]
    fn test_ch_mask_set() {
        let mut mask = ChMask::default();
        mask.set(3, true);
        mask.set(15, true);
        mask.set(16, true);
        assert_eq!(mask.raw(), 0x8008);
        mask.set(3, false);
        assert_eq!(mask.raw(), 0x8000);
    }

    #[test]
    fn test_mac_command_bytes() {
        let cmd = MacCommand::new(0x03, vec![0x51u8, 0xFF, 0x00, 0x01]);
        assert_eq!(&cmd.to_bytes()[..], &[0x03u8, 0x51, 0xFF, 0x00, 0x01][..]);
        assert_eq!(cmd.to_string(), "CID 0x03 [51FF0001]");
    }
}
