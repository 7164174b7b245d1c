//! LinkADRReq codec (LoRaWAN 1.0.x, section 5.2)
//!
//! Payload layout, 4 bytes:
//!
//! | byte | bits 7..4  | bits 3..0 |
//! |------|------------|-----------|
//! | 0    | DataRate   | TXPower   |
//! | 1-2  | ChMask (little-endian)  |
//! | 3    | ChMaskCntl (6..4) | NbTrans |

use super::{ChMask, MacCommand};
use crate::constants::{CH_MASK_CNTL_MAX, LINK_ADR_REQ, LINK_ADR_REQ_LEN, MAC_NIBBLE_MAX};
use crate::error::AdrError;
use bytes::{BufMut, BytesMut};
use nom::{
    combinator::{all_consuming, map},
    number::complete::{le_u16, u8 as take_u8},
    sequence::tuple,
    IResult,
};

/// Redundancy byte of a LinkADRReq
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redundancy {
    /// How ChMask is interpreted; 0 selects channels 0..15
    pub ch_mask_cntl: u8,
    /// Number of transmissions per unconfirmed uplink
    pub nb_rep: u8,
}

impl Redundancy {
    fn to_byte(self) -> u8 {
        ((self.ch_mask_cntl & CH_MASK_CNTL_MAX) << 4) | (self.nb_rep & MAC_NIBBLE_MAX)
    }

    fn from_byte(b: u8) -> Self {
        Self {
            ch_mask_cntl: (b >> 4) & CH_MASK_CNTL_MAX,
            nb_rep: b & MAC_NIBBLE_MAX,
        }
    }
}

/// Decoded LinkADRReq payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAdrReqPayload {
    /// Data rate index
    pub data_rate: u8,
    /// TXPower index
    pub tx_power: u8,
    /// Enabled channels
    pub ch_mask: ChMask,
    /// ChMaskCntl and NbTrans
    pub redundancy: Redundancy,
}

fn check_range(field: &'static str, value: u8, max: u8) -> Result<(), AdrError> {
    if value > max {
        return Err(AdrError::FieldOutOfRange { field, value, max });
    }
    Ok(())
}

impl LinkAdrReqPayload {
    /// Build a payload, rejecting values that do not fit their fields
    pub fn new(data_rate: u8, tx_power: u8, ch_mask: ChMask, redundancy: Redundancy) -> Result<Self, AdrError> {
        check_range("DataRate", data_rate, MAC_NIBBLE_MAX)?;
        check_range("TXPower", tx_power, MAC_NIBBLE_MAX)?;
        check_range("ChMaskCntl", redundancy.ch_mask_cntl, CH_MASK_CNTL_MAX)?;
        check_range("NbTrans", redundancy.nb_rep, MAC_NIBBLE_MAX)?;
        Ok(Self {
            data_rate,
            tx_power,
            ch_mask,
            redundancy,
        })
    }

    /// Encode the 4-byte payload
    pub fn to_bytes(&self) -> [u8; LINK_ADR_REQ_LEN] {
        let mut buf = BytesMut::with_capacity(LINK_ADR_REQ_LEN);
        buf.put_u8(((self.data_rate & MAC_NIBBLE_MAX) << 4) | (self.tx_power & MAC_NIBBLE_MAX));
        buf.put_u16_le(self.ch_mask.raw());
        buf.put_u8(self.redundancy.to_byte());

        let mut out = [0u8; LINK_ADR_REQ_LEN];
        out.copy_from_slice(&buf);
        out
    }

    /// Decode a payload; anything but exactly 4 bytes is rejected
    pub fn from_bytes(data: &[u8]) -> Result<Self, AdrError> {
        if data.len() != LINK_ADR_REQ_LEN {
            return Err(AdrError::MacPayloadLength {
                expected: LINK_ADR_REQ_LEN,
                actual: data.len(),
            });
        }
        let (_, payload) = all_consuming(parse_link_adr_req)(data).map_err(|_| AdrError::MacPayloadLength {
            expected: LINK_ADR_REQ_LEN,
            actual: data.len(),
        })?;
        Ok(payload)
    }

    /// Wrap as a MAC command ready to append to FOpts
    pub fn to_mac_command(&self) -> MacCommand {
        MacCommand::new(LINK_ADR_REQ, self.to_bytes().to_vec())
    }

    /// Decode from a MAC command, checking the CID
    pub fn from_mac_command(cmd: &MacCommand) -> Result<Self, AdrError> {
        if cmd.cid != LINK_ADR_REQ {
            return Err(AdrError::UnexpectedCommand(cmd.cid));
        }
        Self::from_bytes(&cmd.payload)
    }
}

fn parse_link_adr_req(input: &[u8]) -> IResult<&[u8], LinkAdrReqPayload> {
    map(tuple((take_u8, le_u16, take_u8)), |(dr_power, mask, redundancy)| LinkAdrReqPayload {
        data_rate: dr_power >> 4,
        tx_power: dr_power & MAC_NIBBLE_MAX,
        ch_mask: ChMask::new(mask),
        redundancy: Redundancy::from_byte(redundancy),
    })(input)
}
