//! LinkADRReq codec tests

use lorawan_adr::constants::LINK_ADR_REQ;
use lorawan_adr::{AdrError, ChMask, LinkAdrReqPayload, MacCommand, Redundancy};
use proptest::prelude::*;

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex.replace(' ', "")).unwrap()
}

#[test]
fn test_mac_command_wire_format() {
    let payload = LinkAdrReqPayload::new(
        5,
        1,
        ChMask::from_channels(0..8),
        Redundancy { ch_mask_cntl: 0, nb_rep: 1 },
    )
    .unwrap();
    let cmd = payload.to_mac_command();
    assert_eq!(cmd.cid, LINK_ADR_REQ);
    assert_eq!(&cmd.to_bytes()[..], &hex_to_bytes("03 51 FF 00 01")[..]);
    assert_eq!(cmd.to_string(), "CID 0x03 [51FF0001]");
}

#[test]
fn test_decode_captured_commands() {
    // DR0 at full power, channels 0-2, NbTrans 3
    let req = LinkAdrReqPayload::from_bytes(&hex_to_bytes("00 07 00 03")).unwrap();
    assert_eq!(req.data_rate, 0);
    assert_eq!(req.tx_power, 0);
    assert_eq!(req.ch_mask.count(), 3);
    assert!(req.ch_mask.is_enabled(2));
    assert!(!req.ch_mask.is_enabled(3));
    assert_eq!(req.redundancy.nb_rep, 3);

    // Channel 15 lives in the high byte
    let req = LinkAdrReqPayload::from_bytes(&hex_to_bytes("35 00 80 01")).unwrap();
    assert_eq!(req.data_rate, 3);
    assert_eq!(req.tx_power, 5);
    assert!(req.ch_mask.is_enabled(15));
    assert_eq!(req.ch_mask.count(), 1);
}

#[test]
fn test_from_mac_command() {
    let cmd = MacCommand::new(LINK_ADR_REQ, hex_to_bytes("51FF0001"));
    let req = LinkAdrReqPayload::from_mac_command(&cmd).unwrap();
    assert_eq!(req.data_rate, 5);
    assert_eq!(req.tx_power, 1);
    assert_eq!(req.ch_mask.raw(), 0x00FF);

    let short = MacCommand::new(LINK_ADR_REQ, hex_to_bytes("51FF00"));
    assert!(matches!(
        LinkAdrReqPayload::from_mac_command(&short),
        Err(AdrError::MacPayloadLength { expected: 4, actual: 3 })
    ));
}

#[test]
fn test_ch_mask_editing() {
    let mut mask = ChMask::default();
    mask.set(0, true);
    mask.set(8, true);
    mask.set(16, true); // outside the mask, ignored
    assert_eq!(mask.raw(), 0x0101);
    mask.set(0, false);
    assert_eq!(mask.raw(), 0x0100);
    assert_eq!(mask.count(), 1);
}

#[test]
fn test_nb_trans_limits() {
    let redundancy = Redundancy { ch_mask_cntl: 0, nb_rep: 15 };
    let req = LinkAdrReqPayload::new(0, 0, ChMask::default(), redundancy).unwrap();
    assert_eq!(req.to_bytes()[3], 0x0F);

    let redundancy = Redundancy { ch_mask_cntl: 0, nb_rep: 16 };
    let err = LinkAdrReqPayload::new(0, 0, ChMask::default(), redundancy).unwrap_err();
    assert!(matches!(err, AdrError::FieldOutOfRange { field: "NbTrans", value: 16, max: 15 }));
}

proptest! {
    #[test]
    fn test_decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..8)) {
        let result = LinkAdrReqPayload::from_bytes(&data);
        prop_assert_eq!(result.is_ok(), data.len() == 4);
    }

    #[test]
    fn test_fields_survive_encoding(
        data_rate in 0u8..=15,
        tx_power in 0u8..=15,
        mask in any::<u16>(),
        ch_mask_cntl in 0u8..=7,
        nb_rep in 0u8..=15,
    ) {
        let redundancy = Redundancy { ch_mask_cntl, nb_rep };
        let req = LinkAdrReqPayload::new(data_rate, tx_power, ChMask::new(mask), redundancy).unwrap();
        let decoded = LinkAdrReqPayload::from_bytes(&req.to_bytes()).unwrap();
        prop_assert_eq!(decoded, req);
    }
}
