#![no_main]

use libfuzzer_sys::fuzz_target;
use lorawan_adr::{LinkAdrReqPayload, MacCommand};

fuzz_target!(|data: &[u8]| {
    // Arbitrary payloads must decode or fail, never panic
    if let Ok(req) = LinkAdrReqPayload::from_bytes(data) {
        // Decoding drops the RFU bit, so re-encoding is stable from here
        let encoded = req.to_bytes();
        assert_eq!(LinkAdrReqPayload::from_bytes(&encoded).ok(), Some(req));
    }

    // First byte as CID, remainder as payload
    if let Some((&cid, payload)) = data.split_first() {
        let _ = LinkAdrReqPayload::from_mac_command(&MacCommand::new(cid, payload.to_vec()));
    }
});
