//! Uplink side of ADR: record observations and react to ADRAckReq.

use super::AdrEngine;
use crate::band::Band;
use crate::constants::MIN_NB_TRANS;
use crate::device::Device;
use crate::error::AdrError;
use crate::history::{Frame, FrameHistoryStore};
use crate::message::UplinkMessage;
use log::{debug, error, warn};

impl<S: FrameHistoryStore> AdrEngine<S> {
    /// Process the ADR bits of a deduplicated uplink
    ///
    /// With ADR off the device's history is cleared. With ADR on the
    /// reported data rate is recorded and the uplink is appended to the
    /// history. ADRAckReq acknowledges the uplink in the response template
    /// and marks a LinkADRReq as owed.
    pub async fn handle_uplink_adr(&self, message: &mut UplinkMessage, dev: &mut Device) -> Result<(), AdrError> {
        let mac = message
            .mac
            .clone()
            .ok_or_else(|| AdrError::MalformedUplink("missing MAC payload".into()))?;

        let key = dev.key();
        let _guard = self.locks.acquire(&key).await;

        if !mac.adr {
            debug!("ADR: disabled by {key}, clearing history");
            return self.with_timeout(self.store.clear(&key)).await;
        }

        let metadata = message
            .lorawan
            .as_ref()
            .ok_or_else(|| AdrError::MalformedUplink("missing LoRaWAN metadata".into()))?;

        if mac.adr_ack_req && message.response_template.as_ref().and_then(|t| t.mac.as_ref()).is_none() {
            return Err(AdrError::MalformedUplink("ADRAckReq without response MAC payload".into()));
        }

        let frame = Frame::new(mac.f_cnt, message.best_snr(), message.gateway_count());
        if let Err(e) = self.with_timeout(self.store.push(&key, frame)).await {
            error!("ADR: could not push frame {} for {key}: {e}", mac.f_cnt);
        }

        dev.adr.data_rate = Some(metadata.data_rate.clone());
        if dev.adr.band.is_none() {
            if let Some(plan) = &metadata.frequency_plan {
                match plan.parse::<Band>() {
                    Ok(band) => dev.adr.band = Some(band.to_string()),
                    Err(e) => warn!("ADR: {key} reported {e}"),
                }
            }
        }
        if dev.adr.nb_trans < MIN_NB_TRANS {
            dev.adr.nb_trans = MIN_NB_TRANS;
        }

        if mac.adr_ack_req {
            if let Some(response) = message.response_template.as_mut().and_then(|t| t.mac.as_mut()) {
                response.ack = true;
            }
            dev.adr.send_req = true;
            debug!("ADR: {key} sent ADRAckReq, LinkADRReq scheduled");
        }

        Ok(())
    }
}
