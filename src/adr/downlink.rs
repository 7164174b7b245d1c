//! Downlink side of ADR: decide and attach a LinkADRReq.

use super::decision::{decide, LinkSettings};
use super::AdrEngine;
use crate::band::Band;
use crate::device::Device;
use crate::error::AdrError;
use crate::history::FrameHistoryStore;
use crate::mac::{LinkAdrReqPayload, Redundancy};
use crate::message::DownlinkMessage;
use log::{debug, info};

impl<S: FrameHistoryStore> AdrEngine<S> {
    /// Attach a LinkADRReq to `message` if the device is owed one and its
    /// settings should change
    ///
    /// Returns `Ok` without touching the downlink when nothing is owed, the
    /// history is too short, the device's data rate or band is not known yet,
    /// the band's channel plan does not fit a single LinkADRReq, or the
    /// settings are already optimal. An unknown band or a data rate/power the
    /// band does not define is an error, and leaves both the downlink and the
    /// device untouched.
    pub async fn handle_downlink_adr(&self, message: &mut DownlinkMessage, dev: &mut Device) -> Result<(), AdrError> {
        if !dev.adr.send_req {
            return Ok(());
        }
        if message.mac.is_none() {
            return Err(AdrError::MalformedDownlink("missing MAC payload".into()));
        }

        let key = dev.key();
        let _guard = self.locks.acquire(&key).await;

        let frames = self.with_timeout(self.store.get(&key)).await?;
        if frames.is_empty() || frames.len() < self.config.min_history {
            debug!("ADR: {key} has {} frames, waiting for {}", frames.len(), self.config.min_history);
            return Ok(());
        }

        let (data_rate, band) = match (dev.adr.data_rate.as_deref(), dev.adr.band.as_deref()) {
            (Some(dr), Some(band)) if !dr.is_empty() && !band.is_empty() => (dr, band),
            _ => {
                debug!("ADR: {key} has no data rate or band yet");
                return Ok(());
            }
        };

        let params = band.parse::<Band>()?.parameters();
        if !params.link_adr_supported {
            debug!("ADR: {key} is on {}, channel plan needs more than one LinkADRReq", params.band);
            return Ok(());
        }

        let current = LinkSettings {
            data_rate: params.data_rate_index(data_rate)?,
            tx_power: match dev.adr.tx_power {
                Some(dbm) => params.tx_power_index(dbm)?,
                None => params.default_tx_power,
            },
            nb_trans: dev.adr.nb_trans,
        };
        let margin = dev.adr.margin.unwrap_or(self.config.default_margin_db);

        let decision = decide(&frames, params, current, margin, &self.config)?;
        if !decision.is_change() {
            debug!(
                "ADR: {key} already at {} (max SNR {} dB, loss {}%)",
                current, decision.max_snr, decision.loss_percentage
            );
            dev.adr.send_req = false;
            return Ok(());
        }

        let target = decision.target;
        let payload = LinkAdrReqPayload::new(
            target.data_rate,
            target.tx_power,
            params.default_ch_mask(),
            Redundancy {
                ch_mask_cntl: 0,
                nb_rep: target.nb_trans,
            },
        )?;
        let target_dr = params
            .data_rate_by_index(target.data_rate)
            .map(|dr| dr.name.to_string())
            .ok_or_else(|| AdrError::InvalidDataRate {
                band: params.band.to_string(),
                data_rate: format!("DR{}", target.data_rate),
            })?;
        let target_dbm = params
            .tx_power_dbm(target.tx_power)
            .ok_or(AdrError::FieldOutOfRange {
                field: "TXPower",
                value: target.tx_power,
                max: params.min_tx_power_index(),
            })?;

        // The history is gone once cleared; fail before touching the downlink
        self.with_timeout(self.store.clear(&key)).await?;

        if let Some(mac) = message.mac.as_mut() {
            mac.f_opts.push(payload.to_mac_command());
        }

        info!(
            "ADR: LinkADRReq for {key}: {} -> {} ({target_dr}, {target_dbm} dBm; max SNR {} dB, loss {}%)",
            current, target, decision.max_snr, decision.loss_percentage
        );

        dev.adr.data_rate = Some(target_dr);
        dev.adr.tx_power = Some(target_dbm);
        dev.adr.nb_trans = target.nb_trans;
        dev.adr.send_req = false;

        Ok(())
    }
}
