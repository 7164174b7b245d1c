use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use lorawan_adr::logging::{init_logger, init_logger_with_level, log_debug, log_error, log_info, log_warn};
use lorawan_adr::{
    loss_percentage, AdrConfig, AdrEngine, Band, ChMask, Device, DownlinkMessage, Frame, GatewayMetadata,
    LinkAdrReqPayload, Redundancy, UplinkMessage,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "adr-cli")]
#[command(about = "CLI tool for LoRaWAN ADR decisions and LinkADRReq payloads")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a LinkADRReq payload
    Encode {
        #[arg(long)]
        data_rate: u8,
        #[arg(long)]
        tx_power: u8,
        /// Channel mask as 4 hex digits, e.g. 00FF
        #[arg(long, default_value = "00FF")]
        ch_mask: String,
        #[arg(long, default_value = "0")]
        ch_mask_cntl: u8,
        #[arg(long, default_value = "1")]
        nb_trans: u8,
    },
    /// Decode a hex LinkADRReq payload (without CID)
    Decode { payload: String },
    /// Loss percentage over a list of frame counters
    Loss {
        #[arg(value_delimiter = ',', required = true)]
        f_cnts: Vec<u32>,
    },
    /// Feed synthetic uplinks through the engine and print the resulting command
    Simulate {
        #[arg(long, default_value = "EU_863_870")]
        band: String,
        #[arg(long, default_value = "SF12BW125")]
        data_rate: String,
        #[arg(long, default_value = "5.0", allow_hyphen_values = true)]
        snr: f32,
        #[arg(long, default_value = "20")]
        frames: u32,
        /// Frame counters to skip, simulating lost uplinks
        #[arg(long, value_delimiter = ',')]
        lost: Vec<u32>,
        #[arg(long, default_value = "1")]
        nb_trans: u8,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logger_with_level(LevelFilter::Debug);
    } else {
        init_logger();
    }

    let config = match &cli.config {
        Some(path) => AdrConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AdrConfig::default(),
    };

    match cli.command {
        Commands::Encode {
            data_rate,
            tx_power,
            ch_mask,
            ch_mask_cntl,
            nb_trans,
        } => {
            let raw = u16::from_str_radix(&ch_mask, 16).with_context(|| format!("invalid channel mask {ch_mask}"))?;
            let payload = LinkAdrReqPayload::new(
                data_rate,
                tx_power,
                ChMask::new(raw),
                Redundancy {
                    ch_mask_cntl,
                    nb_rep: nb_trans,
                },
            )?;
            println!("{}", hex::encode_upper(payload.to_mac_command().to_bytes()));
        }
        Commands::Decode { payload } => {
            let bytes = hex::decode(payload.trim()).context("payload is not valid hex")?;
            let req = LinkAdrReqPayload::from_bytes(&bytes)?;
            println!("DataRate:   {}", req.data_rate);
            println!("TXPower:    {}", req.tx_power);
            println!("ChMask:     {} ({} channels)", req.ch_mask, req.ch_mask.count());
            println!("ChMaskCntl: {}", req.redundancy.ch_mask_cntl);
            println!("NbTrans:    {}", req.redundancy.nb_rep);
        }
        Commands::Loss { f_cnts } => {
            let frames: Vec<Frame> = f_cnts.iter().map(|&f| Frame::new(f, 0.0, 1)).collect();
            println!("{}%", loss_percentage(&frames));
        }
        Commands::Simulate {
            band,
            data_rate,
            snr,
            frames,
            lost,
            nb_trans,
        } => {
            let params = band.parse::<Band>()?.parameters();
            params.data_rate(&data_rate)?;
            if frames < config.min_history as u32 {
                log_warn(format_args!(
                    "{frames} frames is below the decision threshold of {}",
                    config.min_history
                ));
            }

            let engine = AdrEngine::in_memory(config);
            let mut device = Device::new("cli", "simulated");
            device.adr.band = Some(band.clone());
            device.adr.nb_trans = nb_trans;

            let mut sent = 0;
            let mut f_cnt = 0;
            while sent < frames {
                if lost.contains(&f_cnt) {
                    log_debug(format_args!("skipping FCnt {f_cnt}"));
                    f_cnt += 1;
                    continue;
                }
                let mut uplink = UplinkMessage::new(f_cnt, data_rate.clone());
                if let Some(mac) = uplink.mac.as_mut() {
                    mac.adr = true;
                    mac.adr_ack_req = sent + 1 == frames;
                }
                uplink.gateways.push(GatewayMetadata {
                    gateway_id: "sim".into(),
                    snr,
                    rssi: -100.0,
                });
                engine.handle_uplink_adr(&mut uplink, &mut device).await?;
                sent += 1;
                f_cnt += 1;
            }

            let mut downlink = DownlinkMessage::new();
            if let Err(e) = engine.handle_downlink_adr(&mut downlink, &mut device).await {
                log_error(format_args!("ADR decision failed: {e}"));
                bail!(e);
            }

            match downlink.f_opts().first() {
                Some(cmd) => {
                    let req = LinkAdrReqPayload::from_mac_command(cmd)?;
                    log_info(format_args!("emitted {cmd}"));
                    println!("LinkADRReq {}", hex::encode_upper(cmd.to_bytes()));
                    println!(
                        "  DR{} ({}), TXPower {} ({} dBm), NbTrans {}, ChMask {}",
                        req.data_rate,
                        device.adr.data_rate.as_deref().unwrap_or("?"),
                        req.tx_power,
                        device.adr.tx_power.unwrap_or_default(),
                        req.redundancy.nb_rep,
                        req.ch_mask,
                    );
                }
                None => println!("No LinkADRReq needed"),
            }
        }
    }

    Ok(())
}
