use fmtx_radio::{
    config::{load_config, StationConfig},
    error::FmtxError,
    platform,
    station::{quietest, Station},
};

const DEFAULT_CONFIG_PATH: &str = "station.toml";
const MONITOR_INTERVAL: core::time::Duration = core::time::Duration::from_secs(5);

fn main() {
    simple_logger::SimpleLogger::new().env().init().unwrap();

    log::info!("Start FM Transmitter");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = match load_config(&path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("config '{}': {}", path, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&mut config) {
        log::error!("transmitter stopped: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &mut StationConfig) -> Result<(), FmtxError> {
    let radio = platform::create_transmitter(config, "fmtx")?;

    let mut station = Station::new(radio);

    if let Some(scan) = &config.scan {
        station.radio().begin()?;

        let samples = station.scan(scan)?;
        if let Some(sample) = quietest(&samples) {
            log::info!(
                "quietest channel {}.{:02}MHz noise:{}",
                sample.frequency / 100,
                sample.frequency % 100,
                sample.noise_level
            );
            config.transmitter.frequency = sample.frequency;
        }
    }

    station.start(&config.transmitter)?;

    if let Some(rds) = &config.rds {
        station.start_rds(rds)?;
    }

    loop {
        match station.monitor() {
            Ok(_) => {}
            Err(FmtxError::Timeout) => {
                log::warn!("status timeout");
            }
            Err(err) => return Err(err),
        }

        std::thread::sleep(MONITOR_INTERVAL);
    }
}
