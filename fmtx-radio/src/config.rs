use std::fs;
use std::time::Duration;

use radio_si4713::{
    command::TxFrequency,
    config::{PollConfig, Si4713Config, Si4713ConfigBuilder},
    regs::{Preemphasis, SI4713_ADDRESS},
};
use serde::Deserialize;

use crate::error::FmtxError;

pub const MIN_FREQUENCY: TxFrequency = 7600;
pub const MAX_FREQUENCY: TxFrequency = 10800;
pub const MIN_POWER: u8 = 88;
pub const MAX_POWER: u8 = 115;
pub const MAX_ANTENNA_CAP: u8 = 191;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub i2c: String,
    pub address: u8,
    /// GPIO line name of the reset pin; reset is skipped when absent
    pub reset_line: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            i2c: "/dev/i2c-1".to_string(),
            address: SI4713_ADDRESS,
            reset_line: None,
        }
    }
}

/// Retry limits; 0 polls without bound
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub cts_retries: u32,
    pub status_retries: u32,
    pub status_interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        let poll = PollConfig::default();
        Self {
            cts_retries: poll.cts_retries.unwrap_or(0),
            status_retries: poll.status_retries.unwrap_or(0),
            status_interval_ms: poll.status_interval.as_millis() as u64,
        }
    }
}

impl PollSettings {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            cts_retries: Some(self.cts_retries).filter(|retries| *retries > 0),
            status_retries: Some(self.status_retries).filter(|retries| *retries > 0),
            status_interval: Duration::from_millis(self.status_interval_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PreemphasisSetting {
    #[serde(rename = "75us")]
    Us75,
    #[serde(rename = "50us")]
    Us50,
    #[serde(rename = "off")]
    Off,
}

impl From<PreemphasisSetting> for Preemphasis {
    fn from(value: PreemphasisSetting) -> Self {
        match value {
            PreemphasisSetting::Us75 => Preemphasis::Us75,
            PreemphasisSetting::Us50 => Preemphasis::Us50,
            PreemphasisSetting::Off => Preemphasis::Disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransmitterConfig {
    /// Carrier in 10 kHz units
    pub frequency: TxFrequency,
    /// Output level in dBuV
    pub power: u8,
    /// 0 selects automatic antenna tuning
    pub antenna_cap: u8,
    pub preemphasis: PreemphasisSetting,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            frequency: 10230,
            power: MAX_POWER,
            antenna_cap: 0,
            preemphasis: PreemphasisSetting::Us75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RdsSettings {
    pub program_id: u16,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanConfig {
    pub from: TxFrequency,
    pub to: TxFrequency,
    #[serde(default = "default_scan_step")]
    pub step: TxFrequency,
}

fn default_scan_step() -> TxFrequency {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub device: DeviceConfig,
    pub poll: PollSettings,
    pub transmitter: TransmitterConfig,
    pub rds: Option<RdsSettings>,
    pub scan: Option<ScanConfig>,
}

impl StationConfig {
    pub fn from_toml(content: &str) -> Result<Self, FmtxError> {
        let config: StationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FmtxError> {
        let tx = &self.transmitter;

        check_frequency("transmitter.frequency", tx.frequency)?;

        if !(MIN_POWER..=MAX_POWER).contains(&tx.power) {
            return Err(FmtxError::IncorrectSettings(format!(
                "transmitter.power {} outside {}..={} dBuV",
                tx.power, MIN_POWER, MAX_POWER
            )));
        }

        if tx.antenna_cap > MAX_ANTENNA_CAP {
            return Err(FmtxError::IncorrectSettings(format!(
                "transmitter.antenna_cap {} above {}",
                tx.antenna_cap, MAX_ANTENNA_CAP
            )));
        }

        if let Some(scan) = &self.scan {
            check_frequency("scan.from", scan.from)?;
            check_frequency("scan.to", scan.to)?;

            if scan.from > scan.to || scan.step == 0 {
                return Err(FmtxError::IncorrectSettings(format!(
                    "scan range {}..{} step {} is empty",
                    scan.from, scan.to, scan.step
                )));
            }
        }

        Ok(())
    }

    pub fn radio_config(&self) -> Si4713Config {
        Si4713ConfigBuilder::new()
            .poll(self.poll.poll_config())
            .preemphasis(self.transmitter.preemphasis.into())
            .build()
    }
}

fn check_frequency(key: &str, frequency: TxFrequency) -> Result<(), FmtxError> {
    if (MIN_FREQUENCY..=MAX_FREQUENCY).contains(&frequency) {
        Ok(())
    } else {
        Err(FmtxError::IncorrectSettings(format!(
            "{} {} outside {}..={}",
            key, frequency, MIN_FREQUENCY, MAX_FREQUENCY
        )))
    }
}

/// Loads the station configuration from the given TOML file path
pub fn load_config(path: &str) -> Result<StationConfig, FmtxError> {
    let content = fs::read_to_string(path)?;
    StationConfig::from_toml(&content)
}
