use core::time::Duration;

use crate::{
    rds::RdsConfig,
    regs::{Preemphasis, SI4713_PART_NUMBER},
};

/// Limits for the two wait loops of the driver.
///
/// `None` keeps polling until the chip answers, which hangs forever on a
/// missing device.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PollConfig {
    /// Status reads while waiting for CTS after a command
    pub cts_retries: Option<u32>,
    /// Interrupt status queries while waiting for tune or measure to complete
    pub status_retries: Option<u32>,
    /// Delay between interrupt status queries
    pub status_interval: Duration,
}

impl PollConfig {
    pub const fn unbounded() -> Self {
        Self {
            cts_retries: None,
            status_retries: None,
            status_interval: Duration::from_millis(10),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            cts_retries: Some(1000),
            status_retries: Some(100),
            status_interval: Duration::from_millis(10),
        }
    }
}

/// Transmitter baseline applied right after power up
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TxConfig {
    /// Reference clock in Hz
    pub refclk_freq: u16,
    pub preemphasis: Preemphasis,
    /// Audio compressor gain in dB
    pub acomp_gain: u16,
    /// TX_ACOMP_ENABLE bits (bit 1 limiter, bit 0 compressor)
    pub acomp_enable: u16,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            refclk_freq: 32768,
            preemphasis: Preemphasis::Us75,
            acomp_gain: 10,
            acomp_enable: 0x0000,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Si4713Config {
    pub part_number: u8,
    pub poll: PollConfig,
    pub tx: TxConfig,
    pub rds: RdsConfig,
}

impl Default for Si4713Config {
    fn default() -> Self {
        Self {
            part_number: SI4713_PART_NUMBER,
            poll: PollConfig::default(),
            tx: TxConfig::default(),
            rds: RdsConfig::default(),
        }
    }
}

pub struct Si4713ConfigBuilder {
    config: Si4713Config,
}

impl Si4713ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Si4713Config::default(),
        }
    }

    pub fn part_number(mut self, part_number: u8) -> Self {
        self.config.part_number = part_number;
        self
    }

    pub fn poll(mut self, poll: PollConfig) -> Self {
        self.config.poll = poll;
        self
    }

    pub fn cts_retries(mut self, retries: Option<u32>) -> Self {
        self.config.poll.cts_retries = retries;
        self
    }

    pub fn status_retries(mut self, retries: Option<u32>) -> Self {
        self.config.poll.status_retries = retries;
        self
    }

    pub fn status_interval(mut self, interval: Duration) -> Self {
        self.config.poll.status_interval = interval;
        self
    }

    pub fn refclk_freq(mut self, freq: u16) -> Self {
        self.config.tx.refclk_freq = freq;
        self
    }

    pub fn preemphasis(mut self, preemphasis: Preemphasis) -> Self {
        self.config.tx.preemphasis = preemphasis;
        self
    }

    pub fn acomp(mut self, gain: u16, enable: u16) -> Self {
        self.config.tx.acomp_gain = gain;
        self.config.tx.acomp_enable = enable;
        self
    }

    pub fn rds(mut self, rds: RdsConfig) -> Self {
        self.config.rds = rds;
        self
    }

    pub fn build(self) -> Si4713Config {
        self.config
    }
}

impl Default for Si4713ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let config = Si4713ConfigBuilder::new()
            .preemphasis(Preemphasis::Us50)
            .cts_retries(None)
            .build();

        assert_eq!(config.tx.preemphasis, Preemphasis::Us50);
        assert_eq!(config.tx.refclk_freq, 32768);
        assert_eq!(config.poll.cts_retries, None);
        assert_eq!(config.poll.status_retries, Some(100));
        assert_eq!(config.part_number, 13);
        assert_eq!(config.rds, RdsConfig::default());
    }

    #[test]
    fn test_unbounded_poll() {
        let poll = PollConfig::unbounded();

        assert_eq!(poll.cts_retries, None);
        assert_eq!(poll.status_retries, None);
        assert_eq!(poll.status_interval, Duration::from_millis(10));
    }
}
