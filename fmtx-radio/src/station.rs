use radio_si4713::{
    Si4713,
    bus::Bus,
    command::TxFrequency,
    response::{AsqStatus, TuneStatus},
};

use crate::{
    config::{RdsSettings, ScanConfig, TransmitterConfig},
    error::FmtxError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSample {
    pub frequency: TxFrequency,
    pub noise_level: u8,
}

/// Drives a transmitter through the station bring-up sequence
pub struct Station<I: Bus> {
    radio: Si4713<I>,
}

impl<I: Bus> Station<I> {
    pub fn new(radio: Si4713<I>) -> Self {
        Self { radio }
    }

    /// Powers up, sets output power and tunes to the carrier
    pub fn start(&mut self, tx: &TransmitterConfig) -> Result<TuneStatus, FmtxError> {
        self.radio.begin()?;

        log::info!(
            "{}: transmitting at {}.{:02}MHz, {}dBuV",
            self.radio.name(),
            tx.frequency / 100,
            tx.frequency % 100,
            tx.power
        );

        self.radio.set_tx_power(tx.power, tx.antenna_cap)?;
        self.radio.tune_fm(tx.frequency)?;

        let status = self.radio.read_tune_status()?;
        log::info!("{}: {}", self.radio.name(), status);

        Ok(status)
    }

    /// Starts RDS and loads the station name and radio text
    pub fn start_rds(&mut self, rds: &RdsSettings) -> Result<(), FmtxError> {
        log::info!(
            "{}: rds pi:0x{:04x} ps:'{}'",
            self.radio.name(),
            rds.program_id,
            rds.station
        );

        self.radio.begin_rds(rds.program_id)?;
        self.radio.set_rds_station(&rds.station)?;

        if !rds.buffer.is_empty() {
            self.radio.set_rds_buffer(&rds.buffer)?;
        }

        Ok(())
    }

    /// Measures the noise level over a frequency range
    pub fn scan(&mut self, scan: &ScanConfig) -> Result<Vec<NoiseSample>, FmtxError> {
        let mut samples = Vec::new();

        for frequency in (scan.from..=scan.to).step_by(scan.step as usize) {
            let frequency = self.radio.read_tune_measure(frequency)?;
            let status = self.radio.read_tune_status()?;

            log::debug!(
                "{}: {}.{:02}MHz noise:{}",
                self.radio.name(),
                frequency / 100,
                frequency % 100,
                status.noise_level
            );

            samples.push(NoiseSample {
                frequency,
                noise_level: status.noise_level,
            });
        }

        Ok(samples)
    }

    /// Reads the audio quality and tune status
    pub fn monitor(&mut self) -> Result<(AsqStatus, TuneStatus), FmtxError> {
        let asq = self.radio.read_asq()?;
        let tune = self.radio.read_tune_status()?;

        log::info!(
            "{}: asq:0x{:02x} input:{}dBfs {}",
            self.radio.name(),
            asq.asq,
            asq.input_level,
            tune
        );

        Ok((asq, tune))
    }

    pub fn radio(&mut self) -> &mut Si4713<I> {
        &mut self.radio
    }

    pub fn release(self) -> Si4713<I> {
        self.radio
    }
}

/// Picks the quietest sample, the lowest frequency on ties
pub fn quietest(samples: &[NoiseSample]) -> Option<NoiseSample> {
    samples
        .iter()
        .copied()
        .min_by_key(|sample| (sample.noise_level, sample.frequency))
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use radio_si4713::bus::{DelayClock, I2cBus, NoReset};
    use radio_si4713::config::Si4713Config;

    const ADDRESS: u8 = 0x63;

    type MockBus = I2cBus<I2cMock, DelayClock<NoopDelay>, NoReset>;

    fn command(frame: Vec<u8>) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(ADDRESS, frame),
            I2cTransaction::read(ADDRESS, vec![0x80]),
        ]
    }

    fn query(frame: Vec<u8>, response: Vec<u8>) -> Vec<I2cTransaction> {
        let mut transactions = command(frame);
        transactions.push(I2cTransaction::read(ADDRESS, response));
        transactions
    }

    fn int_status(status: u8) -> I2cTransaction {
        I2cTransaction::write_read(ADDRESS, vec![0x14], vec![status])
    }

    fn create_station(expectations: &[I2cTransaction]) -> Station<MockBus> {
        let bus = I2cBus::new(
            I2cMock::new(expectations),
            DelayClock::new(NoopDelay::new()),
            NoReset,
        );
        Station::new(Si4713::new(bus, "fmtx", Si4713Config::default()))
    }

    fn finish(station: Station<MockBus>) {
        let (mut i2c, _, _) = station.release().release().release();
        i2c.done();
    }

    #[test]
    fn test_start_sequence() {
        let mut expectations = Vec::new();
        expectations.extend(command(vec![0x01, 0x12, 0x50]));
        expectations.extend(command(vec![0x12, 0, 0x02, 0x01, 0x80, 0x00]));
        expectations.extend(command(vec![0x12, 0, 0x21, 0x06, 0x00, 0x00]));
        expectations.extend(command(vec![0x12, 0, 0x22, 0x04, 0x00, 0x0A]));
        expectations.extend(command(vec![0x12, 0, 0x22, 0x00, 0x00, 0x00]));
        expectations.extend(query(
            vec![0x10, 0x00],
            vec![0x80, 13, b'3', b'0', 0, 0, b'0', b'0', b'A'],
        ));
        expectations.extend(command(vec![0x31, 0, 0, 100, 0]));
        expectations.extend(command(vec![0x30, 0, 0x22, 0x6A]));
        expectations.push(int_status(0x80));
        expectations.push(int_status(0x81));
        expectations.extend(query(
            vec![0x33, 0x01],
            vec![0x80, 0, 0x22, 0x6A, 0, 100, 7, 20],
        ));

        let mut station = create_station(&expectations);

        let status = station
            .start(&TransmitterConfig {
                frequency: 8810,
                power: 100,
                ..TransmitterConfig::default()
            })
            .expect("started station");

        assert_eq!(status.frequency, 8810);
        assert_eq!(status.dbuv, 100);
        assert_eq!(station.radio().current_antenna_cap(), 7);

        finish(station);
    }

    #[test]
    fn test_start_fails_on_wrong_part() {
        let mut expectations = Vec::new();
        expectations.extend(command(vec![0x01, 0x12, 0x50]));
        expectations.extend(command(vec![0x12, 0, 0x02, 0x01, 0x80, 0x00]));
        expectations.extend(command(vec![0x12, 0, 0x21, 0x06, 0x00, 0x00]));
        expectations.extend(command(vec![0x12, 0, 0x22, 0x04, 0x00, 0x0A]));
        expectations.extend(command(vec![0x12, 0, 0x22, 0x00, 0x00, 0x00]));
        expectations.extend(query(
            vec![0x10, 0x00],
            vec![0x80, 21, b'1', b'0', 0, 0, b'0', b'0', b'B'],
        ));

        let mut station = create_station(&expectations);

        assert_eq!(
            station.start(&TransmitterConfig::default()),
            Err(FmtxError::UnexpectedPart(21))
        );

        finish(station);
    }

    #[test]
    fn test_start_rds_skips_empty_buffer() {
        let properties: [(u16, u16); 11] = [
            (0x2101, 6625),
            (0x2103, 200),
            (0x2C00, 0x0001),
            (0x2C01, 0x1234),
            (0x2C02, 0x03),
            (0x2C03, 0x1008),
            (0x2C04, 3),
            (0x2C05, 1),
            (0x2C06, 0xE0E0),
            (0x2C07, 0),
            (0x2100, 0x0007),
        ];

        let mut expectations = Vec::new();
        for (property, value) in properties {
            let mut frame = vec![0x12, 0];
            frame.extend(property.to_be_bytes());
            frame.extend(value.to_be_bytes());
            expectations.extend(command(frame));
        }
        expectations.extend(command(vec![0x36, 0, b'K', b'F', b'M', b'X']));
        expectations.extend(command(vec![0x36, 1, b'9', b' ', b' ', b' ']));

        let mut station = create_station(&expectations);

        station
            .start_rds(&RdsSettings {
                program_id: 0x1234,
                station: "KFMX9".to_string(),
                buffer: String::new(),
            })
            .expect("rds started");

        finish(station);
    }

    #[test]
    fn test_scan_measures_each_step() {
        let mut expectations = Vec::new();
        for (frame, noise) in [
            (vec![0x32, 0, 0x22, 0x2E, 0], 40u8),
            (vec![0x32, 0, 0x22, 0x38, 0], 25),
            (vec![0x32, 0, 0x22, 0x42, 0], 31),
        ] {
            let frequency = [frame[2], frame[3]];
            expectations.extend(command(frame));
            expectations.push(int_status(0x81));
            expectations.extend(query(
                vec![0x33, 0x01],
                vec![0x80, 0, frequency[0], frequency[1], 0, 0, 0, noise],
            ));
        }

        let mut station = create_station(&expectations);

        let samples = station
            .scan(&ScanConfig {
                from: 8750,
                to: 8770,
                step: 10,
            })
            .expect("scanned band");

        assert_eq!(samples.len(), 3);
        assert_eq!(
            quietest(&samples),
            Some(NoiseSample {
                frequency: 8760,
                noise_level: 25
            })
        );

        finish(station);
    }

    #[test]
    fn test_quietest_prefers_lowest_frequency() {
        let samples = [
            NoiseSample {
                frequency: 9010,
                noise_level: 12,
            },
            NoiseSample {
                frequency: 8900,
                noise_level: 12,
            },
        ];

        assert_eq!(quietest(&samples).map(|sample| sample.frequency), Some(8900));
        assert_eq!(quietest(&[]), None);
    }
}
