use bus::Bus;
use command::{Command, TxFrequency, align_measure_frequency};
use config::Si4713Config;
use error::RadioError;
use rds::rds_slots;
use regs::{Property, PropertyValue, RSP_GET_REV_LEN, RSP_TX_ASQ_STATUS_LEN, RSP_TX_TUNE_STATUS_LEN};
use response::{AsqStatus, Revision, Status, TuneStatus};

pub mod bus;
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod rds;
pub mod regs;
pub mod response;

#[cfg(test)]
mod sim;

/// Si4713 FM transmitter with RDS encoder
pub struct Si4713<I: Bus> {
    name: &'static str,
    bus: I,
    config: Si4713Config,
    revision: Option<Revision>,
    tune_status: TuneStatus,
    asq_status: AsqStatus,
}

impl<I: Bus> Si4713<I> {
    pub fn new(bus: I, name: &'static str, config: Si4713Config) -> Self {
        Self {
            name,
            bus,
            config,
            revision: None,
            tune_status: TuneStatus::default(),
            asq_status: AsqStatus::default(),
        }
    }

    /// Resets and powers up the transmitter, then checks the part number.
    pub fn begin(&mut self) -> Result<(), RadioError> {
        self.reset()?;
        self.power_up()?;

        let revision = self.get_revision()?;
        log::info!("{}: {}", self.name, revision);

        if revision.part_number != self.config.part_number {
            log::error!(
                "{}: unexpected part Si47{:02} (expected Si47{:02})",
                self.name,
                revision.part_number,
                self.config.part_number
            );
            return Err(RadioError::UnexpectedPart(revision.part_number));
        }

        self.revision = Some(revision);

        Ok(())
    }

    /// Drives the reset line through high, low, high when one is wired
    pub fn reset(&mut self) -> Result<(), RadioError> {
        log::debug!("{}: reset", self.name);
        self.bus.hardware_reset()?;
        Ok(())
    }

    /// Powers up in FM transmit mode and applies the transmitter baseline
    pub fn power_up(&mut self) -> Result<(), RadioError> {
        self.send_command(&Command::power_up_tx())?;

        let tx = self.config.tx;
        self.set_property(Property::RefClockFrequency, tx.refclk_freq)?;
        self.set_property(Property::TxPreemphasis, tx.preemphasis as u16)?;
        self.set_property(Property::TxAcompGain, tx.acomp_gain)?;
        self.set_property(Property::TxAcompEnable, tx.acomp_enable)?;

        Ok(())
    }

    /// Writes the command and waits for the chip to raise CTS
    pub fn send_command(&mut self, command: &Command) -> Result<Status, RadioError> {
        let frame = command.frame();
        log::trace!("{}: cmd {:02x?}", self.name, frame.as_slice());

        self.bus.write(frame.as_slice())?;
        self.wait_cts()
    }

    pub fn set_property(
        &mut self,
        property: Property,
        value: PropertyValue,
    ) -> Result<(), RadioError> {
        log::debug!("{}: set {:?} = {}", self.name, property, value);
        self.send_command(&Command::SetProperty { property, value })?;
        Ok(())
    }

    /// Reads the interrupt status byte (bit 7 CTS, bit 0 STC)
    pub fn get_status(&mut self) -> Result<Status, RadioError> {
        let frame = Command::GetIntStatus.frame();
        let mut status = [0u8; 1];
        self.bus.write_read(frame.as_slice(), &mut status)?;
        Ok(Status(status[0]))
    }

    pub fn get_revision(&mut self) -> Result<Revision, RadioError> {
        let mut response = [0u8; RSP_GET_REV_LEN];
        self.query(&Command::GetRevision, &mut response)?;
        Ok(Revision::from_bytes(&response))
    }

    /// Tunes to `frequency` (10 kHz units) and waits for tune complete
    pub fn tune_fm(&mut self, frequency: TxFrequency) -> Result<(), RadioError> {
        log::debug!("{}: tune {}", self.name, frequency);
        self.send_command(&Command::TxTuneFreq { frequency })?;
        self.wait_status(|status| status.clear_to_send() && status.tune_complete())?;
        Ok(())
    }

    /// Sets output power in dBuV; `antenna_cap` 0 selects automatic tuning
    pub fn set_tx_power(&mut self, power: u8, antenna_cap: u8) -> Result<(), RadioError> {
        log::debug!("{}: tx power {} antcap {}", self.name, power, antenna_cap);
        self.send_command(&Command::TxTunePower { power, antenna_cap })?;
        Ok(())
    }

    pub fn read_asq(&mut self) -> Result<AsqStatus, RadioError> {
        let mut response = [0u8; RSP_TX_ASQ_STATUS_LEN];
        self.query(&Command::TxAsqStatus { intack: true }, &mut response)?;

        self.asq_status = AsqStatus::from_bytes(&response);
        Ok(self.asq_status)
    }

    pub fn read_tune_status(&mut self) -> Result<TuneStatus, RadioError> {
        let mut response = [0u8; RSP_TX_TUNE_STATUS_LEN];
        self.query(&Command::TxTuneStatus { intack: true }, &mut response)?;

        self.tune_status = TuneStatus::from_bytes(&response);
        log::trace!("{}: {}", self.name, self.tune_status);
        Ok(self.tune_status)
    }

    /// Starts a noise measurement at `frequency`, rounded down to 50 kHz.
    ///
    /// Returns the frequency actually measured; the level is available
    /// through `read_tune_status` afterwards.
    pub fn read_tune_measure(&mut self, frequency: TxFrequency) -> Result<TxFrequency, RadioError> {
        let frequency = align_measure_frequency(frequency);
        log::debug!("{}: measure {}", self.name, frequency);

        self.send_command(&Command::TxTuneMeasure {
            frequency,
            antenna_cap: 0,
        })?;
        self.wait_status(|status| status.0 == regs::STATUS_TUNE_COMPLETE)?;

        Ok(frequency)
    }

    /// Configures the RDS encoder with the fixed session parameters
    pub fn begin_rds(&mut self, program_id: u16) -> Result<(), RadioError> {
        let rds = self.config.rds;
        log::debug!("{}: begin rds pi:0x{:04x}", self.name, program_id);

        self.set_property(Property::TxAudioDeviation, rds.audio_deviation)?;
        self.set_property(Property::TxRdsDeviation, rds.rds_deviation)?;
        self.set_property(Property::TxRdsInterruptSource, rds.interrupt_source)?;
        self.set_property(Property::TxRdsPi, program_id)?;
        self.set_property(Property::TxRdsPsMix, rds.ps_mix)?;
        self.set_property(Property::TxRdsPsMisc, rds.ps_misc)?;
        self.set_property(Property::TxRdsPsRepeatCount, rds.ps_repeat_count)?;
        self.set_property(Property::TxRdsMessageCount, rds.message_count)?;
        self.set_property(Property::TxRdsPsAf, rds.alternate_frequency)?;
        self.set_property(Property::TxRdsFifoSize, rds.fifo_size)?;
        self.set_property(Property::TxComponentEnable, rds.component_enable)?;

        Ok(())
    }

    /// Loads the program service name, one 4 byte slot per command
    pub fn set_rds_station(&mut self, text: &str) -> Result<(), RadioError> {
        for (index, slot) in rds_slots(text).enumerate() {
            log::trace!(
                "{}: ps slot #{} '{}'",
                self.name,
                index,
                String::from_utf8_lossy(&slot)
            );
            self.send_command(&Command::TxRdsPs {
                slot: index as u8,
                text: slot,
            })?;
        }

        Ok(())
    }

    /// Loads radio text into the RDS group buffer
    pub fn set_rds_buffer(&mut self, text: &str) -> Result<(), RadioError> {
        for (index, slot) in rds_slots(text).enumerate() {
            log::trace!(
                "{}: buffer slot #{} '{}'",
                self.name,
                index,
                String::from_utf8_lossy(&slot)
            );
            self.send_command(&Command::TxRdsBuffer {
                first: index == 0,
                slot: index as u8,
                text: slot,
            })?;
        }

        Ok(())
    }

    /// Configures GPO1/GPO2 as outputs (bit set) or Hi-Z
    pub fn set_gpio_ctrl(&mut self, value: u8) -> Result<(), RadioError> {
        log::debug!("{}: gpio direction 0x{:02x}", self.name, value);
        self.send_command(&Command::GpoCtl(value))?;
        Ok(())
    }

    /// Drives GPO1/GPO2 levels
    pub fn set_gpio(&mut self, value: u8) -> Result<(), RadioError> {
        log::debug!("{}: gpio set 0x{:02x}", self.name, value);
        self.send_command(&Command::GpoSet(value))?;
        Ok(())
    }

    pub fn current_frequency(&self) -> TxFrequency {
        self.tune_status.frequency
    }

    pub fn current_dbuv(&self) -> u8 {
        self.tune_status.dbuv
    }

    pub fn current_antenna_cap(&self) -> u8 {
        self.tune_status.antenna_cap
    }

    pub fn current_noise_level(&self) -> u8 {
        self.tune_status.noise_level
    }

    pub fn current_asq(&self) -> u8 {
        self.asq_status.asq
    }

    pub fn current_input_level(&self) -> i8 {
        self.asq_status.input_level
    }

    pub fn tune_status(&self) -> TuneStatus {
        self.tune_status
    }

    pub fn asq_status(&self) -> AsqStatus {
        self.asq_status
    }

    pub fn revision(&self) -> Option<Revision> {
        self.revision
    }

    pub fn config(&self) -> &Si4713Config {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bus(&mut self) -> &mut I {
        &mut self.bus
    }

    pub fn release(self) -> I {
        self.bus
    }

    fn query(&mut self, command: &Command, response: &mut [u8]) -> Result<(), RadioError> {
        self.send_command(command)?;
        self.bus.read(response)?;
        Ok(())
    }

    fn wait_cts(&mut self) -> Result<Status, RadioError> {
        let limit = self.config.poll.cts_retries;
        let mut attempts = 0u32;

        loop {
            let status = Status(self.bus.read_u8()?);
            if status.clear_to_send() {
                return Ok(status);
            }

            attempts += 1;
            if limit.is_some_and(|limit| attempts >= limit) {
                log::warn!("{}: no CTS after {} reads", self.name, attempts);
                return Err(RadioError::Timeout);
            }
        }
    }

    fn wait_status<F>(&mut self, done: F) -> Result<Status, RadioError>
    where
        F: Fn(Status) -> bool,
    {
        let limit = self.config.poll.status_retries;
        let interval = self.config.poll.status_interval;
        let mut attempts = 0u32;

        loop {
            let status = self.get_status()?;
            if done(status) {
                return Ok(status);
            }

            attempts += 1;
            if limit.is_some_and(|limit| attempts >= limit) {
                log::warn!(
                    "{}: status 0x{:02x} after {} polls",
                    self.name,
                    status.0,
                    attempts
                );
                return Err(RadioError::Timeout);
            }

            self.bus.delay(interval);
        }
    }
}
