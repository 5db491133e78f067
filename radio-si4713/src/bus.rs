use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::regs::SI4713_ADDRESS;

/// Reset line hold time for each level of the reset sequence
pub const RESET_HOLD: Duration = Duration::from_millis(10);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BusError {
    CommunicationFailure,
    ControlFailure,
    Timeout,
}

pub trait BusReset {
    fn hardware_reset(&mut self) -> Result<(), BusError>;
}

pub trait BusClock {
    fn delay(&mut self, duration: Duration);
}

/// Transactional access to the transmitter
pub trait Bus {
    /// Write raw command bytes
    fn write(&mut self, data: &[u8]) -> Result<(), BusError>;

    /// Read raw response bytes
    fn read(&mut self, data: &mut [u8]) -> Result<(), BusError>;

    /// Write then read without releasing the bus in between
    fn write_read(&mut self, output: &[u8], input: &mut [u8]) -> Result<(), BusError>;

    /// Read the leading status byte only
    fn read_u8(&mut self) -> Result<u8, BusError> {
        let mut value = [0u8; 1];
        self.read(&mut value)?;
        Ok(value[0])
    }

    /// Helper method to delay for a specific duration
    fn delay(&mut self, duration: Duration);

    /// Executes hardware reset of the transmitter
    fn hardware_reset(&mut self) -> Result<(), BusError>;
}

/// Reset through a GPIO driven high, low, high with a fixed hold between levels
pub struct PinReset<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pin: P,
    delay: D,
}

impl<P, D> PinReset<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> BusReset for PinReset<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn hardware_reset(&mut self) -> Result<(), BusError> {
        let hold = RESET_HOLD.as_millis() as u32;

        self.pin.set_high().map_err(|_| BusError::ControlFailure)?;
        self.delay.delay_ms(hold);
        self.pin.set_low().map_err(|_| BusError::ControlFailure)?;
        self.delay.delay_ms(hold);
        self.pin.set_high().map_err(|_| BusError::ControlFailure)?;

        Ok(())
    }
}

/// Used when the reset line is not wired; reset is skipped
pub struct NoReset;

impl BusReset for NoReset {
    fn hardware_reset(&mut self) -> Result<(), BusError> {
        log::trace!("no reset line configured, skipping reset");
        Ok(())
    }
}

impl<R: BusReset> BusReset for Option<R> {
    fn hardware_reset(&mut self) -> Result<(), BusError> {
        match self {
            Some(reset) => reset.hardware_reset(),
            None => NoReset.hardware_reset(),
        }
    }
}

/// Clock backed by an `embedded-hal` delay provider
pub struct DelayClock<D: DelayNs> {
    delay: D,
}

impl<D: DelayNs> DelayClock<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> BusClock for DelayClock<D> {
    fn delay(&mut self, duration: Duration) {
        self.delay.delay_us(duration.as_micros() as u32);
    }
}

pub struct I2cBus<S, C, R>
where
    S: I2c,
    C: BusClock,
    R: BusReset,
{
    i2c: S,
    address: u8,
    clock: C,
    reset: R,
}

impl<S, C, R> I2cBus<S, C, R>
where
    S: I2c,
    C: BusClock,
    R: BusReset,
{
    pub fn new(i2c: S, clock: C, reset: R) -> Self {
        Self::new_with_address(i2c, SI4713_ADDRESS, clock, reset)
    }

    pub fn new_with_address(i2c: S, address: u8, clock: C, reset: R) -> Self {
        Self {
            i2c,
            address,
            clock,
            reset,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> (S, C, R) {
        (self.i2c, self.clock, self.reset)
    }
}

impl<S, C, R> Bus for I2cBus<S, C, R>
where
    S: I2c,
    C: BusClock,
    R: BusReset,
{
    fn write(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.i2c
            .write(self.address, data)
            .map_err(|_| BusError::CommunicationFailure)
    }

    fn read(&mut self, data: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .read(self.address, data)
            .map_err(|_| BusError::CommunicationFailure)
    }

    fn write_read(&mut self, output: &[u8], input: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(self.address, output, input)
            .map_err(|_| BusError::CommunicationFailure)
    }

    fn delay(&mut self, duration: Duration) {
        self.clock.delay(duration);
    }

    fn hardware_reset(&mut self) -> Result<(), BusError> {
        self.reset.hardware_reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_pin_reset_sequence() {
        let pin = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);

        let mut reset = PinReset::new(pin, NoopDelay::new());
        reset.hardware_reset().expect("reset sequence");

        let (mut pin, _) = reset.release();
        pin.done();
    }

    #[test]
    fn test_missing_reset_line_is_skipped() {
        let mut reset: Option<PinReset<PinMock, NoopDelay>> = None;
        reset.hardware_reset().expect("skipped reset");
    }

    #[test]
    fn test_i2c_transactions_use_address() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x63, vec![0x10, 0x00]),
            I2cTransaction::read(0x63, vec![0x80]),
            I2cTransaction::write_read(0x63, vec![0x14], vec![0x81]),
        ]);

        let mut bus = I2cBus::new(i2c, DelayClock::new(NoopDelay::new()), NoReset);

        bus.write(&[0x10, 0x00]).expect("write");
        assert_eq!(bus.read_u8().expect("read"), 0x80);

        let mut status = [0u8; 1];
        bus.write_read(&[0x14], &mut status).expect("write read");
        assert_eq!(status[0], 0x81);

        let (mut i2c, _, _) = bus.release();
        i2c.done();
    }

    #[test]
    fn test_i2c_error_maps_to_communication_failure() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x11, vec![0x14]).with_error(ErrorKind::Other)
        ]);

        let mut bus =
            I2cBus::new_with_address(i2c, 0x11, DelayClock::new(NoopDelay::new()), NoReset);

        assert_eq!(bus.write(&[0x14]), Err(BusError::CommunicationFailure));

        let (mut i2c, _, _) = bus.release();
        i2c.done();
    }
}
