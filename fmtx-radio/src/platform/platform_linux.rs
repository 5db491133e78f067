use radio_si4713::{bus::I2cBus, Si4713};

use crate::{
    config::StationConfig,
    error::FmtxError,
    platform::linux::{open_i2c, LinuxClock, LinuxGpioReset, LinuxI2c},
};

pub type LinuxSi4713Bus = I2cBus<LinuxI2c, LinuxClock, Option<LinuxGpioReset>>;

pub type PlatformBus = LinuxSi4713Bus;

pub fn create_transmitter(
    config: &StationConfig,
    name: &'static str,
) -> Result<Si4713<PlatformBus>, FmtxError> {
    let device = &config.device;

    let i2c = open_i2c(&device.i2c)?;

    let reset = match &device.reset_line {
        Some(line_name) => Some(LinuxGpioReset::new(line_name, name)?),
        None => {
            log::warn!("{}: no reset line configured", name);
            None
        }
    };

    log::info!(
        "{}: si4713 on {} @ 0x{:02x}",
        name,
        device.i2c,
        device.address
    );

    let bus = I2cBus::new_with_address(i2c, device.address, LinuxClock::new(), reset);

    Ok(Si4713::new(bus, name, config.radio_config()))
}
