use libgpiod::line::Offset;
use libgpiod::line::Value;

use linux_embedded_hal::I2cdev;

use crate::error::FmtxError;

pub type LinuxI2c = I2cdev;

/// Reset line of the transmitter, driven high when requested
pub struct LinuxGpioReset {
    pub(super) line: Offset,
    pub(super) request: libgpiod::request::Request,
}

impl LinuxGpioReset {
    pub fn new(line_name: &str, name: &str) -> Result<Self, FmtxError> {
        let gpio = create_gpio_by_name(&format!("{}-si4713-rst", name), line_name, {
            let mut settings = libgpiod::line::Settings::new()?;
            settings.set_direction(libgpiod::line::Direction::Output)?;
            settings.set_output_value(Value::Active)?;
            settings.set_active_low(false);
            settings
        })?;

        Ok(Self {
            line: gpio.0,
            request: gpio.1,
        })
    }
}

pub struct LinuxClock;

impl LinuxClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxClock {
    fn default() -> Self {
        Self::new()
    }
}

pub fn open_i2c(path: &str) -> Result<LinuxI2c, FmtxError> {
    I2cdev::new(path).map_err(|err| {
        log::error!("failed to open i2c bus '{}': {}", path, err);
        FmtxError::HardwareError
    })
}

fn create_gpio_by_name(
    name: &str,
    line_name: &str,
    line_settings: libgpiod::line::Settings,
) -> Result<(Offset, libgpiod::request::Request), FmtxError> {
    for chip in libgpiod::gpiochip_devices(&"/dev")? {
        if let Ok(offset) = chip.line_offset_from_name(line_name) {
            let mut line_config = libgpiod::line::Config::new()?;
            line_config.add_line_settings(&[offset], line_settings)?;

            let mut req_config = libgpiod::request::Config::new()?;

            let request = chip.request_lines(Some(req_config.set_consumer(name)?), &line_config)?;

            return Ok((offset, request));
        }
    }

    log::error!(
        "gpio line with name '{}' not found (for {})",
        line_name,
        name
    );

    Err(FmtxError::HardwareError)
}

impl From<libgpiod::Error> for FmtxError {
    fn from(_value: libgpiod::Error) -> Self {
        Self::HardwareError
    }
}
