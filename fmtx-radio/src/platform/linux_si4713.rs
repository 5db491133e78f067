use libgpiod::line::Value;
use radio_si4713::bus::BusClock;
use radio_si4713::bus::BusError;
use radio_si4713::bus::BusReset;
use radio_si4713::bus::RESET_HOLD;

use super::linux::LinuxClock;
use super::linux::LinuxGpioReset;

impl BusReset for LinuxGpioReset {
    fn hardware_reset(&mut self) -> Result<(), BusError> {
        self.request
            .set_value(self.line, Value::Active)
            .map_err(|_| BusError::ControlFailure)?;

        std::thread::sleep(RESET_HOLD);

        self.request
            .set_value(self.line, Value::InActive)
            .map_err(|_| BusError::ControlFailure)?;

        std::thread::sleep(RESET_HOLD);

        self.request
            .set_value(self.line, Value::Active)
            .map_err(|_| BusError::ControlFailure)?;

        Ok(())
    }
}

impl BusClock for LinuxClock {
    fn delay(&mut self, duration: std::time::Duration) {
        std::thread::sleep(duration);
    }
}
