use core::time::Duration;

use radio_si4713::{
    bus::{Bus, BusError},
    Si4713,
};

use crate::{config::StationConfig, error::FmtxError};

/// Bus of a host without a transmitter attached
pub struct DummyBus;

impl Bus for DummyBus {
    fn write(&mut self, _data: &[u8]) -> Result<(), BusError> {
        Err(BusError::CommunicationFailure)
    }

    fn read(&mut self, _data: &mut [u8]) -> Result<(), BusError> {
        Err(BusError::CommunicationFailure)
    }

    fn write_read(&mut self, _output: &[u8], _input: &mut [u8]) -> Result<(), BusError> {
        Err(BusError::CommunicationFailure)
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn hardware_reset(&mut self) -> Result<(), BusError> {
        Ok(())
    }
}

pub type PlatformBus = DummyBus;

pub fn create_transmitter(
    config: &StationConfig,
    name: &'static str,
) -> Result<Si4713<PlatformBus>, FmtxError> {
    log::warn!(
        "{}: host machine has no i2c transmitter ({} ignored)",
        name,
        config.device.i2c
    );

    Ok(Si4713::new(DummyBus, name, config.radio_config()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_transmitter_fails_to_begin() {
        let mut radio =
            create_transmitter(&StationConfig::default(), "dummy").expect("dummy transmitter");

        assert_eq!(
            radio.begin(),
            Err(radio_si4713::error::RadioError::CommunicationFailure)
        );
    }
}
