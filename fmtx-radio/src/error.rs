use radio_si4713::{bus::BusError, error::RadioError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmtxError {
    HardwareError,
    IncorrectSettings(String),
    UnexpectedPart(u8),
    Timeout,
}

impl From<RadioError> for FmtxError {
    fn from(value: RadioError) -> Self {
        match value {
            RadioError::CommunicationFailure => Self::HardwareError,
            RadioError::UnexpectedPart(part_number) => Self::UnexpectedPart(part_number),
            RadioError::Timeout => Self::Timeout,
        }
    }
}

impl From<BusError> for FmtxError {
    fn from(value: BusError) -> Self {
        RadioError::from(value).into()
    }
}

impl From<std::io::Error> for FmtxError {
    fn from(value: std::io::Error) -> Self {
        Self::IncorrectSettings(value.to_string())
    }
}

impl From<toml::de::Error> for FmtxError {
    fn from(value: toml::de::Error) -> Self {
        Self::IncorrectSettings(value.to_string())
    }
}

impl core::fmt::Display for FmtxError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            FmtxError::HardwareError => write!(f, "hardware error"),
            FmtxError::IncorrectSettings(reason) => write!(f, "incorrect settings: {}", reason),
            FmtxError::UnexpectedPart(part_number) => {
                write!(f, "unexpected part Si47{:02}", part_number)
            }
            FmtxError::Timeout => write!(f, "timeout"),
        }
    }
}

impl std::error::Error for FmtxError {}
