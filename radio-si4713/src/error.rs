use crate::bus::BusError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RadioError {
    CommunicationFailure,
    /// GET_REV reported a part other than the Si4713
    UnexpectedPart(u8),
    Timeout,
}

impl From<BusError> for RadioError {
    fn from(value: BusError) -> Self {
        match value {
            BusError::Timeout => Self::Timeout,
            BusError::CommunicationFailure | BusError::ControlFailure => {
                Self::CommunicationFailure
            }
        }
    }
}
