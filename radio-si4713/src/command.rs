use crate::{
    frame::CommandFrame,
    rds::RdsSlot,
    regs::{self, Opcode, Property, PropertyValue},
};

/// Transmit frequency in 10 kHz units (e.g. 10230 = 102.30 MHz)
pub type TxFrequency = u16;

/// Commands understood by the transmitter, with their arguments
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    PowerUp {
        arg1: u8,
        arg2: u8,
    },
    GetRevision,
    SetProperty {
        property: Property,
        value: PropertyValue,
    },
    GetIntStatus,
    TxTuneFreq {
        frequency: TxFrequency,
    },
    TxTunePower {
        power: u8,
        antenna_cap: u8,
    },
    TxTuneMeasure {
        frequency: TxFrequency,
        antenna_cap: u8,
    },
    TxTuneStatus {
        intack: bool,
    },
    TxAsqStatus {
        intack: bool,
    },
    TxRdsPs {
        slot: u8,
        text: RdsSlot,
    },
    TxRdsBuffer {
        first: bool,
        slot: u8,
        text: RdsSlot,
    },
    GpoCtl(u8),
    GpoSet(u8),
}

impl Command {
    /// Power up in FM transmit mode with crystal oscillator and analog inputs
    pub const fn power_up_tx() -> Self {
        Command::PowerUp {
            arg1: regs::POWER_UP_ARG1_XOSCEN_TX,
            arg2: regs::POWER_UP_ARG2_ANALOG,
        }
    }

    pub const fn opcode(&self) -> Opcode {
        match self {
            Command::PowerUp { .. } => regs::CMD_POWER_UP,
            Command::GetRevision => regs::CMD_GET_REV,
            Command::SetProperty { .. } => regs::CMD_SET_PROPERTY,
            Command::GetIntStatus => regs::CMD_GET_INT_STATUS,
            Command::TxTuneFreq { .. } => regs::CMD_TX_TUNE_FREQ,
            Command::TxTunePower { .. } => regs::CMD_TX_TUNE_POWER,
            Command::TxTuneMeasure { .. } => regs::CMD_TX_TUNE_MEASURE,
            Command::TxTuneStatus { .. } => regs::CMD_TX_TUNE_STATUS,
            Command::TxAsqStatus { .. } => regs::CMD_TX_ASQ_STATUS,
            Command::TxRdsPs { .. } => regs::CMD_TX_RDS_PS,
            Command::TxRdsBuffer { .. } => regs::CMD_TX_RDS_BUFF,
            Command::GpoCtl(_) => regs::CMD_GPO_CTL,
            Command::GpoSet(_) => regs::CMD_GPO_SET,
        }
    }

    /// Serializes the command into the byte layout expected on the wire
    pub fn frame(&self) -> CommandFrame {
        let mut frame = CommandFrame::new();
        frame.push(self.opcode());

        match *self {
            Command::PowerUp { arg1, arg2 } => {
                frame.push(arg1).push(arg2);
            }
            Command::GetRevision => {
                frame.push(0);
            }
            Command::SetProperty { property, value } => {
                frame.push(0).push_u16(property.id()).push_u16(value);
            }
            Command::GetIntStatus => {}
            Command::TxTuneFreq { frequency } => {
                frame.push(0).push_u16(frequency);
            }
            Command::TxTunePower { power, antenna_cap } => {
                frame.push(0).push(0).push(power).push(antenna_cap);
            }
            Command::TxTuneMeasure {
                frequency,
                antenna_cap,
            } => {
                frame.push(0).push_u16(frequency).push(antenna_cap);
            }
            Command::TxTuneStatus { intack } | Command::TxAsqStatus { intack } => {
                frame.push(if intack { regs::ARG_INTACK } else { 0 });
            }
            Command::TxRdsPs { slot, text } => {
                frame.push(slot).push_slice(&text);
            }
            Command::TxRdsBuffer { first, slot, text } => {
                let flags = if first {
                    regs::RDS_BUFF_LDBUFF_MTBUFF
                } else {
                    regs::RDS_BUFF_LDBUFF
                };

                frame
                    .push(flags)
                    .push(regs::RDS_BUFF_GROUP_2A)
                    .push(slot)
                    .push_slice(&text);
            }
            Command::GpoCtl(value) | Command::GpoSet(value) => {
                frame.push(value);
            }
        }

        frame
    }
}

/// Rounds a measurement frequency down to the 50 kHz grid
pub const fn align_measure_frequency(frequency: TxFrequency) -> TxFrequency {
    frequency - (frequency % regs::TX_MEASURE_STEP)
}
