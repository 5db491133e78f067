use core::fmt;

use crate::{
    command::TxFrequency,
    regs::{self, RSP_GET_REV_LEN, RSP_TX_ASQ_STATUS_LEN, RSP_TX_TUNE_STATUS_LEN},
};

/// Interrupt status byte returned by GET_INT_STATUS and leading every response
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Status(pub u8);

impl Status {
    pub const fn clear_to_send(self) -> bool {
        self.0 & regs::STATUS_CTS != 0
    }

    pub const fn error(self) -> bool {
        self.0 & regs::STATUS_ERR != 0
    }

    pub const fn tune_complete(self) -> bool {
        self.0 & regs::STATUS_STCINT != 0
    }

    pub const fn rds_interrupt(self) -> bool {
        self.0 & regs::STATUS_RDSINT != 0
    }

    pub const fn asq_interrupt(self) -> bool {
        self.0 & regs::STATUS_ASQINT != 0
    }
}

/// TX_TUNE_STATUS response
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct TuneStatus {
    pub frequency: TxFrequency,
    pub dbuv: u8,
    pub antenna_cap: u8,
    pub noise_level: u8,
}

impl TuneStatus {
    pub const fn from_bytes(data: &[u8; RSP_TX_TUNE_STATUS_LEN]) -> Self {
        Self {
            frequency: u16::from_be_bytes([data[2], data[3]]),
            dbuv: data[5],
            antenna_cap: data[6],
            noise_level: data[7],
        }
    }
}

impl fmt::Display for TuneStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{:02}MHz {}dBuV antcap:{} noise:{}",
            self.frequency / 100,
            self.frequency % 100,
            self.dbuv,
            self.antenna_cap,
            self.noise_level
        )
    }
}

/// TX_ASQ_STATUS response
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct AsqStatus {
    /// Overmodulation and input level alarm flags
    pub asq: u8,
    /// Input audio level in dBfs
    pub input_level: i8,
}

impl AsqStatus {
    pub const fn from_bytes(data: &[u8; RSP_TX_ASQ_STATUS_LEN]) -> Self {
        Self {
            asq: data[1],
            input_level: data[4] as i8,
        }
    }
}

/// GET_REV response
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Revision {
    pub part_number: u8,
    pub firmware: [u8; 2],
    pub patch: u16,
    pub component: [u8; 2],
    pub chip_revision: u8,
}

impl Revision {
    pub const fn from_bytes(data: &[u8; RSP_GET_REV_LEN]) -> Self {
        Self {
            part_number: data[1],
            firmware: [data[2], data[3]],
            patch: u16::from_be_bytes([data[4], data[5]]),
            component: [data[6], data[7]],
            chip_revision: data[8],
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Si47{:02} fw:{}.{} patch:0x{:04x} comp:{}.{} rev:{}",
            self.part_number,
            self.firmware[0] as char,
            self.firmware[1] as char,
            self.patch,
            self.component[0] as char,
            self.component[1] as char,
            self.chip_revision as char
        )
    }
}
