/// Si4710/11/12/13 Programming Guide: Command and Property Summary

pub type Opcode = u8;
pub type PropertyValue = u16;

/// 7-bit address with SEN pulled high
pub const SI4713_ADDRESS: u8 = 0x63;
/// 7-bit address with SEN pulled low
pub const SI4713_ADDRESS_ALT: u8 = 0x11;

/// Part number reported by GET_REV for the Si4713
pub const SI4713_PART_NUMBER: u8 = 13;

// Commands
pub(crate) const CMD_POWER_UP: Opcode = 0x01;
pub(crate) const CMD_GET_REV: Opcode = 0x10;
pub(crate) const CMD_SET_PROPERTY: Opcode = 0x12;
pub(crate) const CMD_GET_INT_STATUS: Opcode = 0x14;
pub(crate) const CMD_TX_TUNE_FREQ: Opcode = 0x30;
pub(crate) const CMD_TX_TUNE_POWER: Opcode = 0x31;
pub(crate) const CMD_TX_TUNE_MEASURE: Opcode = 0x32;
pub(crate) const CMD_TX_TUNE_STATUS: Opcode = 0x33;
pub(crate) const CMD_TX_ASQ_STATUS: Opcode = 0x34;
pub(crate) const CMD_TX_RDS_BUFF: Opcode = 0x35;
pub(crate) const CMD_TX_RDS_PS: Opcode = 0x36;
pub(crate) const CMD_GPO_CTL: Opcode = 0x80;
pub(crate) const CMD_GPO_SET: Opcode = 0x81;

// POWER_UP arguments
pub(crate) const POWER_UP_ARG1_XOSCEN_TX: u8 = 0x12; // crystal oscillator enabled, FM transmit
pub(crate) const POWER_UP_ARG2_ANALOG: u8 = 0x50; // analog audio inputs

// Status byte
pub const STATUS_CTS: u8 = 0b1000_0000;
pub const STATUS_ERR: u8 = 0b0100_0000;
pub const STATUS_RDSINT: u8 = 0b0000_0100;
pub const STATUS_ASQINT: u8 = 0b0000_0010;
pub const STATUS_STCINT: u8 = 0b0000_0001;

/// CTS together with the seek/tune complete interrupt
pub const STATUS_TUNE_COMPLETE: u8 = STATUS_CTS | STATUS_STCINT;

// Query arguments
pub(crate) const ARG_INTACK: u8 = 0x01;

// TX_RDS_BUFF arguments
pub(crate) const RDS_BUFF_LDBUFF_MTBUFF: u8 = 0x06; // load and empty circular buffer first
pub(crate) const RDS_BUFF_LDBUFF: u8 = 0x04;
pub(crate) const RDS_BUFF_GROUP_2A: u8 = 0x20;

/// Transmit tune frequencies are multiples of 50 kHz
pub const TX_MEASURE_STEP: u16 = 5;

/// Response sizes including the status byte
pub(crate) const RSP_GET_REV_LEN: usize = 9;
pub(crate) const RSP_TX_TUNE_STATUS_LEN: usize = 8;
pub(crate) const RSP_TX_ASQ_STATUS_LEN: usize = 5;

/// Chip properties written through SET_PROPERTY
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u16)]
pub enum Property {
    GpoInterruptEnable = 0x0001,
    DigitalInputFormat = 0x0101,
    DigitalInputSampleRate = 0x0103,
    RefClockFrequency = 0x0201,
    RefClockPrescale = 0x0202,

    TxComponentEnable = 0x2100,
    TxAudioDeviation = 0x2101,
    TxPilotDeviation = 0x2102,
    TxRdsDeviation = 0x2103,
    TxLineInputLevel = 0x2104,
    TxLineInputMute = 0x2105,
    TxPreemphasis = 0x2106,
    TxPilotFrequency = 0x2107,

    TxAcompEnable = 0x2200,
    TxAcompThreshold = 0x2201,
    TxAcompAttackTime = 0x2202,
    TxAcompReleaseTime = 0x2203,
    TxAcompGain = 0x2204,
    TxLimiterReleaseTime = 0x2205,

    TxAsqInterruptSource = 0x2300,
    TxAsqLevelLow = 0x2301,
    TxAsqDurationLow = 0x2302,
    TxAsqLevelHigh = 0x2303,
    TxAsqDurationHigh = 0x2304,

    TxRdsInterruptSource = 0x2C00,
    TxRdsPi = 0x2C01,
    TxRdsPsMix = 0x2C02,
    TxRdsPsMisc = 0x2C03,
    TxRdsPsRepeatCount = 0x2C04,
    TxRdsMessageCount = 0x2C05,
    TxRdsPsAf = 0x2C06,
    TxRdsFifoSize = 0x2C07,
}

impl Property {
    pub const fn id(self) -> u16 {
        self as u16
    }
}

/// TX_PREEMPHASIS values
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u16)]
pub enum Preemphasis {
    Us75 = 0, // USA
    Us50 = 1, // Europe, Japan
    Disabled = 2,
}

/// TX_COMPONENT_ENABLE bits
pub const COMPONENT_PILOT: u16 = 0b001;
pub const COMPONENT_STEREO: u16 = 0b010;
pub const COMPONENT_RDS: u16 = 0b100;
