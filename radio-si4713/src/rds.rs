use crate::regs::{COMPONENT_PILOT, COMPONENT_RDS, COMPONENT_STEREO};

/// Width of a single RDS text slot in bytes
pub const RDS_SLOT_SIZE: usize = 4;

pub type RdsSlot = [u8; RDS_SLOT_SIZE];

const RDS_PADDING: u8 = b' ';

/// RDS session parameters written by `begin_rds`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RdsConfig {
    pub audio_deviation: u16, // 10 Hz units
    pub rds_deviation: u16,   // 10 Hz units
    pub interrupt_source: u16,
    pub ps_mix: u16,
    pub ps_misc: u16,
    pub ps_repeat_count: u16,
    pub message_count: u16,
    pub alternate_frequency: u16,
    pub fifo_size: u16,
    pub component_enable: u16,
}

impl Default for RdsConfig {
    fn default() -> Self {
        Self {
            audio_deviation: 6625, // 66.25 kHz
            rds_deviation: 200,    // 2 kHz
            interrupt_source: 0x0001,
            ps_mix: 0x03,     // 50% mix
            ps_misc: 0x1008,  // RDSD0 & RDSMS
            ps_repeat_count: 3,
            message_count: 1,
            alternate_frequency: 0xE0E0, // no AF
            fifo_size: 0,
            component_enable: COMPONENT_PILOT | COMPONENT_STEREO | COMPONENT_RDS,
        }
    }
}

/// Splits text into 4 byte slots, the last one padded with spaces.
///
/// The number of slots is `ceil(len / 4)`; an empty string yields none.
pub fn rds_slots(text: &str) -> impl Iterator<Item = RdsSlot> + '_ {
    text.as_bytes().chunks(RDS_SLOT_SIZE).map(|chunk| {
        let mut slot = [RDS_PADDING; RDS_SLOT_SIZE];
        slot[..chunk.len()].copy_from_slice(chunk);
        slot
    })
}

pub fn rds_slot_count(text: &str) -> usize {
    text.len().div_ceil(RDS_SLOT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count_matches_length() {
        let text = "ADAFRUIT RADIO STATION 101.9";
        for len in 0..=text.len() {
            let part = &text[..len];
            let slots: Vec<RdsSlot> = rds_slots(part).collect();

            assert_eq!(slots.len(), len.div_ceil(4));
            assert_eq!(slots.len(), rds_slot_count(part));
        }
    }

    #[test]
    fn test_last_slot_is_padded() {
        let slots: Vec<RdsSlot> = rds_slots("Radio").collect();

        assert_eq!(slots, vec![*b"Radi", *b"o   "]);
    }

    #[test]
    fn test_aligned_text_is_not_padded() {
        let slots: Vec<RdsSlot> = rds_slots("FM101.9!").collect();

        assert_eq!(slots, vec![*b"FM10", *b"1.9!"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(rds_slots("").count(), 0);
    }
}
