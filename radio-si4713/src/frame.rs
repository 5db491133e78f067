/// Longest command issued by the driver (TX_RDS_BUFF)
pub const MAX_COMMAND_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const S: usize> {
    data: [u8; S],
    len: usize,
}

pub type CommandFrame = Frame<MAX_COMMAND_LEN>;

impl<const S: usize> Frame<S> {
    pub const fn new() -> Self {
        Self {
            data: [0u8; S],
            len: 0,
        }
    }

    pub fn new_from_slice(slice: &[u8]) -> Self {
        let mut frame = Self::new();
        frame.push_slice(slice);
        frame
    }

    /// Appends a byte, silently dropping it once the frame is full
    pub fn push(&mut self, value: u8) -> &mut Self {
        if self.len < S {
            self.data[self.len] = value;
            self.len += 1;
        }
        self
    }

    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        let [high, low] = value.to_be_bytes();
        self.push(high).push(low)
    }

    pub fn push_slice(&mut self, values: &[u8]) -> &mut Self {
        for value in values {
            self.push(*value);
        }
        self
    }

    pub fn capacity(&self) -> usize {
        S
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const S: usize> Default for Frame<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stops_at_capacity() {
        let mut frame = Frame::<4>::new();
        frame.push_slice(&[1, 2, 3]).push_u16(0xABCD);

        assert_eq!(frame.len(), 4);
        assert_eq!(frame.as_slice(), &[1, 2, 3, 0xAB]);
    }

    #[test]
    fn test_push_u16_is_big_endian() {
        let mut frame = CommandFrame::new();
        frame.push_u16(0x2C01);

        assert_eq!(frame.as_slice(), &[0x2C, 0x01]);
    }
}
