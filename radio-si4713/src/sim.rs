use std::collections::VecDeque;

use core::time::Duration;

use crate::bus::{Bus, BusError};
use crate::regs;

/// Simulated transmitter answering the command protocol from memory
pub(crate) struct SimBus {
    /// Every framed command written, in order
    pub writes: Vec<Vec<u8>>,
    pub part_number: u8,
    pub tune_status: [u8; 8],
    pub asq_status: [u8; 5],
    /// Status reads answered without CTS after each command
    pub busy_reads: u32,
    /// When false the chip never raises CTS
    pub cts: bool,
    pub fail_writes: bool,
    /// Scripted GET_INT_STATUS answers, `default_int_status` once drained
    pub int_status: VecDeque<u8>,
    pub default_int_status: u8,
    pub status_reads: u32,
    pub status_queries: u32,
    pub delays: Vec<Duration>,
    pub resets: u32,
    last_opcode: u8,
    pending_busy: u32,
}

impl SimBus {
    pub fn new(part_number: u8) -> Self {
        Self {
            writes: Vec::new(),
            part_number,
            tune_status: [0x80, 0, 0, 0, 0, 0, 0, 0],
            asq_status: [0x80, 0, 0, 0, 0],
            busy_reads: 0,
            cts: true,
            fail_writes: false,
            int_status: VecDeque::new(),
            default_int_status: regs::STATUS_TUNE_COMPLETE,
            status_reads: 0,
            status_queries: 0,
            delays: Vec::new(),
            resets: 0,
            last_opcode: 0,
            pending_busy: 0,
        }
    }

    pub fn commands(&self, opcode: u8) -> impl Iterator<Item = &Vec<u8>> {
        self.writes.iter().filter(move |frame| frame[0] == opcode)
    }

    fn response(&self) -> Vec<u8> {
        match self.last_opcode {
            regs::CMD_GET_REV => vec![
                regs::STATUS_CTS,
                self.part_number,
                b'3',
                b'0',
                0x00,
                0x00,
                b'0',
                b'0',
                b'A',
            ],
            regs::CMD_TX_TUNE_STATUS => self.tune_status.to_vec(),
            regs::CMD_TX_ASQ_STATUS => self.asq_status.to_vec(),
            _ => vec![regs::STATUS_CTS],
        }
    }
}

impl Bus for SimBus {
    fn write(&mut self, data: &[u8]) -> Result<(), BusError> {
        if self.fail_writes {
            return Err(BusError::CommunicationFailure);
        }

        self.writes.push(data.to_vec());
        self.last_opcode = data[0];
        self.pending_busy = self.busy_reads;

        Ok(())
    }

    fn read(&mut self, data: &mut [u8]) -> Result<(), BusError> {
        if data.len() == 1 {
            self.status_reads += 1;

            if !self.cts || self.pending_busy > 0 {
                self.pending_busy = self.pending_busy.saturating_sub(1);
                data[0] = 0;
                return Ok(());
            }
        }

        let response = self.response();
        for (index, value) in data.iter_mut().enumerate() {
            *value = response.get(index).copied().unwrap_or(0);
        }

        Ok(())
    }

    fn write_read(&mut self, output: &[u8], input: &mut [u8]) -> Result<(), BusError> {
        if output.first() != Some(&regs::CMD_GET_INT_STATUS) {
            return Err(BusError::CommunicationFailure);
        }

        self.status_queries += 1;
        input[0] = self
            .int_status
            .pop_front()
            .unwrap_or(self.default_int_status);

        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }

    fn hardware_reset(&mut self) -> Result<(), BusError> {
        self.resets += 1;
        Ok(())
    }
}
