// src/link/sync_link/io_helpers.rs

use alloc::vec::Vec;
use arrayvec::ArrayVec;
use core::fmt::Debug;
use core::time::Duration;
use nb::Result as NbResult;

use super::SyncLink;
use crate::common::{
    hal_traits::{InstrumentSerial, InstrumentTimer},
    timing,
};
use crate::link::LinkError;

pub(super) type LineBuffer = ArrayVec<u8, { timing::MAX_LINE_LEN }>;

impl<IF> SyncLink<IF>
where
    IF: InstrumentSerial + InstrumentTimer,
    IF::Error: Debug,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, LinkError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(LinkError::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(LinkError::Io(e)),
            }
        }
    }

    /// Writes `cmd_bytes` followed by the configured terminator, then flushes.
    pub(super) fn send_command_bytes(&mut self, cmd_bytes: &[u8]) -> Result<(), LinkError<IF::Error>> {
        let terminator = self.config.terminator.as_bytes();
        log::trace!("tx {:02X?} + {:02X?}", cmd_bytes, terminator);

        for byte in cmd_bytes.iter().chain(terminator) {
            self.execute_blocking_io_with_timeout(timing::WRITE_BYTE_TIMEOUT, |iface| {
                iface.write_byte(*byte)
            })?;
        }

        self.execute_blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |iface| iface.flush())
    }

    /// Reads one reply line, terminator included, into `buffer`.
    pub(super) fn read_response_line(
        &mut self,
        buffer: &mut LineBuffer,
    ) -> Result<(), LinkError<IF::Error>> {
        buffer.clear();
        loop {
            if buffer.is_full() {
                return Err(LinkError::BufferOverflow {
                    needed: buffer.len() + 1,
                    got: buffer.capacity(),
                });
            }

            let timeout = self.byte_timeout(buffer.len());
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(byte) => {
                    buffer.push(byte);
                    if self.config.terminator.terminates(buffer.as_slice()) {
                        log::trace!("rx {:02X?}", buffer.as_slice());
                        return Ok(());
                    }
                }
                Err(LinkError::Timeout) if !buffer.is_empty() => {
                    return Err(LinkError::IncompleteLine);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads up to `size` raw bytes. A reply that stops early is returned
    /// short so the caller can report how much arrived.
    pub(super) fn read_fixed(&mut self, size: usize) -> Result<Vec<u8>, LinkError<IF::Error>> {
        let mut bytes = Vec::with_capacity(size);
        while bytes.len() < size {
            let timeout = self.byte_timeout(bytes.len());
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(byte) => bytes.push(byte),
                Err(LinkError::Timeout) if !bytes.is_empty() => break,
                Err(e) => return Err(e),
            }
        }
        log::trace!("rx {:02X?}", bytes.as_slice());
        Ok(bytes)
    }

    fn byte_timeout(&self, received: usize) -> Duration {
        if received == 0 {
            self.config.response_timeout
        } else {
            self.config.inter_byte_timeout
        }
    }
}
