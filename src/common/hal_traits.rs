// src/common/hal_traits.rs

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

use super::error::InstrumentError;
use super::frame::Terminator;

/// Request/response link to a single instrument (GPIB, serial, VISA, ...).
///
/// Implementations own the connection and its wire-level timeouts. Drivers
/// in this crate perform at most one write and at most one read per call and
/// never retry; the transport is exclusively owned by one driver instance.
pub trait Transport {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Transmits one command line, appending the configured terminator.
    fn sendcmd(&mut self, command: &str) -> Result<(), Self::Error>;

    /// Transmits `command` then reads one terminated reply line, returned
    /// without its terminator.
    fn query(&mut self, command: &str) -> Result<String, Self::Error>;

    /// Reads exactly `size` raw bytes, or one terminated line (terminator
    /// stripped) when `size` is `None`.
    fn read(&mut self, size: Option<usize>) -> Result<Vec<u8>, Self::Error>;

    /// The line terminator currently used for framing.
    fn terminator(&self) -> Terminator;

    /// Changes the line terminator used for subsequent commands and replies.
    fn set_terminator(&mut self, terminator: Terminator);
}

/// Driver-side helpers over any [`Transport`]: logging and error wrapping.
pub(crate) trait TransportExt: Transport {
    fn send_line(&mut self, command: &str) -> Result<(), InstrumentError<Self::Error>> {
        log::debug!("-> {}", command);
        self.sendcmd(command).map_err(InstrumentError::Transport)
    }

    fn ask(&mut self, command: &str) -> Result<String, InstrumentError<Self::Error>> {
        log::debug!("-> {}", command);
        let reply = self.query(command).map_err(InstrumentError::Transport)?;
        log::debug!("<- {}", reply);
        Ok(reply)
    }

    fn read_raw(&mut self, size: Option<usize>) -> Result<Vec<u8>, InstrumentError<Self::Error>> {
        let bytes = self.read(size).map_err(InstrumentError::Transport)?;
        log::debug!("<- {} bytes", bytes.len());
        Ok(bytes)
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

// --- Byte-Level Seam For The Bundled Serial Link ---

/// Monotonic point in time as reported by an [`InstrumentTimer`].
pub trait InstrumentInstant:
    Copy + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> InstrumentInstant for T where
    T: Copy + PartialOrd + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the clock and delay operations the serial link needs.
pub trait InstrumentTimer {
    type Instant: InstrumentInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Current time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for non-blocking byte-level serial communication.
pub trait InstrumentSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
