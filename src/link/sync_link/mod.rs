// src/link/sync_link/mod.rs

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::common::{
    hal_traits::{InstrumentSerial, InstrumentTimer},
    Terminator, Transport,
};
use crate::link::{LinkConfig, LinkError};

mod io_helpers;
#[cfg(test)]
mod mock;

use io_helpers::LineBuffer;

/// Line-oriented link to an instrument over a blocking serial adapter
/// (RS-232 port, USB-GPIB bridge in device mode, ...).
///
/// Every command is written followed by the configured terminator. Text
/// replies are read up to the terminator, binary replies by byte count.
/// Timeouts are reported, never retried.
#[derive(Debug)]
pub struct SyncLink<IF>
where
    IF: InstrumentSerial + InstrumentTimer,
    IF::Error: Debug,
{
    interface: IF,
    config: LinkConfig,
}

impl<IF> SyncLink<IF>
where
    IF: InstrumentSerial + InstrumentTimer,
    IF::Error: Debug,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, LinkConfig::default())
    }

    pub fn with_config(interface: IF, config: LinkConfig) -> Self {
        SyncLink { interface, config }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Releases the underlying serial interface.
    pub fn release(self) -> IF {
        self.interface
    }

    fn read_line(&mut self) -> Result<LineBuffer, LinkError<IF::Error>> {
        let mut buffer = LineBuffer::new();
        self.read_response_line(&mut buffer)?;
        let len = self.config.terminator.strip(&buffer).len();
        buffer.truncate(len);
        Ok(buffer)
    }
}

impl<IF> Transport for SyncLink<IF>
where
    IF: InstrumentSerial + InstrumentTimer,
    IF::Error: Debug,
{
    type Error = LinkError<IF::Error>;

    fn sendcmd(&mut self, command: &str) -> Result<(), Self::Error> {
        self.send_command_bytes(command.as_bytes())
    }

    fn query(&mut self, command: &str) -> Result<String, Self::Error> {
        self.send_command_bytes(command.as_bytes())?;
        let line = self.read_line()?;
        core::str::from_utf8(&line)
            .map(String::from)
            .map_err(|_| LinkError::InvalidUtf8)
    }

    fn read(&mut self, size: Option<usize>) -> Result<Vec<u8>, Self::Error> {
        match size {
            Some(n) => self.read_fixed(n),
            None => Ok(self.read_line()?.to_vec()),
        }
    }

    fn terminator(&self) -> Terminator {
        self.config.terminator
    }

    fn set_terminator(&mut self, terminator: Terminator) {
        log::debug!("line terminator now {:?}", terminator);
        self.config.terminator = terminator;
    }
}
