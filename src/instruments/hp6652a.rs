// src/instruments/hp6652a.rs

//! HP6652A single output system power supply.
//!
//! Speaks a SCPI subset. May work with other HP66XYA supplies but has only
//! been exercised against the 6652A.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Debug;

use crate::common::{
    hal_traits::TransportExt, CodeTable, InstrumentError, Quantity, Setpoint, Transport, Unit,
    WireCode, BOOL_TABLE,
};
use crate::hpml::parse::parse_number;

type Result<T, E> = core::result::Result<T, InstrumentError<E>>;

/// Longest string the front panel accepts, counting punctuation.
pub const DISPLAY_TEXT_MAX: usize = 15;

/// `DISP:MODE`: `true` lets [`Hp6652a::display_text`] drive the LCD.
pub static DISPLAY_MODE_CODES: CodeTable<bool> =
    CodeTable::new(&[(true, WireCode::Text("TEXT")), (false, WireCode::Text("NORM"))]);

#[derive(Debug)]
pub struct Hp6652a<T: Transport> {
    transport: T,
}

impl<T> Hp6652a<T>
where
    T: Transport,
    T::Error: Debug,
{
    /// Wraps `transport`. Nothing is sent.
    pub fn new(transport: T) -> Self {
        Hp6652a { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// The supply has a single output, so its only channel is itself.
    pub fn channel(&mut self) -> &mut Self {
        self
    }

    fn query_quantity(&mut self, command: &str, unit: Unit) -> Result<Quantity, T::Error> {
        let reply = self.transport.ask(command)?;
        match parse_number(&reply) {
            Some(value) => Ok(Quantity::new(value, unit)),
            None => Err(InstrumentError::InvalidResponse(reply)),
        }
    }

    fn send_setpoint(&mut self, header: &str, value: Setpoint, unit: Unit) -> Result<(), T::Error> {
        let value = value.in_unit(unit)?;
        self.transport.send_line(&format!("{} {}", header, value))
    }

    fn query_coded(&mut self, command: &str, table: &CodeTable<bool>) -> Result<bool, T::Error> {
        let reply = self.transport.ask(command)?;
        table.decode(&reply)
    }

    fn send_coded(&mut self, header: &str, table: &CodeTable<bool>, state: bool) -> Result<(), T::Error> {
        let code = table.encode::<T::Error>(state)?;
        self.transport.send_line(&format!("{} {}", header, code))
    }

    // --- Setpoints ---

    /// Programmed output voltage.
    pub fn voltage(&mut self) -> Result<Quantity, T::Error> {
        self.query_quantity("VOLT?", Unit::Volt)
    }

    /// No bounds checking is done; bare numbers are taken as volts.
    pub fn set_voltage(&mut self, value: impl Into<Setpoint>) -> Result<(), T::Error> {
        self.send_setpoint("VOLT", value.into(), Unit::Volt)
    }

    /// Programmed output current.
    pub fn current(&mut self) -> Result<Quantity, T::Error> {
        self.query_quantity("CURR?", Unit::Ampere)
    }

    /// No bounds checking is done; bare numbers are taken as amperes.
    pub fn set_current(&mut self, value: impl Into<Setpoint>) -> Result<(), T::Error> {
        self.send_setpoint("CURR", value.into(), Unit::Ampere)
    }

    /// Voltage measured at the sense terminals.
    pub fn voltage_sense(&mut self) -> Result<Quantity, T::Error> {
        self.query_quantity("MEAS:VOLT?", Unit::Volt)
    }

    /// Output current as measured by the supply.
    pub fn current_sense(&mut self) -> Result<Quantity, T::Error> {
        self.query_quantity("MEAS:CURR?", Unit::Ampere)
    }

    // --- Protection ---

    pub fn overvoltage(&mut self) -> Result<Quantity, T::Error> {
        self.query_quantity("VOLT:PROT?", Unit::Volt)
    }

    pub fn set_overvoltage(&mut self, value: impl Into<Setpoint>) -> Result<(), T::Error> {
        self.send_setpoint("VOLT:PROT", value.into(), Unit::Volt)
    }

    /// Overcurrent protection state.
    pub fn overcurrent(&mut self) -> Result<bool, T::Error> {
        self.query_coded("CURR:PROT:STAT?", &BOOL_TABLE)
    }

    pub fn set_overcurrent(&mut self, enabled: bool) -> Result<(), T::Error> {
        self.send_coded("CURR:PROT:STAT", &BOOL_TABLE, enabled)
    }

    /// Clears latched overvoltage/overcurrent faults so the output resumes.
    pub fn reset(&mut self) -> Result<(), T::Error> {
        self.transport.send_line("OUTP:PROT:CLE")
    }

    // --- Output ---

    pub fn output(&mut self) -> Result<bool, T::Error> {
        self.query_coded("OUTP?", &BOOL_TABLE)
    }

    pub fn set_output(&mut self, enabled: bool) -> Result<(), T::Error> {
        self.send_coded("OUTP", &BOOL_TABLE, enabled)
    }

    // --- Front Panel ---

    pub fn display_mode_text(&mut self) -> Result<bool, T::Error> {
        self.query_coded("DISP:MODE?", &DISPLAY_MODE_CODES)
    }

    pub fn set_display_mode_text(&mut self, text: bool) -> Result<(), T::Error> {
        self.send_coded("DISP:MODE", &DISPLAY_MODE_CODES, text)
    }

    /// Shows `text` on the LCD.
    ///
    /// The text is uppercased, then cut to [`DISPLAY_TEXT_MAX`] characters.
    /// The panel cannot be read back, so the string actually sent is
    /// returned. Punctuation is not validated; an invalid string is ignored
    /// by the instrument without an error.
    pub fn display_text(&mut self, text: &str) -> Result<String, T::Error> {
        let shown: String = text.to_uppercase().chars().take(DISPLAY_TEXT_MAX).collect();
        self.transport.send_line(&format!("DISP:TEXT \"{}\"", shown))?;
        Ok(shown)
    }

    /// Identification string (`*IDN?`), trimmed.
    pub fn name(&mut self) -> Result<String, T::Error> {
        let reply = self.transport.ask("*IDN?")?;
        Ok(reply.trim().to_string())
    }
}
