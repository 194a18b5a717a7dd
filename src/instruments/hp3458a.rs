// src/instruments/hp3458a.rs

//! HP3458A 8.5 digit bench multimeter.
//!
//! A pre-SCPI instrument supporting DCV, ACV, ACV+DCV, 2 and 4 wire ohms,
//! current, frequency/period and the sampling functions. It accepts numeric
//! parameters for every enumerated setting and answers queries with them, so
//! its code tables are integer-coded throughout.

use core::fmt::Debug;

use crate::common::{ByteOrder, CodeTable, InstrumentError, Terminator, Transport, WireCode};
use crate::hpml::catalog::{
    Mode, OutputFormat, ToggleMode, TriggerMode, FORMAT_CODES, RANGE_PRESET_CODES,
};
use crate::hpml::{Dialect, HpmlMultimeter, InitStep, Profile, ReplySplit};

pub static MODE_CODES: CodeTable<Mode> = CodeTable::new(&[
    (Mode::VoltageDc, WireCode::Int(1)),
    (Mode::VoltageAc, WireCode::Int(2)),
    (Mode::VoltageAcDc, WireCode::Int(3)),
    (Mode::Resistance, WireCode::Int(4)),
    (Mode::FourPointResistance, WireCode::Int(5)),
    (Mode::CurrentDc, WireCode::Int(6)),
    (Mode::CurrentAc, WireCode::Int(7)),
    (Mode::CurrentAcDc, WireCode::Int(8)),
    (Mode::Frequency, WireCode::Int(9)),
    (Mode::Period, WireCode::Int(10)),
    (Mode::DirectSamplingAc, WireCode::Int(11)),
    (Mode::DirectSamplingDc, WireCode::Int(12)),
    (Mode::SubSamplingAc, WireCode::Int(13)),
    (Mode::SubSamplingDc, WireCode::Int(14)),
]);

// Event codes 1-8; 6 (TIMER) is only valid for NRDGS and not modelled.
pub static TRIGGER_CODES: CodeTable<TriggerMode> = CodeTable::new(&[
    (TriggerMode::Auto, WireCode::Int(1)),
    (TriggerMode::External, WireCode::Int(2)),
    (TriggerMode::Single, WireCode::Int(3)),
    (TriggerMode::Hold, WireCode::Int(4)),
    (TriggerMode::Synchronous, WireCode::Int(5)),
    (TriggerMode::Level, WireCode::Int(7)),
    (TriggerMode::Line, WireCode::Int(8)),
]);

pub static TOGGLE_CODES: CodeTable<ToggleMode> = CodeTable::new(&[
    (ToggleMode::Off, WireCode::Int(0)),
    (ToggleMode::On, WireCode::Int(1)),
]);

/// Vendor-recommended baseline for fast binary readings. Arm is held while
/// the formats change, then released to synchronous; the terminator switch
/// comes last so every earlier line still uses the power-on framing.
pub static INIT_SEQUENCE: [InitStep; 7] = [
    InitStep::TriggerArm(TriggerMode::Hold),
    InitStep::MemoryFormat(OutputFormat::Dreal),
    InitStep::OutputFormat(OutputFormat::Dreal),
    InitStep::Display(ToggleMode::Off),
    InitStep::Autozero(ToggleMode::Off),
    InitStep::TriggerArm(TriggerMode::Synchronous),
    InitStep::Terminator(Terminator::Cr),
];

pub static PROFILE: Profile = Profile {
    model: "HP3458A",
    dialect: Dialect {
        mode_codes: &MODE_CODES,
        trigger_codes: &TRIGGER_CODES,
        format_codes: &FORMAT_CODES,
        toggle_codes: &TOGGLE_CODES,
        range_codes: &RANGE_PRESET_CODES,
        reply_split: ReplySplit::Comma,
        // Event code 3 is SGL in the numeric trigger table.
        software_trigger: "TRIG 3",
        self_test_query: "TEST;ERR?",
        byte_order: ByteOrder::Big,
        supports_input_range: true,
    },
    power_on_format: OutputFormat::Ascii,
    init: &INIT_SEQUENCE,
};

/// Entry point for the HP3458A.
///
/// ```ignore
/// let mut dmm = Hp3458a::open(gpib)?;
/// dmm.set_mode(Mode::CurrentDc)?;
/// let reading = dmm.measure(None)?;
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Hp3458a;

impl Hp3458a {
    /// Opens the instrument and applies [`INIT_SEQUENCE`].
    pub fn open<T>(transport: T) -> Result<HpmlMultimeter<T>, InstrumentError<T::Error>>
    where
        T: Transport,
        T::Error: Debug,
    {
        HpmlMultimeter::open(transport, &PROFILE)
    }
}
