// src/hpml/catalog.rs

//! HP Multimeter Language enumeration catalog.
//!
//! The variants below are the shared vocabulary. Their wire codes live in the
//! per-model [`CodeTable`]s; the tables in this module describe the generic
//! HPML dialect (mnemonic-style codes), [`crate::instruments::hp3458a`]
//! supplies the integer-coded HP3458A tables.

use core::fmt;

use crate::common::{
    CatalogVariant, CodeTable, InstrumentError, Quantity, Setpoint, Unit, WireCode,
};

// --- Measurement Mode ---

/// Measurement function (`FUNC`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    VoltageDc,
    VoltageAc,
    VoltageAcDc,
    CurrentDc,
    CurrentAc,
    CurrentAcDc,
    Resistance,
    FourPointResistance,
    Frequency,
    Period,
    DirectSamplingAc,
    DirectSamplingDc,
    SubSamplingAc,
    SubSamplingDc,
}

impl CatalogVariant for Mode {
    const NAME: &'static str = "Mode";

    fn not_in_table<E: fmt::Debug>(self) -> InstrumentError<E> {
        InstrumentError::InvalidMode(self)
    }
}

// --- Unit Table ---

/// Physical unit of readings taken in `mode`.
///
/// AC+DC and sampling modes have no defined unit here and yield
/// `UnsupportedMode`; callers that only decorate readings should fall back to
/// a bare value.
pub fn unit_for<E: fmt::Debug>(mode: Mode) -> Result<Unit, InstrumentError<E>> {
    match mode {
        Mode::VoltageDc | Mode::VoltageAc => Ok(Unit::Volt),
        Mode::CurrentDc | Mode::CurrentAc => Ok(Unit::Ampere),
        Mode::Resistance | Mode::FourPointResistance => Ok(Unit::Ohm),
        Mode::Frequency => Ok(Unit::Hertz),
        Mode::Period => Ok(Unit::Second),
        Mode::VoltageAcDc
        | Mode::CurrentAcDc
        | Mode::DirectSamplingAc
        | Mode::DirectSamplingDc
        | Mode::SubSamplingAc
        | Mode::SubSamplingDc => Err(InstrumentError::UnsupportedMode(mode)),
    }
}

// --- Trigger Sources ---

/// Trigger source, used with `TRIG` (trigger event) and `TARM` (trigger arm).
///
/// A software trigger (`trigger()`) only has a defined effect in `Single`
/// and `Synchronous`; in every other state it is passed through to the
/// instrument unchecked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TriggerMode {
    /// Occurs automatically whenever required.
    Auto,
    /// Negative edge on the external trigger input.
    External,
    /// Output buffer empty, memory off or empty, and the controller requests data.
    Synchronous,
    /// Occurs once on receipt of the single-trigger command, then becomes `Hold`.
    Single,
    /// Suspends measurements.
    Hold,
    /// Input signal reaches the configured level on the configured slope.
    Level,
    /// Power line voltage crosses zero.
    Line,
}

impl CatalogVariant for TriggerMode {
    const NAME: &'static str = "TriggerMode";
}

// --- Output / Memory Format ---

/// Reading format for GPIB output (`OFORMAT`) and reading memory (`MFORMAT`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OutputFormat {
    /// ASCII text, 15 bytes per reading.
    Ascii,
    /// 16-bit two's complement.
    Sint,
    /// 32-bit two's complement.
    Dint,
    /// IEEE-754 32-bit.
    Sreal,
    /// IEEE-754 64-bit.
    Dreal,
}

impl OutputFormat {
    pub const fn encoding(&self) -> crate::common::Encoding {
        use crate::common::Encoding;
        match self {
            OutputFormat::Ascii => Encoding::Utf8,
            OutputFormat::Sint => Encoding::Int16,
            OutputFormat::Dint => Encoding::Int32,
            OutputFormat::Sreal => Encoding::Ieee754_32,
            OutputFormat::Dreal => Encoding::Ieee754_64,
        }
    }
}

impl CatalogVariant for OutputFormat {
    const NAME: &'static str = "OutputFormat";
}

// --- Toggles ---

/// On/off state for settings such as `DISP` and `AZERO`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ToggleMode {
    Off,
    On,
}

impl From<bool> for ToggleMode {
    fn from(on: bool) -> Self {
        if on {
            ToggleMode::On
        } else {
            ToggleMode::Off
        }
    }
}

impl From<ToggleMode> for bool {
    fn from(value: ToggleMode) -> Self {
        value == ToggleMode::On
    }
}

impl CatalogVariant for ToggleMode {
    const NAME: &'static str = "ToggleMode";
}

// --- Input Range ---

/// Range presets accepted in place of an explicit range value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RangePreset {
    Minimum,
    Maximum,
    Default,
    Automatic,
}

impl CatalogVariant for RangePreset {
    const NAME: &'static str = "InputRange";
}

/// Input range for the active mode: an explicit value or a preset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputRange {
    Value(Quantity),
    /// Plain magnitude, taken in the active mode's unit. Also what the
    /// instrument reports for modes without a unit.
    Bare(f64),
    Preset(RangePreset),
}

impl From<f64> for InputRange {
    fn from(value: f64) -> Self {
        InputRange::Bare(value)
    }
}

impl From<Setpoint> for InputRange {
    fn from(value: Setpoint) -> Self {
        match value {
            Setpoint::Bare(v) => InputRange::Bare(v),
            Setpoint::Quantity(q) => InputRange::Value(q),
        }
    }
}

impl From<Quantity> for InputRange {
    fn from(q: Quantity) -> Self {
        InputRange::Value(q)
    }
}

impl From<RangePreset> for InputRange {
    fn from(p: RangePreset) -> Self {
        InputRange::Preset(p)
    }
}

impl fmt::Display for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRange::Value(q) => write!(f, "{}", q),
            InputRange::Bare(v) => write!(f, "{}", v),
            InputRange::Preset(RangePreset::Minimum) => f.write_str("minimum"),
            InputRange::Preset(RangePreset::Maximum) => f.write_str("maximum"),
            InputRange::Preset(RangePreset::Default) => f.write_str("default"),
            InputRange::Preset(RangePreset::Automatic) => f.write_str("automatic"),
        }
    }
}

// --- Generic HPML Code Tables ---

pub static MODE_CODES: CodeTable<Mode> = CodeTable::new(&[
    (Mode::VoltageDc, WireCode::Text("1")),
    (Mode::VoltageAc, WireCode::Text("2")),
    (Mode::VoltageAcDc, WireCode::Text("3")),
    (Mode::Resistance, WireCode::Text("4")),
    (Mode::FourPointResistance, WireCode::Text("5")),
    (Mode::CurrentDc, WireCode::Text("6")),
    (Mode::CurrentAc, WireCode::Text("7")),
    (Mode::CurrentAcDc, WireCode::Text("8")),
    (Mode::Frequency, WireCode::Text("9")),
    (Mode::Period, WireCode::Text("10")),
    (Mode::DirectSamplingAc, WireCode::Text("11")),
    (Mode::DirectSamplingDc, WireCode::Text("12")),
    (Mode::SubSamplingAc, WireCode::Text("13")),
    (Mode::SubSamplingDc, WireCode::Text("14")),
]);

pub static TRIGGER_CODES: CodeTable<TriggerMode> = CodeTable::new(&[
    (TriggerMode::Auto, WireCode::Text("AUTO")),
    (TriggerMode::External, WireCode::Text("EXT")),
    (TriggerMode::Synchronous, WireCode::Text("SYN")),
    (TriggerMode::Single, WireCode::Text("SGL")),
    (TriggerMode::Hold, WireCode::Text("HOLD")),
    (TriggerMode::Level, WireCode::Text("LEVEL")),
    (TriggerMode::Line, WireCode::Text("LINE")),
]);

pub static FORMAT_CODES: CodeTable<OutputFormat> = CodeTable::new(&[
    (OutputFormat::Ascii, WireCode::Int(1)),
    (OutputFormat::Sint, WireCode::Int(2)),
    (OutputFormat::Dint, WireCode::Int(3)),
    (OutputFormat::Sreal, WireCode::Int(4)),
    (OutputFormat::Dreal, WireCode::Int(5)),
]);

pub static TOGGLE_CODES: CodeTable<ToggleMode> = CodeTable::new(&[
    (ToggleMode::Off, WireCode::Int(0)),
    (ToggleMode::On, WireCode::Int(1)),
]);

pub static RANGE_PRESET_CODES: CodeTable<RangePreset> = CodeTable::new(&[
    (RangePreset::Minimum, WireCode::Text("MIN")),
    (RangePreset::Maximum, WireCode::Text("MAX")),
    (RangePreset::Default, WireCode::Text("DEF")),
    (RangePreset::Automatic, WireCode::Text("AUTO")),
]);
