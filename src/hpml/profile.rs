// src/hpml/profile.rs

//! Per-model configuration of the generic HPML driver.
//!
//! A [`Profile`] replaces subclassing: it carries the model's code tables,
//! its reply format, the few literal lines that differ between models, and
//! the ordered initialization sequence applied when the driver is opened.

use super::catalog::{
    InputRange, Mode, OutputFormat, RangePreset, ToggleMode, TriggerMode, FORMAT_CODES,
    MODE_CODES, RANGE_PRESET_CODES, TOGGLE_CODES, TRIGGER_CODES,
};
use super::parse::ReplySplit;
use crate::common::{ByteOrder, CodeTable, Terminator};

/// Everything about a model's command language the driver needs to know.
#[derive(Debug)]
pub struct Dialect {
    pub mode_codes: &'static CodeTable<Mode>,
    pub trigger_codes: &'static CodeTable<TriggerMode>,
    pub format_codes: &'static CodeTable<OutputFormat>,
    pub toggle_codes: &'static CodeTable<ToggleMode>,
    pub range_codes: &'static CodeTable<RangePreset>,
    /// Field delimiting of compound replies such as `FUNC?`.
    pub reply_split: ReplySplit,
    /// Line that fires one software trigger.
    pub software_trigger: &'static str,
    /// Query that runs the self test and answers `0` on success.
    pub self_test_query: &'static str,
    /// Byte order of binary readings.
    pub byte_order: ByteOrder,
    /// Whether `RANGE` can be read back and set through this driver.
    pub supports_input_range: bool,
}

/// One configuration write of an initialization sequence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InitStep {
    TriggerArm(TriggerMode),
    TriggerEvent(TriggerMode),
    MemoryFormat(OutputFormat),
    OutputFormat(OutputFormat),
    Display(ToggleMode),
    Autozero(ToggleMode),
    Range(InputRange),
    /// Switches the transport's line terminator. Affects every line after it.
    Terminator(Terminator),
}

/// A concrete instrument model.
#[derive(Debug)]
pub struct Profile {
    pub model: &'static str,
    pub dialect: Dialect,
    /// Output format the instrument is in before the init sequence runs.
    pub power_on_format: OutputFormat,
    /// Applied in order by `HpmlMultimeter::open`. Order is significant.
    pub init: &'static [InitStep],
}

/// Generic HP Multimeter Language instrument: mnemonic codes, no
/// initialization, no range support.
pub static GENERIC_HPML: Profile = Profile {
    model: "HPML multimeter",
    dialect: Dialect {
        mode_codes: &MODE_CODES,
        trigger_codes: &TRIGGER_CODES,
        format_codes: &FORMAT_CODES,
        toggle_codes: &TOGGLE_CODES,
        range_codes: &RANGE_PRESET_CODES,
        reply_split: ReplySplit::Whitespace,
        software_trigger: "TRIG SGL",
        self_test_query: "TEST;ERR?",
        byte_order: ByteOrder::Big,
        supports_input_range: false,
    },
    power_on_format: OutputFormat::Ascii,
    init: &[],
};
