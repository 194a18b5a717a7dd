// src/hpml/mod.rs

//! HP Multimeter Language: the pre-SCPI ASCII command dialect of HP/Agilent
//! bench multimeters.

pub mod catalog;
pub mod command;
pub mod multimeter;
pub mod parse;
pub mod profile;

pub use catalog::{
    unit_for, InputRange, Mode, OutputFormat, RangePreset, ToggleMode, TriggerMode,
};
pub use command::{Command, Keyword};
pub use multimeter::{CodedField, HpmlMultimeter};
pub use parse::ReplySplit;
pub use profile::{Dialect, InitStep, Profile, GENERIC_HPML};
