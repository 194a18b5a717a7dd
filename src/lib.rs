// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod common;
pub mod hpml;
pub mod instruments;
pub mod link;

// Re-export key types for convenience
pub use common::{InstrumentError, Quantity, Reading, Terminator, Transport, Unit};
pub use hpml::{HpmlMultimeter, Mode, OutputFormat, Profile, ToggleMode, TriggerMode};
pub use instruments::{Hp3458a, Hp6652a};
pub use link::{LinkConfig, LinkError, SyncLink};
