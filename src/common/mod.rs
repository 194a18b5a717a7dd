// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod code;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;
pub mod units;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits for easier access ---

// From code.rs
pub use code::{CatalogVariant, CodeTable, WireCode, BOOL_TABLE};

// From error.rs
pub use error::InstrumentError;

// From frame.rs
pub use frame::Terminator;

// From hal_traits.rs
pub use hal_traits::{InstrumentInstant, InstrumentSerial, InstrumentTimer, Transport};

// From types.rs
pub use types::{ByteOrder, DecodeError, Encoding};

// From units.rs
pub use units::{IncompatibleUnit, Quantity, Reading, Setpoint, Unit};
