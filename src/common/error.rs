// src/common/error.rs

use alloc::string::String;

use super::types::DecodeError;
use super::units::{IncompatibleUnit, Unit};
use crate::hpml::catalog::Mode;

/// Error returned by every driver operation.
///
/// `E` is the error type of the underlying [`Transport`](super::Transport);
/// transport failures are wrapped in `Transport` and never retried.
#[derive(Debug, thiserror::Error)]
pub enum InstrumentError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying transport failure (I/O, timeout).
    #[error("transport error: {0:?}")]
    Transport(E),

    /// A reply token matched no variant of the expected enumeration.
    #[error("unrecognized {expected} code {raw:?}")]
    UnrecognizedCode { raw: String, expected: &'static str },

    /// The operation needs a unit or behavior the mode does not define.
    #[error("mode {0:?} is not supported by this operation")]
    UnsupportedMode(Mode),

    /// The mode has no wire code on this instrument. Raised before anything is sent.
    #[error("mode {0:?} is not available on this instrument")]
    InvalidMode(Mode),

    /// A non-mode setting has no wire code on this instrument.
    #[error("{value} is not a valid {expected} on this instrument")]
    InvalidValue { value: String, expected: &'static str },

    /// The instrument model does not implement this capability.
    #[error("{0} is not supported on this instrument")]
    NotSupported(&'static str),

    /// A reply could not be interpreted (not a number, missing field, ...).
    #[error("invalid response {0:?}")]
    InvalidResponse(String),

    /// A quantity of the wrong dimension was passed to a setter.
    #[error("incompatible unit: expected {expected}, got {got}")]
    IncompatibleUnit { expected: Unit, got: Unit },

    /// A binary reading came back shorter than its encoding's width.
    #[error("short read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },
}

impl<E: core::fmt::Debug> From<IncompatibleUnit> for InstrumentError<E> {
    fn from(e: IncompatibleUnit) -> Self {
        InstrumentError::IncompatibleUnit {
            expected: e.expected,
            got: e.got,
        }
    }
}

impl<E: core::fmt::Debug> InstrumentError<E> {
    /// Maps a reading decode failure, keeping the raw payload for diagnostics.
    pub(crate) fn from_decode(e: DecodeError, raw: &[u8]) -> Self {
        match e {
            DecodeError::ShortRead { expected, got } => InstrumentError::ShortRead { expected, got },
            DecodeError::InvalidUtf8 | DecodeError::InvalidNumber => {
                InstrumentError::InvalidResponse(String::from_utf8_lossy(raw).into_owned())
            }
        }
    }
}
