// src/common/code.rs

//! Data-driven mapping between semantic enumeration variants and the literal
//! tokens an instrument puts on the wire.
//!
//! Variants are shared across instrument models; the codes are not. Each
//! model supplies its own [`CodeTable`] and the generic encode/decode routines
//! here do the rest.

use alloc::format;
use alloc::string::String;
use core::fmt;

use super::error::InstrumentError;

/// A literal wire token. Some models use quoted-string style mnemonics
/// (`"SGL"`, `"7"`), others plain integers (`7`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WireCode {
    Text(&'static str),
    Int(i32),
}

impl WireCode {
    /// Returns `true` if `token` is exactly this code.
    ///
    /// Text codes compare byte-for-byte. Integer codes compare by value after
    /// parsing the token as a decimal integer, so `"06"` matches `Int(6)`.
    pub fn matches(&self, token: &str) -> bool {
        match self {
            WireCode::Text(code) => *code == token,
            WireCode::Int(code) => token.parse::<i32>().map_or(false, |v| v == *code),
        }
    }
}

impl fmt::Display for WireCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireCode::Text(code) => f.write_str(code),
            WireCode::Int(code) => write!(f, "{}", code),
        }
    }
}

/// Implemented by every enumeration that can appear in a [`CodeTable`].
pub trait CatalogVariant: Copy + PartialEq + fmt::Debug + 'static {
    /// Name used in error messages (`"Mode"`, `"TriggerMode"`, ...).
    const NAME: &'static str;

    /// Error for a variant this instrument has no code for.
    fn not_in_table<E: fmt::Debug>(self) -> InstrumentError<E> {
        InstrumentError::InvalidValue {
            value: format!("{:?}", self),
            expected: Self::NAME,
        }
    }
}

/// One model's complete variant → code mapping for a single enumeration.
#[derive(Debug)]
pub struct CodeTable<V: 'static> {
    entries: &'static [(V, WireCode)],
}

impl<V: CatalogVariant> CodeTable<V> {
    pub const fn new(entries: &'static [(V, WireCode)]) -> Self {
        Self { entries }
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &'static [(V, WireCode)] {
        self.entries
    }

    /// Looks up the wire code for `variant`.
    pub fn encode<E: fmt::Debug>(&self, variant: V) -> Result<WireCode, InstrumentError<E>> {
        self.entries
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, code)| *code)
            .ok_or_else(|| variant.not_in_table())
    }

    /// Decodes a single token (surrounding whitespace ignored) back to its variant.
    pub fn decode<E: fmt::Debug>(&self, token: &str) -> Result<V, InstrumentError<E>> {
        let token = token.trim();
        self.entries
            .iter()
            .find(|(_, code)| code.matches(token))
            .map(|(v, _)| *v)
            .ok_or_else(|| InstrumentError::UnrecognizedCode {
                raw: String::from(token),
                expected: V::NAME,
            })
    }
}

// --- Boolean Toggles ---

impl CatalogVariant for bool {
    const NAME: &'static str = "toggle state";
}

/// Exact `"1"` / `"0"` mapping used by SCPI-style on/off settings.
pub static BOOL_TABLE: CodeTable<bool> =
    CodeTable::new(&[(true, WireCode::Text("1")), (false, WireCode::Text("0"))]);
