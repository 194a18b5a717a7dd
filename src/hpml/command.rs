//! HPML command lines.
//!
//! The `Display` implementation produces the exact line sent to the
//! instrument, without terminator. Case, spacing and delimiters are literal.

use core::fmt;

use crate::common::WireCode;

/// Command keyword of a settable/queryable HPML parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Keyword {
    /// Measurement function.
    Func,
    /// Trigger event source.
    Trig,
    /// Trigger arm source.
    Tarm,
    /// GPIB output format.
    Oformat,
    /// Reading memory format.
    Mformat,
    /// Front panel display.
    Disp,
    /// Autozero.
    Azero,
    /// Input range for the active function.
    Range,
}

impl Keyword {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Keyword::Func => "FUNC",
            Keyword::Trig => "TRIG",
            Keyword::Tarm => "TARM",
            Keyword::Oformat => "OFORMAT",
            Keyword::Mformat => "MFORMAT",
            Keyword::Disp => "DISP",
            Keyword::Azero => "AZERO",
            Keyword::Range => "RANGE",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single HPML command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `KEYWORD code`, e.g. `FUNC 1`, `TRIG SGL`.
    Set { keyword: Keyword, code: WireCode },
    /// `KEYWORD value` with a plain number, e.g. `RANGE 0.001`.
    SetValue { keyword: Keyword, value: f64 },
    /// `KEYWORD?`
    Query(Keyword),
    /// `RESET`: power-on state without cycling power.
    Reset,
    /// `CLEAR`: clear the instrument's buffers.
    Clear,
    /// `ID?`: model identification.
    Identify,
    /// Model-specific literal line (software trigger, self test, ...).
    Literal(&'static str),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { keyword, code } => write!(f, "{} {}", keyword, code),
            Command::SetValue { keyword, value } => write!(f, "{} {}", keyword, value),
            Command::Query(keyword) => write!(f, "{}?", keyword),
            Command::Reset => f.write_str("RESET"),
            Command::Clear => f.write_str("CLEAR"),
            Command::Identify => f.write_str("ID?"),
            Command::Literal(line) => f.write_str(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_command_formatting() {
        assert_eq!(
            Command::Set { keyword: Keyword::Func, code: WireCode::Int(6) }.to_string(),
            "FUNC 6"
        );
        assert_eq!(
            Command::Set { keyword: Keyword::Trig, code: WireCode::Text("SGL") }.to_string(),
            "TRIG SGL"
        );
        assert_eq!(
            Command::Set { keyword: Keyword::Oformat, code: WireCode::Int(5) }.to_string(),
            "OFORMAT 5"
        );
        assert_eq!(
            Command::SetValue { keyword: Keyword::Range, value: 0.001 }.to_string(),
            "RANGE 0.001"
        );
        assert_eq!(
            Command::SetValue { keyword: Keyword::Range, value: 10.0 }.to_string(),
            "RANGE 10"
        );
        assert_eq!(Command::Query(Keyword::Tarm).to_string(), "TARM?");
        assert_eq!(Command::Query(Keyword::Mformat).to_string(), "MFORMAT?");
        assert_eq!(Command::Reset.to_string(), "RESET");
        assert_eq!(Command::Clear.to_string(), "CLEAR");
        assert_eq!(Command::Identify.to_string(), "ID?");
        assert_eq!(Command::Literal("TRIG SGL").to_string(), "TRIG SGL");
    }

    #[test]
    fn test_fits_fixed_capacity_line() {
        let mut line = HeaplessString::<16>::new();
        write!(line, "{}", Command::Set { keyword: Keyword::Azero, code: WireCode::Int(0) }).unwrap();
        assert_eq!(line.as_str(), "AZERO 0");

        let mut tiny = HeaplessString::<4>::new();
        assert!(write!(tiny, "{}", Command::Query(Keyword::Oformat)).is_err());
    }
}
