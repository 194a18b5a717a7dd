// src/hpml/parse.rs

//! Reply parsing helpers.
//!
//! Many HPML replies are compound: `FUNC?` answers `"6, 1.0E-4"` (function 6
//! on the 100 µA range). Only the leading token identifies the enumeration
//! variant; the rest is positional payload.

/// How a model delimits the fields of a compound reply.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReplySplit {
    /// Fields separated by commas (`"6, 1.0E-4"`).
    Comma,
    /// Fields separated by whitespace and/or commas (`"DCV 10"`, `"AUTO, 1"`).
    Whitespace,
}

impl ReplySplit {
    /// Returns field `index` of `reply`, trimmed, or `None` if absent or empty.
    pub fn field<'a>(&self, reply: &'a str, index: usize) -> Option<&'a str> {
        let reply = reply.trim();
        let field = match self {
            ReplySplit::Comma => reply.split(',').map(str::trim).nth(index),
            ReplySplit::Whitespace => reply
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .nth(index),
        };
        field.filter(|s| !s.is_empty())
    }

    /// Returns the leading token of `reply`. An empty reply yields `""`, which
    /// never matches a code and so surfaces as an unrecognized code.
    pub fn leading<'a>(&self, reply: &'a str) -> &'a str {
        self.field(reply, 0).unwrap_or("")
    }
}

/// Parses a numeric reply field (`"1.0E-4"`, `"+10.000"`).
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}
