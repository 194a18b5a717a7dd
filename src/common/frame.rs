// src/common/frame.rs

/// Line terminator used to frame ASCII command lines and text replies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Terminator {
    /// Carriage return (`\r`), what the HP3458A expects once configured.
    Cr,
    /// Line feed (`\n`), the usual GPIB/serial default.
    #[default]
    Lf,
    /// Carriage return followed by line feed.
    CrLf,
}

impl Terminator {
    /// The literal bytes appended to each command line.
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Terminator::Cr => b"\r",
            Terminator::Lf => b"\n",
            Terminator::CrLf => b"\r\n",
        }
    }

    /// The literal terminator as a string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Terminator::Cr => "\r",
            Terminator::Lf => "\n",
            Terminator::CrLf => "\r\n",
        }
    }

    /// Returns `true` when `line` ends with this terminator.
    pub fn terminates(&self, line: &[u8]) -> bool {
        line.ends_with(self.as_bytes())
    }

    /// Strips this terminator from the end of `line`, if present.
    pub fn strip<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        line.strip_suffix(self.as_bytes()).unwrap_or(line)
    }
}
