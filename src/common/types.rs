// src/common/types.rs

use core::fmt;
use core::str;

// --- Reading Encodings ---

/// Wire encoding of a single reading returned by an instrument.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Encoding {
    /// Terminated ASCII text (e.g. `"-1.234567E-03"`).
    Utf8,
    /// 16-bit two's complement integer.
    Int16,
    /// 32-bit two's complement integer.
    Int32,
    /// IEEE-754 single precision.
    Ieee754_32,
    /// IEEE-754 double precision.
    Ieee754_64,
}

/// Byte order of binary readings, as documented per instrument.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl Encoding {
    /// Returns the size in bytes of a single reading, or `None` for
    /// line-delimited text.
    pub fn size_in_bytes(&self) -> Option<usize> {
        match self {
            Encoding::Utf8 => None,
            Encoding::Int16 => Some(2),
            Encoding::Int32 => Some(4),
            Encoding::Ieee754_32 => Some(4),
            Encoding::Ieee754_64 => Some(8),
        }
    }

    /// Decodes one reading from `bytes`.
    ///
    /// Binary encodings consume exactly `size_in_bytes()` bytes from the front
    /// of the slice; text is parsed after trimming surrounding whitespace.
    pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Result<f64, DecodeError> {
        match self {
            Encoding::Utf8 => {
                let text = str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| DecodeError::InvalidNumber)
            }
            Encoding::Int16 => {
                let raw = take::<2>(bytes)?;
                Ok(match order {
                    ByteOrder::Big => i16::from_be_bytes(raw),
                    ByteOrder::Little => i16::from_le_bytes(raw),
                } as f64)
            }
            Encoding::Int32 => {
                let raw = take::<4>(bytes)?;
                Ok(match order {
                    ByteOrder::Big => i32::from_be_bytes(raw),
                    ByteOrder::Little => i32::from_le_bytes(raw),
                } as f64)
            }
            Encoding::Ieee754_32 => {
                let raw = take::<4>(bytes)?;
                Ok(match order {
                    ByteOrder::Big => f32::from_be_bytes(raw),
                    ByteOrder::Little => f32::from_le_bytes(raw),
                } as f64)
            }
            Encoding::Ieee754_64 => {
                let raw = take::<8>(bytes)?;
                Ok(match order {
                    ByteOrder::Big => f64::from_be_bytes(raw),
                    ByteOrder::Little => f64::from_le_bytes(raw),
                })
            }
        }
    }
}

fn take<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes
        .get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(DecodeError::ShortRead {
            expected: N,
            got: bytes.len(),
        })
}

/// Error while decoding a raw reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DecodeError {
    /// Fewer bytes than the encoding's width.
    ShortRead { expected: usize, got: usize },
    /// Text reading was not valid UTF-8.
    InvalidUtf8,
    /// Text reading did not parse as a number.
    InvalidNumber,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ShortRead { expected, got } => {
                write!(f, "short read: expected {} bytes, got {}", expected, got)
            }
            DecodeError::InvalidUtf8 => write!(f, "reading is not valid UTF-8"),
            DecodeError::InvalidNumber => write!(f, "reading is not a number"),
        }
    }
}
