// src/link/mod.rs

//! Bundled [`Transport`](crate::common::Transport) over a byte-level serial port.

use core::fmt::Debug;
use core::time::Duration;

use crate::common::{timing, Terminator};

pub mod sync_link;

pub use sync_link::SyncLink;

/// Framing and timeouts for a [`SyncLink`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Appended to every command and expected at the end of every text reply.
    pub terminator: Terminator,
    /// Wait for the first byte of a reply.
    pub response_timeout: Duration,
    /// Wait between bytes once a reply has started.
    pub inter_byte_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            terminator: Terminator::default(),
            response_timeout: timing::RESPONSE_TIMEOUT_DEFAULT,
            inter_byte_timeout: timing::INTER_BYTE_TIMEOUT_DEFAULT,
        }
    }
}

/// Errors raised by the serial link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError<E>
where
    E: Debug,
{
    #[error("serial I/O error: {0:?}")]
    Io(E),

    /// No reply byte arrived within the response timeout.
    #[error("timed out waiting for the instrument")]
    Timeout,

    #[error("reply too long: needed {needed} bytes, buffer holds {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// A reply started but its terminator never arrived.
    #[error("reply ended without a terminator")]
    IncompleteLine,

    #[error("reply is not valid UTF-8")]
    InvalidUtf8,
}
