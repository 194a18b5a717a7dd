// src/common/timing.rs

use core::time::Duration;

// These are conservative defaults for bench instruments on GPIB/serial
// adapters. The instrument itself defines no timing contract for us.

/// Maximum time to wait for the first byte of a reply after a command.
/// Covers a full integration cycle at the slowest NPLC settings.
pub const RESPONSE_TIMEOUT_DEFAULT: Duration = Duration::from_secs(3);

/// Maximum gap between consecutive bytes once a reply has started.
pub const INTER_BYTE_TIMEOUT_DEFAULT: Duration = Duration::from_millis(50);

/// Time allowed to hand a single byte to the serial interface.
pub const WRITE_BYTE_TIMEOUT: Duration = Duration::from_millis(20);

/// Time allowed for the transmit buffer to drain after a command.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

/// Delay between polls of a non-blocking operation that returned `WouldBlock`.
pub const POLL_INTERVAL_US: u32 = 100;

/// Largest text reply the serial link will buffer (ID strings, ASCII readings,
/// compound FUNC? replies all fit comfortably).
pub const MAX_LINE_LEN: usize = 128;
