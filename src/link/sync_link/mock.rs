// src/link/sync_link/mock.rs

//! Byte-level serial port and clock double for the link tests.

use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::common::hal_traits::{InstrumentSerial, InstrumentTimer};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

// --- Mock Interface ---
/// Time only moves when the link delays, so timeouts are deterministic.
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub current_time_us: u64,
    pub written: Vec<u8>,
    pub flushes: usize,
    pub fail_writes: bool,
    read_queue: VecDeque<u8>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes the "instrument" will send.
    pub fn stage(&mut self, data: &[u8]) {
        self.read_queue.extend(data);
    }

    /// Staged bytes not yet read.
    pub fn pending(&self) -> usize {
        self.read_queue.len()
    }
}

impl InstrumentTimer for MockInterface {
    type Instant = MockInstant;

    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

impl InstrumentSerial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.written.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}
