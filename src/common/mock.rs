// src/common/mock.rs

//! Recording transport double shared by the driver tests.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use super::frame::Terminator;
use super::hal_traits::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Send(String),
    Query(String),
    Read(Option<usize>),
    Terminator(Terminator),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockIoError;

/// Logs every call in order and replays scripted replies.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub events: Vec<Event>,
    replies: VecDeque<String>,
    payloads: VecDeque<Vec<u8>>,
    terminator: Terminator,
    fail_next: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for the next `query`.
    pub fn reply(mut self, text: &str) -> Self {
        self.replies.push_back(text.into());
        self
    }

    /// Queues a payload for the next `read`.
    pub fn payload(mut self, bytes: &[u8]) -> Self {
        self.payloads.push_back(bytes.to_vec());
        self
    }

    /// Makes the next transport call fail with `MockIoError`.
    pub fn failing(mut self) -> Self {
        self.fail_next = true;
        self
    }

    /// Command lines written, via `sendcmd` or `query`, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Send(s) | Event::Query(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of transport writes (`sendcmd` plus `query`).
    pub fn writes(&self) -> usize {
        self.lines().len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn check_failure(&mut self) -> Result<(), MockIoError> {
        if self.fail_next {
            self.fail_next = false;
            Err(MockIoError)
        } else {
            Ok(())
        }
    }
}

impl Transport for RecordingTransport {
    type Error = MockIoError;

    fn sendcmd(&mut self, command: &str) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.events.push(Event::Send(command.into()));
        Ok(())
    }

    fn query(&mut self, command: &str) -> Result<String, Self::Error> {
        self.check_failure()?;
        self.events.push(Event::Query(command.into()));
        self.replies.pop_front().ok_or(MockIoError)
    }

    fn read(&mut self, size: Option<usize>) -> Result<Vec<u8>, Self::Error> {
        self.check_failure()?;
        self.events.push(Event::Read(size));
        self.payloads.pop_front().ok_or(MockIoError)
    }

    fn terminator(&self) -> Terminator {
        self.terminator
    }

    fn set_terminator(&mut self, terminator: Terminator) {
        self.events.push(Event::Terminator(terminator));
        self.terminator = terminator;
    }
}
