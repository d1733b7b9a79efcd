//! Scripted serial port and virtual clock for unit tests.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, ErrorType};

use crate::traits::{Clock, Transport};

/// Replays one scripted reply per command line written to it.
///
/// A line counts as written once the bytes written since the previous one end
/// in `\r\n`. Every written line is recorded.
#[derive(Default)]
pub struct MockTransport {
    script: VecDeque<Vec<u8>>,
    inbound: VecDeque<u8>,
    pending: Vec<u8>,
    written: Vec<String>,
}

impl MockTransport {
    pub fn new(replies: &[&str]) -> Self {
        let mut t = Self::default();
        for reply in replies {
            t.push_bytes(reply.as_bytes());
        }
        t
    }

    pub fn push_reply(&mut self, reply: &str) {
        self.push_bytes(reply.as_bytes());
    }

    pub fn push_bytes(&mut self, reply: &[u8]) {
        self.script.push_back(reply.to_vec());
    }

    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Number of scripted replies that were never requested.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ErrorType for MockTransport {
    type Error = ErrorKind;
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.pending.extend_from_slice(bytes);
        if self.pending.ends_with(b"\r\n") {
            let line = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.written.push(line);
            if let Some(reply) = self.script.pop_front() {
                self.inbound.extend(reply);
            }
        }
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.inbound.len());
        for (dst, src) in buf.iter_mut().zip(self.inbound.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inbound.clear();
        Ok(())
    }
}

/// Virtual time that only advances when slept on.
#[derive(Default)]
pub struct MockClock {
    now_us: u64,
    delays: Vec<Duration>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    fn advance(&mut self, us: u64) {
        self.now_us += us;
        self.delays.push(Duration::from_micros(us));
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns).div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.advance(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms) * 1_000);
    }
}

impl Clock for MockClock {
    fn now(&mut self) -> Instant {
        Instant::from_micros(self.now_us)
    }
}
