//! In-memory console fakes for tests.
//!
//! Compiled for this crate's own tests and, through the `testing` feature,
//! for dependants that need to drive the text I/O stack without a device.

use jx_abi::{ConsoleIn, ConsoleOut};

/// Bytes kept by [`RecordingOutput`]. Later bytes are counted but dropped.
pub const RECORD_CAP: usize = 4096;

/// Records every raw byte written to the console.
pub struct RecordingOutput {
    buf: [u8; RECORD_CAP],
    len: usize,
    dropped: usize,
}

impl Default for RecordingOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingOutput {
    pub const fn new() -> Self {
        Self {
            buf: [0; RECORD_CAP],
            len: 0,
            dropped: 0,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Bytes that did not fit in the record.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: &[u8]) -> usize {
        if needle.is_empty() {
            return 0;
        }
        let hay = self.as_bytes();
        let mut found = 0;
        let mut i = 0;
        while i + needle.len() <= hay.len() {
            if &hay[i..i + needle.len()] == needle {
                found += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }
        found
    }

    pub fn contains(&self, needle: &[u8]) -> bool {
        self.count(needle) > 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }
}

impl ConsoleOut for RecordingOutput {
    fn output(&mut self, byte: u8) -> u8 {
        if self.len < RECORD_CAP {
            self.buf[self.len] = byte;
            self.len += 1;
        } else {
            self.dropped += 1;
        }
        byte
    }
}

/// Replays a fixed byte script, then reports end of stream.
pub struct ScriptedInput<'a> {
    script: &'a [u8],
    pos: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(script: &'a [u8]) -> Self {
        Self { script, pos: 0 }
    }

    /// How many bytes have been consumed.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.script[self.pos..]
    }
}

impl ConsoleIn for ScriptedInput<'_> {
    fn input(&mut self) -> Option<u8> {
        let byte = *self.script.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}
