//! Character output with newline translation.

use core::fmt;

use jx_abi::{ConsoleOut, LF, NEWLINE_SEQUENCE, RuntimeError, RuntimeResult};

use crate::string;

/// Wraps the console output primitive. A logical `\n` goes out as CR LF;
/// every other byte passes through untouched.
pub struct CharSink<O: ConsoleOut> {
    out: O,
}

impl<O: ConsoleOut> CharSink<O> {
    #[inline]
    pub const fn new(out: O) -> Self {
        Self { out }
    }

    /// Write one logical character and return it.
    pub fn emit(&mut self, byte: u8) -> u8 {
        if byte == LF {
            for wire in NEWLINE_SEQUENCE {
                self.out.output(wire);
            }
            return byte;
        }
        self.out.output(byte)
    }

    /// Write every byte of `bytes`, stopping at a NUL. Returns the number of
    /// logical characters written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let text = string::as_cstr(bytes);
        for &b in text {
            self.emit(b);
        }
        text.len()
    }

    /// Write a string followed by a newline.
    ///
    /// A null string writes nothing and reports `InvalidArgument`.
    pub fn puts(&mut self, s: Option<&[u8]>) -> RuntimeResult<usize> {
        let s = s.ok_or(RuntimeError::InvalidArgument)?;
        let count = self.write_bytes(s);
        self.emit(LF);
        Ok(count + 1)
    }

    #[inline]
    pub fn newline(&mut self) {
        self.emit(LF);
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut O {
        &mut self.out
    }

    #[inline]
    pub fn into_inner(self) -> O {
        self.out
    }
}

impl<O: ConsoleOut> fmt::Write for CharSink<O> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.emit(b);
        }
        Ok(())
    }
}
