//! Console device primitives.
//!
//! The runtime consumes exactly two primitives from the surrounding system:
//! one that writes a single byte to the console device and one that blocks
//! until a byte arrives (or the stream is closed). Everything else in the
//! text I/O stack is layered on these.

/// Carriage return.
pub const CR: u8 = 0x0D;
/// Line feed, also the logical newline.
pub const LF: u8 = 0x0A;
/// Backspace.
pub const BS: u8 = 0x08;
/// Delete, treated the same as backspace.
pub const DEL: u8 = 0x7F;
/// Escape, leading byte of ANSI control sequences.
pub const ESC: u8 = 0x1B;

/// Wire sequence that visibly erases the character left of the cursor.
pub const ERASE_SEQUENCE: [u8; 3] = [BS, b' ', BS];

/// Wire sequence for one logical newline.
pub const NEWLINE_SEQUENCE: [u8; 2] = [CR, LF];

/// Output half of the console device.
pub trait ConsoleOut {
    /// Write one raw byte to the device and return it.
    ///
    /// No translation happens at this level; newline expansion is the
    /// caller's job.
    fn output(&mut self, byte: u8) -> u8;
}

/// Input half of the console device.
pub trait ConsoleIn {
    /// Block until one byte is available. `None` means the stream is closed.
    ///
    /// There is no timeout: an idle source stalls the caller indefinitely.
    fn input(&mut self) -> Option<u8>;
}

impl<T: ConsoleOut + ?Sized> ConsoleOut for &mut T {
    #[inline]
    fn output(&mut self, byte: u8) -> u8 {
        (**self).output(byte)
    }
}

impl<T: ConsoleIn + ?Sized> ConsoleIn for &mut T {
    #[inline]
    fn input(&mut self) -> Option<u8> {
        (**self).input()
    }
}

/// Whether `byte` ends an input line.
#[inline]
pub fn is_line_end(byte: u8) -> bool {
    byte == CR || byte == LF
}

/// Whether `byte` requests a destructive erase.
#[inline]
pub fn is_erase(byte: u8) -> bool {
    byte == BS || byte == DEL
}
