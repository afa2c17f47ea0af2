//! BDOS system-call bridge description.
//!
//! The kernel exposes a single entry point taking a function code and one
//! 16-bit argument and returning one 16-bit result. This module only names
//! the function codes and wraps them in typed helpers; the call itself is
//! supplied by whoever implements [`Bdos`].

use crate::console::{ConsoleIn, ConsoleOut};

/// Byte that signals end of file on a console stream (Ctrl-Z).
pub const EOF_MARKER: u8 = 0x1A;

/// Define the BDOS function table.
///
/// For every `name = code` entry this generates a `BDOS_<NAME>` constant, a
/// `BdosFunction::<Name>` variant and a raw `bdos_<name>(bdos, arg)` wrapper,
/// plus `from_code()`/`code()`/`name()` on the enum.
macro_rules! define_bdos {
    ($( $(#[$meta:meta])* $name:ident = $code:literal ),* $(,)?) => {
        paste::paste! {
            $(
                $(#[$meta])*
                pub const [<BDOS_ $name:upper>]: u8 = $code;
            )*

            #[repr(u8)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum BdosFunction {
                $(
                    $(#[$meta])*
                    [<$name:camel>] = $code,
                )*
            }

            $(
                $(#[$meta])*
                #[inline]
                pub fn [<bdos_ $name>]<B: Bdos + ?Sized>(bdos: &mut B, arg: u16) -> u16 {
                    bdos.call(BdosFunction::[<$name:camel>], arg)
                }
            )*

            impl BdosFunction {
                /// Look up a function by its numeric code.
                pub fn from_code(code: u8) -> Option<Self> {
                    match code {
                        $($code => Some(Self::[<$name:camel>]),)*
                        _ => None,
                    }
                }

                #[inline]
                pub fn code(self) -> u8 {
                    self as u8
                }

                pub fn name(self) -> &'static str {
                    match self {
                        $(Self::[<$name:camel>] => stringify!($name),)*
                    }
                }
            }
        }
    };
}

define_bdos! {
    /// System reset (warm boot)
    reset = 0x00,
    /// Console input
    conin = 0x01,
    /// Console output
    conout = 0x02,
    /// Reader input
    reader = 0x03,
    /// Punch output
    punch = 0x04,
    /// List output
    list = 0x05,
    /// Direct console I/O
    rawio = 0x06,
    /// Get I/O byte
    getiob = 0x07,
    /// Set I/O byte
    setiob = 0x08,
    /// Print `$`-terminated string
    print = 0x09,
    /// Read console buffer
    readln = 0x0A,
    /// Console status
    const_status = 0x0B,
    /// Get version number
    getver = 0x0C,
    /// Reset disk system
    dskreset = 0x0D,
    /// Select disk
    seldsk = 0x0E,
    /// Open file
    open = 0x0F,
    /// Close file
    close = 0x10,
    /// Search for first
    sfirst = 0x11,
    /// Search for next
    snext = 0x12,
    /// Delete file
    delete = 0x13,
    /// Read sequential
    read = 0x14,
    /// Write sequential
    write = 0x15,
    /// Make file
    make = 0x16,
    /// Rename file
    rename = 0x17,
    /// Return login vector
    logivec = 0x18,
    /// Return current disk
    curdsk = 0x19,
    /// Set DMA address
    setdma = 0x1A,
    /// Get TPA top address (JX extension)
    gettpa = 0x31,
    /// Get memory size in KB (JX extension)
    getmem = 0x32,
}

/// The kernel's single system-call entry point.
pub trait Bdos {
    /// Forward `func` and `arg` to the kernel and return its 16-bit result.
    fn call(&mut self, func: BdosFunction, arg: u16) -> u16;

    /// Block for one console byte.
    fn conin(&mut self) -> u8 {
        self.call(BdosFunction::Conin, 0) as u8
    }

    fn conout(&mut self, byte: u8) {
        self.call(BdosFunction::Conout, byte as u16);
    }

    /// Whether a console byte is waiting.
    fn console_ready(&mut self) -> bool {
        self.call(BdosFunction::ConstStatus, 0) as u8 == 0xFF
    }

    /// Version word: major in the high byte, minor in the low byte.
    fn version(&mut self) -> u16 {
        self.call(BdosFunction::Getver, 0)
    }

    fn tpa_top(&mut self) -> u16 {
        self.call(BdosFunction::Gettpa, 0)
    }

    /// Installed memory in KB.
    fn memory_kb(&mut self) -> u16 {
        self.call(BdosFunction::Getmem, 0)
    }

    /// Warm boot. Real hardware does not return from this.
    fn reset(&mut self) {
        self.call(BdosFunction::Reset, 0);
    }
}

impl<T: Bdos + ?Sized> Bdos for &mut T {
    #[inline]
    fn call(&mut self, func: BdosFunction, arg: u16) -> u16 {
        (**self).call(func, arg)
    }
}

/// Console primitives routed through BDOS conin/conout.
///
/// [`EOF_MARKER`] read from the device is reported as end of stream.
pub struct BdosConsole<B: Bdos> {
    bdos: B,
}

impl<B: Bdos> BdosConsole<B> {
    #[inline]
    pub const fn new(bdos: B) -> Self {
        Self { bdos }
    }

    #[inline]
    pub fn bdos(&mut self) -> &mut B {
        &mut self.bdos
    }

    #[inline]
    pub fn into_inner(self) -> B {
        self.bdos
    }
}

impl<B: Bdos> ConsoleOut for BdosConsole<B> {
    fn output(&mut self, byte: u8) -> u8 {
        self.bdos.conout(byte);
        byte
    }
}

impl<B: Bdos> ConsoleIn for BdosConsole<B> {
    fn input(&mut self) -> Option<u8> {
        match self.bdos.conin() {
            EOF_MARKER => None,
            byte => Some(byte),
        }
    }
}
