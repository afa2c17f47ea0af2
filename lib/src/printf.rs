//! Minimal formatted output.
//!
//! Supported directives: `%d` `%i` `%u` `%x` `%X` `%o` `%c` `%s` `%%`.
//! There are no flags, widths or precisions. Hex is always lower case,
//! `%X` included. An unknown directive is echoed as `%` plus the character
//! and consumes nothing; a lone `%` at the end of the format is dropped.
//!
//! Arguments are an explicit slice of [`Arg`] values consumed strictly left
//! to right, one per argument-taking directive. A directive whose argument
//! is missing renders as if it got zero (numbers), nothing (`%c`) or a null
//! string (`%s`).

use jx_abi::ConsoleOut;

use crate::numfmt::{self, NumText};
use crate::sink::CharSink;
use crate::string;

/// Text written for a null `%s` argument.
pub const NULL_TEXT: &[u8] = b"(null)";

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Int(i16),
    Uint(u16),
    Char(u8),
    /// `None` is a null string pointer.
    Str(Option<&'a [u8]>),
}

impl Arg<'_> {
    /// The argument as a 16-bit machine word, the way a numeric directive
    /// sees it.
    fn word(self) -> u16 {
        match self {
            Arg::Int(v) => v as u16,
            Arg::Uint(v) => v,
            Arg::Char(c) => c as u16,
            Arg::Str(_) => 0,
        }
    }

    fn text(&self) -> Option<&[u8]> {
        match self {
            Arg::Str(s) => *s,
            _ => None,
        }
    }
}

impl From<i16> for Arg<'_> {
    fn from(v: i16) -> Self {
        Arg::Int(v)
    }
}

impl From<u16> for Arg<'_> {
    fn from(v: u16) -> Self {
        Arg::Uint(v)
    }
}

/// Truncates to the 16-bit machine `int`.
impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v as i16)
    }
}

/// Truncates to the 16-bit machine `unsigned`.
impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v as u16)
    }
}

impl From<u8> for Arg<'_> {
    fn from(c: u8) -> Self {
        Arg::Char(c)
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(c as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s.map(str::as_bytes))
    }
}

impl<'a> From<Option<&'a [u8]>> for Arg<'a> {
    fn from(s: Option<&'a [u8]>) -> Self {
        Arg::Str(s)
    }
}

/// Conversion selected by the character after a `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Percent,
    Char,
    Str,
    Signed,
    Unsigned,
    Hex,
    Octal,
    Unknown(u8),
}

impl Directive {
    pub fn parse(byte: u8) -> Self {
        match byte {
            b'%' => Directive::Percent,
            b'c' => Directive::Char,
            b's' => Directive::Str,
            b'd' | b'i' => Directive::Signed,
            b'u' => Directive::Unsigned,
            b'x' | b'X' => Directive::Hex,
            b'o' => Directive::Octal,
            other => Directive::Unknown(other),
        }
    }

    #[inline]
    pub fn consumes_argument(self) -> bool {
        !matches!(self, Directive::Percent | Directive::Unknown(_))
    }
}

/// Render a numeric directive. Bases are fixed, so conversion cannot fail.
fn render_number(directive: Directive, word: u16) -> Option<NumText> {
    let text = match directive {
        Directive::Signed => numfmt::itoa(word as i16, 10),
        Directive::Unsigned => numfmt::utoa(word, 10),
        Directive::Hex => numfmt::utoa(word, 16),
        Directive::Octal => numfmt::utoa(word, 8),
        _ => return None,
    };
    text.ok()
}

/// Format `format` with `args` straight to `sink`.
///
/// Scanning stops at the end of `format` or at its first NUL. Returns the
/// number of logical characters written (a newline counts once even though
/// it goes out as CR LF).
pub fn printf<O: ConsoleOut>(
    sink: &mut CharSink<O>,
    format: impl AsRef<[u8]>,
    args: &[Arg<'_>],
) -> usize {
    let format = string::as_cstr(format.as_ref());
    let mut args = args.iter().copied();
    let mut count = 0usize;
    let mut idx = 0usize;

    while idx < format.len() {
        let byte = format[idx];
        idx += 1;
        if byte != b'%' {
            sink.emit(byte);
            count += 1;
            continue;
        }

        let Some(&conv) = format.get(idx) else {
            break;
        };
        idx += 1;

        let directive = Directive::parse(conv);
        let arg = if directive.consumes_argument() {
            args.next()
        } else {
            None
        };

        match directive {
            Directive::Percent => {
                sink.emit(b'%');
                count += 1;
            }
            Directive::Unknown(other) => {
                sink.emit(b'%');
                sink.emit(other);
                count += 2;
            }
            Directive::Char => {
                if let Some(arg) = arg {
                    sink.emit(arg.word() as u8);
                    count += 1;
                }
            }
            Directive::Str => {
                let text = arg.as_ref().and_then(Arg::text).unwrap_or(NULL_TEXT);
                count += sink.write_bytes(text);
            }
            Directive::Signed | Directive::Unsigned | Directive::Hex | Directive::Octal => {
                let word = arg.map_or(0, Arg::word);
                if let Some(text) = render_number(directive, word) {
                    count += sink.write_bytes(&text);
                }
            }
        }
    }

    count
}

/// Format to a [`CharSink`] with arguments converted through `Arg::from`.
///
/// ```ignore
/// printf!(&mut sink, "%d+%d=%d\n", 15, 27, 42);
/// ```
#[macro_export]
macro_rules! printf {
    ($sink:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf::printf($sink, $fmt, &[$($crate::printf::Arg::from($arg)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingOutput;

    fn render(format: &str, args: &[Arg<'_>]) -> (usize, RecordingOutput) {
        let mut sink = CharSink::new(RecordingOutput::new());
        let count = printf(&mut sink, format, args);
        (count, sink.into_inner())
    }

    #[test]
    fn integers_in_every_base() {
        let (count, out) = render(
            "%d %i %u %x %X %o",
            &[
                Arg::Int(42),
                Arg::Int(-123),
                Arg::Uint(65535),
                Arg::Uint(0xDEAD),
                Arg::Uint(0xBEEF),
                Arg::Uint(8),
            ],
        );
        assert_eq!(out.as_bytes(), b"42 -123 65535 dead beef 10");
        assert_eq!(count, out.as_bytes().len());
    }

    #[test]
    fn negative_hex_is_raw_bit_pattern() {
        let (_, out) = render("%x %u %d", &[Arg::Int(-1), Arg::Int(-1), Arg::Uint(0xFFFF)]);
        assert_eq!(out.as_bytes(), b"ffff 65535 -1");
    }

    #[test]
    fn chars_strings_and_null() {
        let (count, out) = render(
            "[%c][%s][%s]",
            &[Arg::Char(b'Z'), Arg::from("hi"), Arg::Str(None)],
        );
        assert_eq!(out.as_bytes(), b"[Z][hi][(null)]");
        assert_eq!(count, 15);
    }

    #[test]
    fn percent_escapes() {
        let (count, out) = render("100%% done", &[]);
        assert_eq!(out.as_bytes(), b"100% done");
        assert_eq!(count, 9);
    }

    #[test]
    fn unknown_directive_echoes_and_keeps_argument() {
        let (count, out) = render("%q%d", &[Arg::Int(5)]);
        assert_eq!(out.as_bytes(), b"%q5");
        assert_eq!(count, 3);
    }

    #[test]
    fn trailing_percent_is_dropped() {
        let (count, out) = render("abc%", &[Arg::Int(1)]);
        assert_eq!(out.as_bytes(), b"abc");
        assert_eq!(count, 3);
    }

    #[test]
    fn missing_arguments_render_defaults() {
        let (count, out) = render("<%d|%c|%s>", &[]);
        assert_eq!(out.as_bytes(), b"<0||(null)>");
        assert_eq!(count, 11);
    }

    #[test]
    fn newline_counts_once_but_sends_crlf() {
        let (count, out) = render("a\n", &[]);
        assert_eq!(out.as_bytes(), b"a\r\n");
        assert_eq!(count, 2);
    }

    #[test]
    fn embedded_nul_ends_the_format() {
        let mut sink = CharSink::new(RecordingOutput::new());
        let count = printf(&mut sink, b"ab\0%d", &[Arg::Int(1)]);
        assert_eq!(count, 2);
        assert_eq!(sink.into_inner().as_bytes(), b"ab");
    }

    #[test]
    fn macro_converts_arguments() {
        let mut sink = CharSink::new(RecordingOutput::new());
        let count = printf!(&mut sink, "%d+%d=%d", 15, 27, 42);
        assert_eq!(count, 8);
        assert_eq!(sink.into_inner().as_bytes(), b"15+27=42");
    }

    #[test]
    fn directive_argument_consumption() {
        assert!(Directive::parse(b'd').consumes_argument());
        assert!(Directive::parse(b'c').consumes_argument());
        assert!(!Directive::parse(b'%').consumes_argument());
        assert_eq!(Directive::parse(b'X'), Directive::Hex);
        assert_eq!(Directive::parse(b'z'), Directive::Unknown(b'z'));
    }
}
