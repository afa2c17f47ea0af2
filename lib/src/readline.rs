//! Line input with destructive backspace.
//!
//! Characters arrive raw, one at a time, with no line discipline underneath.
//! The editor stores and echoes them itself, erasing on BS/DEL, and stops on
//! CR or LF or when the buffer is one byte short of full (the last byte is
//! reserved for the NUL terminator). Line endings are not echoed.

use jx_abi::{ConsoleIn, ConsoleOut, ERASE_SEQUENCE, RuntimeError, RuntimeResult, is_erase, is_line_end};

use crate::sink::CharSink;

/// Outcome of feeding one byte to a [`LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Keep reading.
    Pending,
    /// The line is complete; call [`LineEditor::finish`].
    Done,
}

/// Editing state for one line read into a caller-owned buffer.
///
/// Driving the editor byte by byte through [`LineEditor::feed`] lets a
/// caller poll a non-blocking source; [`read_line`] is the blocking driver.
pub struct LineEditor<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> LineEditor<'b> {
    /// Start an empty line in `buf`. A zero-length buffer cannot even hold
    /// the terminator and is rejected.
    pub fn new(buf: &'b mut [u8]) -> RuntimeResult<Self> {
        if buf.is_empty() {
            return Err(RuntimeError::InvalidArgument);
        }
        Ok(Self { buf, pos: 0 })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Characters currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Whether only the terminator slot is left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pos >= self.buf.len() - 1
    }

    #[inline]
    pub fn contents(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Apply one input byte, echoing through `sink`.
    pub fn feed<O: ConsoleOut>(&mut self, byte: u8, sink: &mut CharSink<O>) -> Feed {
        if is_line_end(byte) {
            return Feed::Done;
        }

        if is_erase(byte) {
            if self.pos > 0 {
                self.pos -= 1;
                for b in ERASE_SEQUENCE {
                    sink.emit(b);
                }
            }
            return Feed::Pending;
        }

        if self.is_full() {
            return Feed::Done;
        }
        self.buf[self.pos] = byte;
        self.pos += 1;
        sink.emit(byte);

        if self.is_full() { Feed::Done } else { Feed::Pending }
    }

    /// Terminate the line and hand back its contents.
    pub fn finish(self) -> &'b [u8] {
        let LineEditor { buf, pos } = self;
        buf[pos] = 0;
        &buf[..pos]
    }
}

/// Read one edited line from `input` into `buf`.
///
/// Returns the stored characters (a NUL follows them in `buf`). An empty
/// line is `Ok(&[])`; a stream that closes before any character was stored
/// is `Err(EndOfInput)`. A stream that closes mid-line returns what was
/// stored so far. Blocks for as long as `input` does.
pub fn read_line<'b, I, O>(
    input: &mut I,
    sink: &mut CharSink<O>,
    buf: &'b mut [u8],
) -> RuntimeResult<&'b [u8]>
where
    I: ConsoleIn,
    O: ConsoleOut,
{
    let mut editor = LineEditor::new(buf)?;

    while !editor.is_full() {
        let Some(byte) = input.input() else {
            if editor.is_empty() {
                return Err(RuntimeError::EndOfInput);
            }
            break;
        };
        if editor.feed(byte, sink) == Feed::Done {
            break;
        }
    }

    Ok(editor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingOutput, ScriptedInput};

    fn run(script: &[u8], capacity: usize) -> (RuntimeResult<Vec<u8>>, RecordingOutput, usize) {
        let mut input = ScriptedInput::new(script);
        let mut sink = CharSink::new(RecordingOutput::new());
        let mut buf = vec![0xFFu8; capacity];
        let line = read_line(&mut input, &mut sink, &mut buf).map(|l| l.to_vec());
        (line, sink.into_inner(), input.consumed())
    }

    #[test]
    fn backspace_edits_and_echoes_erase() {
        let (line, out, _) = run(b"Hell\x08p\n", 16);
        assert_eq!(line.unwrap(), b"Help");
        assert_eq!(out.count(&ERASE_SEQUENCE), 1);
        assert_eq!(out.as_bytes(), b"Hell\x08 \x08p");
    }

    #[test]
    fn delete_acts_like_backspace() {
        let (line, out, _) = run(b"ab\x7f\x7fc\r", 16);
        assert_eq!(line.unwrap(), b"c");
        assert_eq!(out.count(&ERASE_SEQUENCE), 2);
    }

    #[test]
    fn backspace_on_empty_line_does_nothing() {
        let (line, out, _) = run(b"\x08\x08x\n", 16);
        assert_eq!(line.unwrap(), b"x");
        assert_eq!(out.as_bytes(), b"x");
    }

    #[test]
    fn full_buffer_terminates_without_more_reads() {
        let (line, _, consumed) = run(b"abcdefghij", 4);
        assert_eq!(line.unwrap(), b"abc");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn terminator_written_after_contents() {
        let mut input = ScriptedInput::new(b"hi\n");
        let mut sink = CharSink::new(RecordingOutput::new());
        let mut buf = [0xFFu8; 8];
        let len = read_line(&mut input, &mut sink, &mut buf).unwrap().len();
        assert_eq!(len, 2);
        assert_eq!(&buf[..3], b"hi\0");
    }

    #[test]
    fn closed_stream_is_distinct_from_empty_line() {
        let (line, _, _) = run(b"", 8);
        assert_eq!(line, Err(RuntimeError::EndOfInput));

        let (line, _, _) = run(b"\n", 8);
        assert_eq!(line.unwrap(), b"");
    }

    #[test]
    fn stream_closing_mid_line_keeps_partial_line() {
        let (line, _, _) = run(b"par", 8);
        assert_eq!(line.unwrap(), b"par");
    }

    #[test]
    fn erased_line_then_close_reports_end_of_input() {
        let (line, _, _) = run(b"a\x08", 8);
        assert_eq!(line, Err(RuntimeError::EndOfInput));
    }

    #[test]
    fn line_end_is_not_echoed() {
        let (_, out, consumed) = run(b"ok\rmore", 8);
        assert_eq!(out.as_bytes(), b"ok");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn degenerate_capacities() {
        let (line, _, _) = run(b"abc", 0);
        assert_eq!(line, Err(RuntimeError::InvalidArgument));

        let (line, _, consumed) = run(b"abc", 1);
        assert_eq!(line.unwrap(), b"");
        assert_eq!(consumed, 0);
    }

    #[test]
    fn feed_reports_progress() {
        let mut buf = [0u8; 3];
        let mut sink = CharSink::new(RecordingOutput::new());
        let mut editor = LineEditor::new(&mut buf).unwrap();
        assert_eq!(editor.feed(b'a', &mut sink), Feed::Pending);
        assert_eq!(editor.contents(), b"a");
        assert_eq!(editor.feed(b'b', &mut sink), Feed::Done);
        assert!(editor.is_full());
        assert_eq!(editor.finish(), b"ab");
    }
}
