//! NUL-terminated string primitives over byte buffers.
//!
//! A "string" here is the bytes of a slice up to its first NUL, or the whole
//! slice when it holds no NUL. Destinations are always written with a
//! terminator; a destination too small for the result is rejected with
//! `InvalidArgument` and left untouched.

use jx_abi::{RuntimeError, RuntimeResult};

pub fn isspace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x0b')
}

pub fn isdigit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

pub fn tolower(byte: u8) -> u8 {
    byte.to_ascii_lowercase()
}

pub fn toupper(byte: u8) -> u8 {
    byte.to_ascii_uppercase()
}

/// Length of the string held in `s`.
#[inline]
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// The string held in `s`, without its terminator.
#[inline]
pub fn as_cstr(s: &[u8]) -> &[u8] {
    &s[..strlen(s)]
}

#[inline]
fn byte_at(s: &[u8], idx: usize) -> u8 {
    s.get(idx).copied().unwrap_or(0)
}

pub fn strcmp(lhs: &[u8], rhs: &[u8]) -> i32 {
    let mut i = 0usize;
    while byte_at(lhs, i) != 0 && byte_at(lhs, i) == byte_at(rhs, i) {
        i += 1;
    }
    byte_at(lhs, i) as i32 - byte_at(rhs, i) as i32
}

pub fn strncmp(lhs: &[u8], rhs: &[u8], n: usize) -> i32 {
    let mut i = 0usize;
    while i < n && byte_at(lhs, i) != 0 && byte_at(lhs, i) == byte_at(rhs, i) {
        i += 1;
    }
    if i == n {
        return 0;
    }
    byte_at(lhs, i) as i32 - byte_at(rhs, i) as i32
}

/// Copy the string in `src` (with terminator) into `dest`.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> RuntimeResult<()> {
    let len = strlen(src);
    if len >= dest.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    dest[..len].copy_from_slice(&src[..len]);
    dest[len] = 0;
    Ok(())
}

/// Copy at most `n` bytes of `src` into `dest`, padding with NULs up to `n`.
///
/// Like its C namesake this does not terminate when `src` is `n` bytes or
/// longer.
pub fn strncpy(dest: &mut [u8], src: &[u8], n: usize) -> RuntimeResult<()> {
    if n > dest.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    let copied = strlen(src).min(n);
    dest[..copied].copy_from_slice(&src[..copied]);
    dest[copied..n].fill(0);
    Ok(())
}

/// Append the string in `src` to the string in `dest`.
pub fn strcat(dest: &mut [u8], src: &[u8]) -> RuntimeResult<()> {
    strncat(dest, src, usize::MAX)
}

/// Append at most `n` bytes of `src` to `dest`. Always terminates.
pub fn strncat(dest: &mut [u8], src: &[u8], n: usize) -> RuntimeResult<()> {
    let start = strlen(dest);
    let add = strlen(src).min(n);
    let end = start + add;
    if end >= dest.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    dest[start..end].copy_from_slice(&src[..add]);
    dest[end] = 0;
    Ok(())
}

/// Index of the first `c` in the string. Searching for NUL finds the
/// terminator position.
pub fn strchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return Some(len);
    }
    s[..len].iter().position(|&b| b == c)
}

/// Index of the last `c` in the string.
pub fn strrchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return Some(len);
    }
    s[..len].iter().rposition(|&b| b == c)
}

/// Splits a string into tokens separated by delimiter bytes.
///
/// Holds the scan position explicitly instead of in hidden static state, and
/// never writes into the input.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: Option<&'a [u8]>,
    delims: &'a [u8],
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8], delims: &'a [u8]) -> Self {
        Self {
            rest: Some(as_cstr(input)),
            delims,
        }
    }

    /// Next token using `delims` for this call only.
    pub fn next_with(&mut self, delims: &[u8]) -> Option<&'a [u8]> {
        let rest = self.rest?;
        let is_delim = |b: &u8| delims.contains(b);

        let start = match rest.iter().position(|b| !is_delim(b)) {
            Some(start) => start,
            None => {
                self.rest = None;
                return None;
            }
        };
        let body = &rest[start..];

        match body.iter().position(is_delim) {
            Some(end) => {
                self.rest = Some(&body[end + 1..]);
                Some(&body[..end])
            }
            None => {
                self.rest = None;
                Some(body)
            }
        }
    }

    /// Everything not yet consumed, as one token. `None` once exhausted or
    /// when nothing is left.
    pub fn rest(&mut self) -> Option<&'a [u8]> {
        self.next_with(&[])
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let delims = self.delims;
        self.next_with(delims)
    }
}
