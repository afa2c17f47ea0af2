//! Base-N text conversion for 16-bit integers.

use core::fmt;
use core::ops::Deref;

use jx_abi::{RuntimeError, RuntimeResult};

use crate::string;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Sixteen binary digits plus a sign.
pub const NUM_TEXT_CAP: usize = 17;

/// Smallest and largest supported bases.
pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Rendered digits of one number. Dereferences to the digit bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NumText {
    buf: [u8; NUM_TEXT_CAP],
    len: u8,
}

impl NumText {
    const fn empty() -> Self {
        Self {
            buf: [0; NUM_TEXT_CAP],
            len: 0,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // Only ASCII digits, letters and '-' are ever stored.
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len as usize] = byte;
        self.len += 1;
    }
}

impl Deref for NumText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for NumText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumText({:?})", self.as_str())
    }
}

impl fmt::Display for NumText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn check_base(base: u32) -> RuntimeResult<u16> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(RuntimeError::InvalidBase);
    }
    Ok(base as u16)
}

fn push_unsigned(out: &mut NumText, mut value: u16, base: u16) {
    let start = out.len as usize;
    loop {
        let quotient = value / base;
        out.push(DIGITS[(value - quotient * base) as usize]);
        value = quotient;
        if value == 0 {
            break;
        }
    }
    out.buf[start..out.len as usize].reverse();
}

/// Render `value` in `base` with no sign, padding or grouping.
pub fn utoa(value: u16, base: u32) -> RuntimeResult<NumText> {
    let base = check_base(base)?;
    let mut out = NumText::empty();
    push_unsigned(&mut out, value, base);
    Ok(out)
}

/// Render `value` in `base`.
///
/// Only base 10 gets a minus sign. Every other base renders the raw 16-bit
/// two's-complement pattern, so `itoa(-1, 16)` is `"ffff"`.
pub fn itoa(value: i16, base: u32) -> RuntimeResult<NumText> {
    let base = check_base(base)?;
    let mut out = NumText::empty();
    if value < 0 && base == 10 {
        out.push(b'-');
        push_unsigned(&mut out, value.unsigned_abs(), base);
    } else {
        push_unsigned(&mut out, value as u16, base);
    }
    Ok(out)
}

/// Digit value of `byte` in bases up to 36, either letter case.
#[inline]
fn digit_value(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u16),
        b'a'..=b'z' => Some((byte - b'a') as u16 + 10),
        b'A'..=b'Z' => Some((byte - b'A') as u16 + 10),
        _ => None,
    }
}

/// Parse a complete digit string in `base`.
///
/// Rejects empty input, digits outside the base, and values above `u16::MAX`.
pub fn parse_unsigned(text: &[u8], base: u32) -> RuntimeResult<u16> {
    let base = check_base(base)?;
    let text = string::as_cstr(text);
    if text.is_empty() {
        return Err(RuntimeError::InvalidArgument);
    }

    let mut value: u16 = 0;
    for &byte in text {
        let digit = digit_value(byte)
            .filter(|&d| d < base)
            .ok_or(RuntimeError::InvalidArgument)?;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(digit))
            .ok_or(RuntimeError::Overflow)?;
    }
    Ok(value)
}

/// Lenient decimal parse: leading whitespace, optional sign, then digits up
/// to the first non-digit. Accumulates with 16-bit wrap; no digits gives 0.
pub fn atoi(text: &[u8]) -> i16 {
    let text = string::as_cstr(text);
    let mut idx = 0usize;
    while idx < text.len() && string::isspace(text[idx]) {
        idx += 1;
    }

    let mut negative = false;
    if idx < text.len() && (text[idx] == b'-' || text[idx] == b'+') {
        negative = text[idx] == b'-';
        idx += 1;
    }

    let mut value: i16 = 0;
    while idx < text.len() && string::isdigit(text[idx]) {
        value = value
            .wrapping_mul(10)
            .wrapping_add((text[idx] - b'0') as i16);
        idx += 1;
    }

    if negative { value.wrapping_neg() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_single_digit_in_every_base() {
        for base in MIN_BASE..=MAX_BASE {
            assert_eq!(utoa(0, base).unwrap().as_bytes(), b"0");
        }
        assert_eq!(itoa(0, 10).unwrap().as_str(), "0");
    }

    #[test]
    fn known_renderings() {
        assert_eq!(utoa(0xDEAD, 16).unwrap().as_str(), "dead");
        assert_eq!(utoa(u16::MAX, 2).unwrap().as_str(), "1111111111111111");
        assert_eq!(utoa(8, 8).unwrap().as_str(), "10");
        assert_eq!(utoa(35, 36).unwrap().as_str(), "z");
        assert_eq!(utoa(65535, 10).unwrap().as_str(), "65535");
    }

    #[test]
    fn signed_decimal_and_bit_patterns() {
        assert_eq!(itoa(-32768, 10).unwrap().as_str(), "-32768");
        assert_eq!(itoa(-123, 10).unwrap().as_str(), "-123");
        assert_eq!(itoa(32767, 10).unwrap().as_str(), "32767");
        assert_eq!(itoa(-1, 16).unwrap().as_str(), "ffff");
        assert_eq!(itoa(-1, 8).unwrap().as_str(), "177777");
        assert_eq!(itoa(-32768, 2).unwrap().as_str(), "1000000000000000");
    }

    #[test]
    fn base_outside_range_is_rejected() {
        assert_eq!(utoa(10, 1), Err(RuntimeError::InvalidBase));
        assert_eq!(utoa(10, 37), Err(RuntimeError::InvalidBase));
        assert_eq!(itoa(-10, 0), Err(RuntimeError::InvalidBase));
        assert_eq!(parse_unsigned(b"10", 40), Err(RuntimeError::InvalidBase));
    }

    #[test]
    fn parse_unsigned_is_strict() {
        assert_eq!(parse_unsigned(b"ffff", 16), Ok(0xFFFF));
        assert_eq!(parse_unsigned(b"FF", 16), Ok(0xFF));
        assert_eq!(parse_unsigned(b"", 10), Err(RuntimeError::InvalidArgument));
        assert_eq!(parse_unsigned(b"19", 8), Err(RuntimeError::InvalidArgument));
        assert_eq!(parse_unsigned(b"65536", 10), Err(RuntimeError::Overflow));
    }

    #[test]
    fn atoi_is_lenient() {
        assert_eq!(atoi(b"  42abc"), 42);
        assert_eq!(atoi(b"-17"), -17);
        assert_eq!(atoi(b"+5"), 5);
        assert_eq!(atoi(b"abc"), 0);
        assert_eq!(atoi(b"-32768"), -32768);
        assert_eq!(atoi(b"32768"), -32768);
    }
}
