use core::cmp::Ordering;

use jx_abi::{RuntimeError, RuntimeResult};

/// Copy `n` bytes from the start of `src` to the start of `dest`.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) -> RuntimeResult<()> {
    if n > dest.len() || n > src.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    dest[..n].copy_from_slice(&src[..n]);
    Ok(())
}

/// Copy `n` bytes inside `buf` from offset `src` to offset `dest`.
///
/// The ranges may overlap; the result is as if the source were first copied
/// to a temporary.
pub fn memmove(buf: &mut [u8], dest: usize, src: usize, n: usize) -> RuntimeResult<()> {
    let src_end = src.checked_add(n).ok_or(RuntimeError::InvalidArgument)?;
    let dest_end = dest.checked_add(n).ok_or(RuntimeError::InvalidArgument)?;
    if src_end > buf.len() || dest_end > buf.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    if n == 0 || dest == src {
        return Ok(());
    }
    buf.copy_within(src..src_end, dest);
    Ok(())
}

/// Fill the first `n` bytes of `dest` with `value`.
pub fn memset(dest: &mut [u8], value: u8, n: usize) -> RuntimeResult<()> {
    if n > dest.len() {
        return Err(RuntimeError::InvalidArgument);
    }
    dest[..n].fill(value);
    Ok(())
}

/// Compare the first `n` bytes of `s1` and `s2`.
///
/// Returns the difference of the first mismatching bytes, or 0. Slices
/// shorter than `n` compare as if padded with zero bytes.
pub fn memcmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = s1.get(i).copied().unwrap_or(0);
        let b = s2.get(i).copied().unwrap_or(0);
        if a != b {
            return a as i32 - b as i32;
        }
    }
    0
}

/// `memcmp` folded into an `Ordering`.
#[inline]
pub fn memcmp_ordering(s1: &[u8], s2: &[u8], n: usize) -> Ordering {
    memcmp(s1, s2, n).cmp(&0)
}
