/// Heap alignment in bytes. Every allocation size is rounded up to this.
pub const HEAP_ALIGN: u16 = 2;

/// Align `value` down to the nearest multiple of `alignment`.
/// If `alignment` is zero, the input is returned unchanged.
#[inline(always)]
pub const fn align_down_u16(value: u16, alignment: u16) -> u16 {
    if alignment == 0 {
        return value;
    }
    value & !(alignment - 1)
}

/// Align `value` up to the nearest multiple of `alignment`.
///
/// Returns `None` when the rounded value does not fit in 16 bits, so a
/// request near the top of the address space cannot wrap to a small size.
#[inline(always)]
pub const fn align_up_u16(value: u16, alignment: u16) -> Option<u16> {
    if alignment == 0 {
        return Some(value);
    }
    match value.checked_add(alignment - 1) {
        Some(adjusted) => Some(adjusted & !(alignment - 1)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_odd_sizes_to_even() {
        assert_eq!(align_up_u16(1, HEAP_ALIGN), Some(2));
        assert_eq!(align_up_u16(2, HEAP_ALIGN), Some(2));
        assert_eq!(align_up_u16(63, HEAP_ALIGN), Some(64));
        assert_eq!(align_down_u16(63, HEAP_ALIGN), 62);
    }

    #[test]
    fn refuses_to_wrap() {
        assert_eq!(align_up_u16(u16::MAX, HEAP_ALIGN), None);
        assert_eq!(align_up_u16(u16::MAX - 1, HEAP_ALIGN), Some(u16::MAX - 1));
        assert_eq!(align_up_u16(7, 0), Some(7));
    }
}
