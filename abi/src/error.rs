//! Error types shared between the runtime library and hosted programs

use core::ffi::c_int;
use core::fmt;

/// Implement common methods for runtime error enums.
///
/// Generates `as_c_int()`, `from_c_int()`, `is_success()`, `is_error()` and a
/// `Display` impl for `#[repr(i32)]` error enums that follow the runtime's
/// error convention (0 = success, negative = failure).
macro_rules! impl_runtime_error {
    ($ty:ty, fallback: $fallback:ident, variants: { $($val:literal => $variant:ident : $msg:literal),* $(,)? }) => {
        impl $ty {
            /// Convert to C-style integer for BDOS-style returns.
            #[inline]
            pub fn as_c_int(self) -> c_int {
                self as c_int
            }

            /// Convert from C-style integer.
            #[inline]
            pub fn from_c_int(val: c_int) -> Self {
                match val {
                    $($val => Self::$variant,)*
                    _ => Self::$fallback,
                }
            }

            /// Check if this is a success result.
            #[inline]
            pub fn is_success(self) -> bool {
                matches!(self, Self::Success)
            }

            /// Check if this is an error result.
            #[inline]
            pub fn is_error(self) -> bool {
                !self.is_success()
            }

            /// Short human-readable description.
            pub fn message(self) -> &'static str {
                match self {
                    $(Self::$variant => $msg,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.message())
            }
        }
    };
}

/// Runtime operation result type
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors reported by the runtime library.
///
/// None of these are fatal. Every failing operation leaves shared state
/// (the heap cursor in particular) exactly as it found it.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeError {
    /// Operation succeeded
    #[default]
    Success = 0,
    /// Request does not fit between the heap cursor and the heap limit
    OutOfMemory = -1,
    /// Element count times element size wrapped the 16-bit range
    Overflow = -2,
    /// Numeric base outside 2..=36
    InvalidBase = -3,
    /// Input stream closed before any character was read
    EndOfInput = -4,
    /// Argument unusable for the operation (null, too small, malformed)
    InvalidArgument = -5,
    /// Allocator used before `init`
    NotInitialized = -6,
    /// Zero-byte allocation request
    ZeroSize = -7,
}

impl_runtime_error!(RuntimeError, fallback: InvalidArgument, variants: {
    0 => Success: "success",
    -1 => OutOfMemory: "out of memory",
    -2 => Overflow: "size overflow",
    -3 => InvalidBase: "invalid base",
    -4 => EndOfInput: "end of input",
    -5 => InvalidArgument: "invalid argument",
    -6 => NotInitialized: "heap not initialized",
    -7 => ZeroSize: "zero-size request",
});

impl RuntimeError {
    /// Whether the failure came from the allocator rather than text I/O.
    #[inline]
    pub fn is_allocation_failure(self) -> bool {
        matches!(
            self,
            Self::OutOfMemory | Self::Overflow | Self::NotInitialized | Self::ZeroSize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_int_codes_survive_conversion() {
        for err in [
            RuntimeError::Success,
            RuntimeError::OutOfMemory,
            RuntimeError::Overflow,
            RuntimeError::InvalidBase,
            RuntimeError::EndOfInput,
            RuntimeError::InvalidArgument,
            RuntimeError::NotInitialized,
            RuntimeError::ZeroSize,
        ] {
            assert_eq!(RuntimeError::from_c_int(err.as_c_int()), err);
        }
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(RuntimeError::from_c_int(-99), RuntimeError::InvalidArgument);
        assert_eq!(RuntimeError::from_c_int(7), RuntimeError::InvalidArgument);
    }

    #[test]
    fn success_is_default() {
        assert!(RuntimeError::default().is_success());
        assert!(RuntimeError::OutOfMemory.is_error());
        assert!(RuntimeError::Overflow.is_allocation_failure());
        assert!(!RuntimeError::EndOfInput.is_allocation_failure());
    }
}
