//! JX runtime support library.
//!
//! Memory allocation, formatted console output, string primitives and line
//! input for programs hosted on the JX operating system. The kernel only
//! moves single characters; everything above that lives here.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod alignment;
pub mod heap;
pub mod klog;
pub mod malloc;
pub mod memory;
pub mod numfmt;
pub mod printf;
pub mod readline;
pub mod sink;
pub mod string;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use alignment::{HEAP_ALIGN, align_down_u16, align_up_u16};
pub use heap::{Heap, HeapPtr, HeapStats};
pub use klog::{
    KlogLevel, klog_attach, klog_detach, klog_get_level, klog_init, klog_is_enabled,
    klog_set_level,
};
pub use malloc::{
    calloc, free, heap_available, heap_init, heap_reset, heap_stats, heap_used, malloc, realloc,
    with_heap,
};
pub use numfmt::{NumText, atoi, itoa, parse_unsigned, utoa};
pub use printf::{Arg, Directive, printf};
pub use readline::{Feed, LineEditor, read_line};
pub use sink::CharSink;
pub use string::Tokenizer;

pub use jx_abi::{RuntimeError, RuntimeResult};
