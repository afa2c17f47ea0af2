//! Process-wide heap.
//!
//! Hosted programs that do not thread a [`Heap`] through their code use this
//! single instance. The startup code calls [`heap_init`] once with the
//! loader's layout before any hosted code runs.

use jx_abi::{HeapLayout, RuntimeResult};
use spin::Mutex;

use crate::heap::{Heap, HeapPtr, HeapStats};

static HEAP: Mutex<Heap<'static>> = Mutex::new(Heap::new());

/// Place the process heap at `layout`, backed by `memory`.
pub fn heap_init(layout: HeapLayout, memory: &'static mut [u8]) -> RuntimeResult<()> {
    HEAP.lock().init(layout, memory)
}

/// Reclaim the whole process heap.
pub fn heap_reset() {
    HEAP.lock().reset();
}

pub fn malloc(size: u16) -> RuntimeResult<HeapPtr> {
    HEAP.lock().allocate(size)
}

pub fn calloc(count: u16, elem_size: u16) -> RuntimeResult<HeapPtr> {
    HEAP.lock().allocate_zeroed(count, elem_size)
}

pub fn realloc(ptr: Option<HeapPtr>, size: u16) -> RuntimeResult<Option<HeapPtr>> {
    HEAP.lock().resize(ptr, size)
}

pub fn free(ptr: Option<HeapPtr>) {
    HEAP.lock().release(ptr);
}

pub fn heap_used() -> u16 {
    HEAP.lock().bytes_used()
}

pub fn heap_available() -> u16 {
    HEAP.lock().bytes_available()
}

pub fn heap_stats() -> Option<HeapStats> {
    HEAP.lock().stats()
}

/// Run `f` with exclusive access to the process heap, e.g. to read or write
/// region bytes.
pub fn with_heap<R>(f: impl FnOnce(&mut Heap<'static>) -> R) -> R {
    f(&mut HEAP.lock())
}
