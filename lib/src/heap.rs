//! Non-freeing bump allocator over a fixed 16-bit arena.
//!
//! The arena spans `[origin, limit)` where `limit` sits `STACK_MARGIN` bytes
//! below the top of memory. A single cursor walks upward through it; every
//! request is rounded to an even size and served at the cursor. Individual
//! regions are never returned. The whole arena is reclaimed only by
//! [`Heap::reset`], which models a program restart.
//!
//! Regions carry no size metadata. [`Heap::resize`] therefore copies the
//! *requested* size out of the old region, which reads past the old region's
//! end whenever the caller grows it. Callers must only grow, and must treat
//! bytes beyond the old size as garbage.

use jx_abi::{HeapLayout, RuntimeError, RuntimeResult};

use crate::alignment::{HEAP_ALIGN, align_up_u16};
use crate::{klog_debug, klog_trace};

/// Address of an allocated region. Carries no size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeapPtr(u16);

impl HeapPtr {
    #[inline]
    pub const fn from_addr(addr: u16) -> Self {
        Self(addr)
    }

    #[inline]
    pub const fn addr(self) -> u16 {
        self.0
    }
}

/// Snapshot of the allocator bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub origin: u16,
    pub cursor: u16,
    pub limit: u16,
}

impl HeapStats {
    #[inline]
    pub const fn used(&self) -> u16 {
        self.cursor - self.origin
    }

    #[inline]
    pub const fn available(&self) -> u16 {
        self.limit.saturating_sub(self.cursor)
    }
}

struct Arena<'m> {
    memory: &'m mut [u8],
    origin: u16,
    cursor: u16,
    limit: u16,
}

impl Arena<'_> {
    #[inline]
    fn offset(&self, addr: u16) -> usize {
        (addr - self.origin) as usize
    }

    /// Whether `addr..addr + len` lies inside the allocated part of the arena.
    fn contains(&self, addr: u16, len: u16) -> bool {
        let end = addr as u32 + len as u32;
        addr >= self.origin && end <= self.cursor as u32
    }

    fn bump(&mut self, size: u16) -> RuntimeResult<HeapPtr> {
        let rounded = align_up_u16(size, HEAP_ALIGN).ok_or(RuntimeError::OutOfMemory)?;
        let end = self.cursor as u32 + rounded as u32;
        if end > self.limit as u32 {
            klog_debug!(
                "heap: out of memory, want {} at {:#06x}, limit {:#06x}",
                rounded,
                self.cursor,
                self.limit
            );
            return Err(RuntimeError::OutOfMemory);
        }

        let ptr = HeapPtr(self.cursor);
        self.cursor = end as u16;
        klog_trace!("heap: {} bytes at {:#06x}", rounded, ptr.0);
        Ok(ptr)
    }
}

/// Bump allocator. Starts uninitialized; every request fails with
/// `NotInitialized` until [`Heap::init`] hands it an arena.
pub struct Heap<'m> {
    arena: Option<Arena<'m>>,
}

impl Default for Heap<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m> Heap<'m> {
    /// An uninitialized heap.
    pub const fn new() -> Self {
        Self { arena: None }
    }

    /// A heap already initialized over `memory`.
    pub fn with_layout(layout: HeapLayout, memory: &'m mut [u8]) -> RuntimeResult<Self> {
        let mut heap = Self::new();
        heap.init(layout, memory)?;
        Ok(heap)
    }

    /// Place the heap at `layout`, backed by `memory`.
    ///
    /// `memory[0]` stands for address `layout.origin`; it must cover at least
    /// `layout.capacity()` bytes. Re-initializing discards every earlier
    /// region.
    pub fn init(&mut self, layout: HeapLayout, memory: &'m mut [u8]) -> RuntimeResult<()> {
        let capacity = layout.capacity() as usize;
        if memory.len() < capacity {
            return Err(RuntimeError::InvalidArgument);
        }
        self.arena = Some(Arena {
            memory,
            origin: layout.origin,
            cursor: layout.origin,
            limit: layout.limit(),
        });
        klog_debug!(
            "heap: origin {:#06x} limit {:#06x} ({} bytes)",
            layout.origin,
            layout.limit(),
            capacity
        );
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.arena.is_some()
    }

    #[inline]
    fn arena(&self) -> RuntimeResult<&Arena<'m>> {
        self.arena.as_ref().ok_or(RuntimeError::NotInitialized)
    }

    #[inline]
    fn arena_mut(&mut self) -> RuntimeResult<&mut Arena<'m>> {
        self.arena.as_mut().ok_or(RuntimeError::NotInitialized)
    }

    /// Serve `size` bytes (rounded up to even) at the cursor.
    pub fn allocate(&mut self, size: u16) -> RuntimeResult<HeapPtr> {
        if size == 0 {
            return Err(RuntimeError::ZeroSize);
        }
        self.arena_mut()?.bump(size)
    }

    /// Allocate `count * elem_size` bytes and zero them.
    ///
    /// The product is taken in 16-bit arithmetic; if it does not divide back
    /// to `elem_size` the request fails with `Overflow` before anything is
    /// allocated.
    pub fn allocate_zeroed(&mut self, count: u16, elem_size: u16) -> RuntimeResult<HeapPtr> {
        if count == 0 || elem_size == 0 {
            return Err(RuntimeError::ZeroSize);
        }
        let total = count.wrapping_mul(elem_size);
        if total / count != elem_size {
            klog_debug!("heap: {} x {} overflows", count, elem_size);
            return Err(RuntimeError::Overflow);
        }

        let arena = self.arena_mut()?;
        let ptr = arena.bump(total)?;
        let start = arena.offset(ptr.0);
        arena.memory[start..start + total as usize].fill(0);
        Ok(ptr)
    }

    /// Move a region into a fresh allocation of `new_size` bytes.
    ///
    /// - `None` behaves as `allocate(new_size)`.
    /// - `new_size == 0` releases the region and yields `None`.
    /// - Otherwise `new_size` bytes starting at `ptr` are copied, whatever
    ///   the old region's real size was. The old region stays allocated.
    pub fn resize(&mut self, ptr: Option<HeapPtr>, new_size: u16) -> RuntimeResult<Option<HeapPtr>> {
        let Some(old) = ptr else {
            return self.allocate(new_size).map(Some);
        };
        if new_size == 0 {
            self.release(Some(old));
            return Ok(None);
        }

        let arena = self.arena_mut()?;
        if !arena.contains(old.0, 1) {
            return Err(RuntimeError::InvalidArgument);
        }
        let new = arena.bump(new_size)?;

        // `old` lies below the old cursor, so the source span ends before the
        // end of the new region and stays inside the arena.
        let src = arena.offset(old.0);
        let dst = arena.offset(new.0);
        arena
            .memory
            .copy_within(src..src + new_size as usize, dst);
        Ok(Some(new))
    }

    /// Does nothing. Regions are reclaimed only by [`Heap::reset`].
    #[inline]
    pub fn release(&mut self, _ptr: Option<HeapPtr>) {}

    /// Reclaim the whole arena. Every outstanding `HeapPtr` becomes stale.
    pub fn reset(&mut self) {
        if let Some(arena) = self.arena.as_mut() {
            arena.cursor = arena.origin;
            klog_debug!("heap: reset to {:#06x}", arena.origin);
        }
    }

    /// Bytes handed out since init or the last reset.
    pub fn bytes_used(&self) -> u16 {
        self.stats().map_or(0, |s| s.used())
    }

    /// Bytes left before the limit.
    pub fn bytes_available(&self) -> u16 {
        self.stats().map_or(0, |s| s.available())
    }

    pub fn stats(&self) -> Option<HeapStats> {
        self.arena.as_ref().map(|arena| HeapStats {
            origin: arena.origin,
            cursor: arena.cursor,
            limit: arena.limit,
        })
    }

    /// View `len` bytes starting at `ptr`. The span must lie inside memory
    /// already handed out.
    pub fn bytes(&self, ptr: HeapPtr, len: u16) -> RuntimeResult<&[u8]> {
        let arena = self.arena()?;
        if !arena.contains(ptr.0, len) {
            return Err(RuntimeError::InvalidArgument);
        }
        let start = arena.offset(ptr.0);
        Ok(&arena.memory[start..start + len as usize])
    }

    /// Mutable view of `len` bytes starting at `ptr`.
    pub fn bytes_mut(&mut self, ptr: HeapPtr, len: u16) -> RuntimeResult<&mut [u8]> {
        let arena = self.arena_mut()?;
        if !arena.contains(ptr.0, len) {
            return Err(RuntimeError::InvalidArgument);
        }
        let start = arena.offset(ptr.0);
        Ok(&mut arena.memory[start..start + len as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: u16 = 0x4000;

    fn layout(capacity: u16) -> HeapLayout {
        HeapLayout::new(ORIGIN, ORIGIN + capacity + jx_abi::STACK_MARGIN)
    }

    #[test]
    fn uninitialized_heap_refuses_everything() {
        let mut heap = Heap::new();
        assert_eq!(heap.allocate(4), Err(RuntimeError::NotInitialized));
        assert_eq!(heap.allocate_zeroed(2, 2), Err(RuntimeError::NotInitialized));
        assert_eq!(heap.bytes_used(), 0);
        assert_eq!(heap.bytes_available(), 0);
        assert!(heap.stats().is_none());
    }

    #[test]
    fn allocations_round_to_even_and_advance() {
        let mut mem = [0u8; 64];
        let mut heap = Heap::with_layout(layout(64), &mut mem).unwrap();

        let a = heap.allocate(3).unwrap();
        let b = heap.allocate(1).unwrap();
        let c = heap.allocate(8).unwrap();
        assert_eq!(a.addr(), ORIGIN);
        assert_eq!(b.addr(), ORIGIN + 4);
        assert_eq!(c.addr(), ORIGIN + 6);
        assert_eq!(heap.bytes_used(), 14);
        assert_eq!(heap.bytes_available(), 50);
    }

    #[test]
    fn zero_size_fails_without_moving_cursor() {
        let mut mem = [0u8; 16];
        let mut heap = Heap::with_layout(layout(16), &mut mem).unwrap();
        assert_eq!(heap.allocate(0), Err(RuntimeError::ZeroSize));
        assert_eq!(heap.allocate_zeroed(0, 4), Err(RuntimeError::ZeroSize));
        assert_eq!(heap.allocate_zeroed(4, 0), Err(RuntimeError::ZeroSize));
        assert_eq!(heap.bytes_used(), 0);
    }

    #[test]
    fn exact_fit_succeeds_then_exhausts() {
        let mut mem = [0u8; 16];
        let mut heap = Heap::with_layout(layout(16), &mut mem).unwrap();
        assert!(heap.allocate(15).is_ok());
        assert_eq!(heap.bytes_available(), 0);
        assert_eq!(heap.allocate(1), Err(RuntimeError::OutOfMemory));
        assert_eq!(heap.bytes_used(), 16);
    }

    #[test]
    fn oversized_request_leaves_cursor_alone() {
        let mut mem = [0u8; 16];
        let mut heap = Heap::with_layout(layout(16), &mut mem).unwrap();
        heap.allocate(4).unwrap();
        assert_eq!(heap.allocate(13), Err(RuntimeError::OutOfMemory));
        assert_eq!(heap.allocate(u16::MAX), Err(RuntimeError::OutOfMemory));
        assert_eq!(heap.bytes_used(), 4);
    }

    #[test]
    fn zeroed_allocation_clears_dirty_memory() {
        let mut mem = [0xAAu8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();
        let ptr = heap.allocate_zeroed(20, 1).unwrap();
        assert!(heap.bytes(ptr, 20).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn zeroed_allocation_detects_overflow() {
        let mut mem = [0u8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();
        assert_eq!(heap.allocate_zeroed(0x100, 0x100), Err(RuntimeError::Overflow));
        assert_eq!(heap.allocate_zeroed(0x8000, 2), Err(RuntimeError::Overflow));
        assert_eq!(heap.bytes_used(), 0);
    }

    #[test]
    fn resize_copies_requested_size_from_old_region() {
        let mut mem = [0u8; 64];
        let mut heap = Heap::with_layout(layout(64), &mut mem).unwrap();

        let old = heap.allocate(4).unwrap();
        heap.bytes_mut(old, 4).unwrap().copy_from_slice(b"abcd");
        let neighbour = heap.allocate(4).unwrap();
        heap.bytes_mut(neighbour, 4).unwrap().copy_from_slice(b"WXYZ");

        let new = heap.resize(Some(old), 8).unwrap().unwrap();
        assert!(new > neighbour);
        // The four bytes past the old region belong to the neighbour.
        assert_eq!(heap.bytes(new, 8).unwrap(), b"abcdWXYZ");
        assert_eq!(heap.bytes(old, 4).unwrap(), b"abcd");
    }

    #[test]
    fn resize_edge_cases() {
        let mut mem = [0u8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();

        let fresh = heap.resize(None, 6).unwrap();
        assert_eq!(fresh, Some(HeapPtr::from_addr(ORIGIN)));
        let used = heap.bytes_used();

        assert_eq!(heap.resize(fresh, 0), Ok(None));
        assert_eq!(heap.bytes_used(), used);

        assert_eq!(heap.resize(None, 0), Err(RuntimeError::ZeroSize));
        assert_eq!(
            heap.resize(Some(HeapPtr::from_addr(0x0100)), 4),
            Err(RuntimeError::InvalidArgument)
        );
        assert_eq!(heap.resize(fresh, 64), Err(RuntimeError::OutOfMemory));
        assert_eq!(heap.bytes_used(), used);
    }

    #[test]
    fn release_changes_nothing() {
        let mut mem = [0u8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();
        let ptr = heap.allocate(10).unwrap();
        let before = (heap.bytes_used(), heap.bytes_available());
        for _ in 0..5 {
            heap.release(Some(ptr));
            heap.release(None);
        }
        assert_eq!((heap.bytes_used(), heap.bytes_available()), before);
    }

    #[test]
    fn reset_reclaims_everything() {
        let mut mem = [0u8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();
        heap.allocate(30).unwrap();
        heap.reset();
        assert_eq!(heap.bytes_used(), 0);
        assert_eq!(heap.allocate(2).unwrap().addr(), ORIGIN);
    }

    #[test]
    fn init_rejects_short_backing_memory() {
        let mut mem = [0u8; 8];
        assert!(matches!(
            Heap::with_layout(layout(16), &mut mem),
            Err(RuntimeError::InvalidArgument)
        ));
    }

    #[test]
    fn byte_views_stay_inside_handed_out_memory() {
        let mut mem = [0u8; 32];
        let mut heap = Heap::with_layout(layout(32), &mut mem).unwrap();
        let ptr = heap.allocate(4).unwrap();
        assert!(heap.bytes(ptr, 4).is_ok());
        assert_eq!(heap.bytes(ptr, 5), Err(RuntimeError::InvalidArgument));
        assert_eq!(
            heap.bytes(HeapPtr::from_addr(ORIGIN - 1), 1),
            Err(RuntimeError::InvalidArgument)
        );
    }
}
