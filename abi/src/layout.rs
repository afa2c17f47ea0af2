//! Memory map of the 16-bit address space.

/// First address of the transient program area.
pub const TPA_BASE: u16 = 0x0100;

/// Bytes kept free between the heap limit and the top of memory so the call
/// stack cannot be overrun by heap growth.
pub const STACK_MARGIN: u16 = 256;

/// Address of the single BDOS entry point.
pub const BDOS_ENTRY: u16 = 0x0005;

/// Size of the BDOS image sitting directly above the TPA.
pub const BDOS_SIZE: u16 = 0x0800;

/// Gap between the TPA top and the start of the BDOS.
pub const BDOS_OFFSET: u16 = 0x0100;

/// Start of the BIOS relative to the TPA top.
pub const BIOS_OFFSET: u16 = 0x0900;

/// Heap placement handed over by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapLayout {
    /// First usable heap address.
    pub origin: u16,
    /// Address above which the call stack and the OS live.
    pub top_of_memory: u16,
}

impl HeapLayout {
    #[inline]
    pub const fn new(origin: u16, top_of_memory: u16) -> Self {
        Self {
            origin,
            top_of_memory,
        }
    }

    /// Highest address the heap may hand out (exclusive).
    ///
    /// Never below `origin`: a layout whose margin swallows the whole heap
    /// yields an empty heap rather than an inverted one.
    #[inline]
    pub const fn limit(&self) -> u16 {
        let limit = self.top_of_memory.saturating_sub(STACK_MARGIN);
        if limit < self.origin {
            self.origin
        } else {
            limit
        }
    }

    /// Number of bytes between `origin` and `limit`.
    #[inline]
    pub const fn capacity(&self) -> u16 {
        self.limit() - self.origin
    }
}

/// Address ranges of the TPA, BDOS and BIOS for a given TPA top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryMap {
    pub tpa_top: u16,
}

impl MemoryMap {
    #[inline]
    pub const fn new(tpa_top: u16) -> Self {
        Self { tpa_top }
    }

    #[inline]
    pub const fn tpa_size(&self) -> u16 {
        self.tpa_top.wrapping_sub(TPA_BASE)
    }

    #[inline]
    pub const fn bdos_start(&self) -> u16 {
        self.tpa_top.wrapping_add(BDOS_OFFSET)
    }

    #[inline]
    pub const fn bdos_end(&self) -> u16 {
        self.bdos_start().wrapping_add(BDOS_SIZE - 1)
    }

    #[inline]
    pub const fn bios_start(&self) -> u16 {
        self.tpa_top.wrapping_add(BIOS_OFFSET)
    }
}
