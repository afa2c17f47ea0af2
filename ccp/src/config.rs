use jx_lib::HeapStats;

/// Prompt printed before every command line.
pub const CCP_PROMPT: &[u8] = b"JX> ";

/// Longest command line, terminator included.
pub const CMD_MAX: usize = 128;

/// Smallest usable line buffer: one character plus the terminator.
const LINE_MIN: usize = 2;

/// Source of the heap figures shown by `mem`.
pub type HeapProbe = fn() -> Option<HeapStats>;

#[derive(Clone, Copy)]
pub struct CcpConfig {
    pub prompt: &'static [u8],
    /// Capacity handed to the line editor. Clamped to `2..=CMD_MAX`.
    pub line_capacity: usize,
    pub heap_probe: HeapProbe,
}

impl CcpConfig {
    pub const fn new() -> Self {
        Self {
            prompt: CCP_PROMPT,
            line_capacity: CMD_MAX,
            heap_probe: jx_lib::heap_stats,
        }
    }

    #[inline]
    pub fn effective_capacity(&self) -> usize {
        self.line_capacity.clamp(LINE_MIN, CMD_MAX)
    }
}

impl Default for CcpConfig {
    fn default() -> Self {
        Self::new()
    }
}
