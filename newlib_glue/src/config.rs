use core::ffi::c_int;

pub const STDIN: c_int = 0;
pub const STDOUT: c_int = 1;
pub const STDERR: c_int = 2;

/// There is only ever one process as far as the C runtime can tell.
pub const FIXED_PID: isize = 1;

/// Buddy allocator order (largest block is `2^(HEAP_ORDER-1)` bytes).
pub const HEAP_ORDER: usize = 32;
/// Smallest region taken from the break when the allocator runs dry.
pub const HEAP_GROW_GRANULE: usize = 0x4000; // 16 KiB
