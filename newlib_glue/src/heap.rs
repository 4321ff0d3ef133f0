//! Program break.
//!
//! A [`HeapCursor`] hands out successive pieces of the data segment that
//! starts right after the static image. It never checks a ceiling; running
//! into unmapped memory is left to the kernel's fault handler.

use buddy_system_allocator::Heap;
use core::alloc::Layout;
use log::trace;

use crate::config::HEAP_GROW_GRANULE;

/// Where the extensible data segment begins.
pub trait DataSegment {
    fn end(&self) -> usize;
}

/// A fixed base address.
impl DataSegment for usize {
    fn end(&self) -> usize {
        *self
    }
}

/// The `_end` symbol placed by the linker after `.bss`.
#[cfg(not(unix))]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkerEnd;

#[cfg(not(unix))]
impl DataSegment for LinkerEnd {
    fn end(&self) -> usize {
        unsafe extern "C" {
            safe static _end: u8;
        }
        &raw const _end as usize
    }
}

#[derive(Debug)]
pub struct HeapCursor<S> {
    segment: S,
    end: usize,
    initialized: bool,
}

impl<S: DataSegment> HeapCursor<S> {
    pub const fn new(segment: S) -> Self {
        Self {
            segment,
            end: 0,
            initialized: false,
        }
    }

    /// Move the break by `increment` bytes and return where it was.
    ///
    /// The first call seeds the break from the data segment. With a positive
    /// increment the returned address starts a fresh region of exactly
    /// `increment` bytes.
    pub fn extend(&mut self, increment: isize) -> usize {
        if !self.initialized {
            self.end = self.segment.end();
            self.initialized = true;
            trace!("heap: break seeded at {:#x}", self.end);
        }
        let prev = self.end;
        self.end = self.end.wrapping_add_signed(increment);
        prev
    }

    /// Current break, or `None` before the first `extend`.
    pub fn current(&self) -> Option<usize> {
        self.initialized.then_some(self.end)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// How much to pull from the break so that `layout` fits afterwards, or
/// `None` when no break increment could cover it.
///
/// Buddy blocks are aligned to their own size, so twice the rounded-up
/// request always contains one suitably aligned block.
pub fn grow_size(layout: &Layout) -> Option<usize> {
    let block = layout
        .size()
        .max(layout.align())
        .checked_next_power_of_two()?;
    let size = block.checked_mul(2)?.max(HEAP_GROW_GRANULE);
    isize::try_from(size).ok()?;
    Some(size)
}

/// Feed `heap` a fresh region from `cursor` big enough for `layout`.
///
/// Leaves both untouched when the request cannot be satisfied, so the
/// allocation that triggered the rescue fails instead of wrapping.
pub fn grow_heap_from<S: DataSegment, const ORDER: usize>(
    cursor: &mut HeapCursor<S>,
    heap: &mut Heap<ORDER>,
    layout: &Layout,
) {
    let Some(size) = grow_size(layout) else {
        trace!("heap: cannot grow for {layout:?}");
        return;
    };
    let start = cursor.extend(0);
    let Some(end) = start.checked_add(size) else {
        trace!("heap: growing by {size:#x} at {start:#x} would wrap");
        return;
    };
    cursor.extend(size as isize);
    trace!("heap: growing by {size:#x} at {start:#x}");
    unsafe {
        heap.add_to_heap(start, end);
    }
}

#[cfg(not(unix))]
pub use program_break::*;

#[cfg(not(unix))]
mod program_break {
    use super::*;
    use spin::Mutex;

    /// The process-wide break behind `sbrk`.
    pub static PROGRAM_BREAK: Mutex<HeapCursor<LinkerEnd>> = Mutex::new(HeapCursor::new(LinkerEnd));

    pub fn sbrk(increment: isize) -> *mut u8 {
        PROGRAM_BREAK.lock().extend(increment) as *mut u8
    }

    #[cfg(feature = "global-alloc")]
    mod global {
        use super::*;
        use crate::config::HEAP_ORDER;
        use buddy_system_allocator::LockedHeapWithRescue;

        #[global_allocator]
        static HEAP_ALLOCATOR: LockedHeapWithRescue<HEAP_ORDER> = LockedHeapWithRescue::new(rescue);

        fn rescue(heap: &mut Heap<HEAP_ORDER>, layout: &Layout) {
            let mut cursor = PROGRAM_BREAK.lock();
            grow_heap_from(&mut *cursor, heap, layout);
        }
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const BASE: usize = 0x0040_0000;

    #[test]
    fn test_returns_previous_break() {
        let mut cursor = HeapCursor::new(BASE);
        assert_eq!(cursor.current(), None);

        assert_eq!(cursor.extend(0x100), BASE);
        assert_eq!(cursor.extend(0x20), BASE + 0x100);
        assert_eq!(cursor.extend(-0x10), BASE + 0x120);
        assert_eq!(cursor.current(), Some(BASE + 0x110));
    }

    #[test]
    fn test_zero_increment_queries() {
        let mut cursor = HeapCursor::new(BASE);
        assert_eq!(cursor.extend(0), BASE);
        assert_eq!(cursor.extend(0), BASE);
        assert_eq!(cursor.current(), Some(BASE));

        cursor.extend(64);
        assert_eq!(cursor.extend(0), BASE + 64);
        assert_eq!(cursor.current(), Some(BASE + 64));
    }

    #[test]
    fn test_random_increment_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5b7c);
        for _ in 0..64 {
            let mut cursor = HeapCursor::new(BASE);
            let mut expected = BASE;
            let mut sum = 0isize;
            for _ in 0..rng.random_range(1..32) {
                let inc = rng.random_range(-4096i64..=65536) as isize;
                assert_eq!(cursor.extend(inc), expected);
                expected = expected.wrapping_add_signed(inc);
                sum += inc;
            }
            assert_eq!(cursor.current(), Some(BASE.wrapping_add_signed(sum)));
        }
    }

    struct CountingSegment {
        base: usize,
        reads: core::cell::Cell<usize>,
    }

    impl DataSegment for CountingSegment {
        fn end(&self) -> usize {
            self.reads.set(self.reads.get() + 1);
            self.base
        }
    }

    #[test]
    fn test_seeded_exactly_once() {
        let mut cursor = HeapCursor::new(CountingSegment {
            base: BASE,
            reads: Default::default(),
        });
        assert!(!cursor.is_initialized());

        cursor.extend(-0x40);
        assert!(cursor.is_initialized());
        cursor.extend(0x40);
        assert_eq!(cursor.extend(8), BASE);
        assert_eq!(cursor.segment.reads.get(), 1);
    }

    #[test]
    fn test_zero_base_is_not_uninitialized() {
        let mut cursor = HeapCursor::new(0usize);
        assert_eq!(cursor.extend(16), 0);
        assert_eq!(cursor.extend(-16), 16);
        assert_eq!(cursor.current(), Some(0));
        assert!(cursor.is_initialized());
    }

    #[test]
    fn test_no_ceiling() {
        let mut cursor = HeapCursor::new(usize::MAX - 7);
        assert_eq!(cursor.extend(16), usize::MAX - 7);
        assert_eq!(cursor.current(), Some(8));
    }

    #[test]
    fn test_independent_cursors() {
        let mut a = HeapCursor::new(BASE);
        let mut b = HeapCursor::new(2 * BASE);
        a.extend(100);
        assert_eq!(b.extend(1), 2 * BASE);
        assert_eq!(a.extend(0), BASE + 100);
    }

    #[test]
    fn test_grow_size() {
        let small = Layout::from_size_align(24, 8).unwrap();
        assert_eq!(grow_size(&small), Some(HEAP_GROW_GRANULE));

        let big = Layout::from_size_align(HEAP_GROW_GRANULE + 1, 8).unwrap();
        assert_eq!(grow_size(&big), Some(HEAP_GROW_GRANULE * 4));

        let aligned = Layout::from_size_align(16, 4 * HEAP_GROW_GRANULE).unwrap();
        assert_eq!(grow_size(&aligned), Some(8 * HEAP_GROW_GRANULE));
    }

    #[test]
    fn test_grow_size_oversized_layout() {
        let huge = Layout::from_size_align(isize::MAX as usize / 2 + 2, 1).unwrap();
        assert_eq!(grow_size(&huge), None);

        let largest = Layout::from_size_align(isize::MAX as usize, 1).unwrap();
        assert_eq!(grow_size(&largest), None);
    }

    #[test]
    fn test_grow_heap_from_refuses_oversized_layout() {
        let mut cursor = HeapCursor::new(BASE);
        let mut heap = Heap::<32>::new();
        let huge = Layout::from_size_align(isize::MAX as usize / 2 + 2, 1).unwrap();

        grow_heap_from(&mut cursor, &mut heap, &huge);
        assert_eq!(cursor.current(), None);
        assert_eq!(heap.stats_total_bytes(), 0);
        assert!(heap.alloc(huge).is_err());
    }

    #[test]
    fn test_grow_heap_from_refuses_wrapping_region() {
        let top = usize::MAX - 0x100;
        let mut cursor = HeapCursor::new(top);
        let mut heap = Heap::<32>::new();
        let layout = Layout::from_size_align(64, 8).unwrap();

        grow_heap_from(&mut cursor, &mut heap, &layout);
        assert_eq!(cursor.current(), Some(top));
        assert_eq!(heap.stats_total_bytes(), 0);
    }

    #[test]
    fn test_grow_heap_from_cursor() {
        let mut arena = vec![0u64; 4 * HEAP_GROW_GRANULE / 8];
        let base = arena.as_mut_ptr() as usize;
        let arena_end = base + arena.len() * 8;

        let mut cursor = HeapCursor::new(base);
        let mut heap = Heap::<32>::new();
        let layout = Layout::from_size_align(256, 16).unwrap();
        assert!(heap.alloc(layout).is_err());

        grow_heap_from(&mut cursor, &mut heap, &layout);
        assert_eq!(cursor.current(), Some(base + HEAP_GROW_GRANULE));

        let ptr = heap.alloc(layout).unwrap();
        let addr = ptr.as_ptr() as usize;
        assert!(addr >= base && addr + 256 <= base + HEAP_GROW_GRANULE);
        assert!(base + HEAP_GROW_GRANULE <= arena_end);
        assert_eq!(addr % 16, 0);
        heap.dealloc(ptr, layout);
    }
}
