//! C library glue for the hobby kernel.
//!
//! newlib expects a handful of POSIX entry points from the platform. Two of
//! them, `_exit` and `write`, trap into the kernel; `sbrk` moves the program
//! break; everything else is a fixed answer from the stub table.

#![cfg_attr(not(unix), no_std)]

use core::ffi::c_int;

#[macro_use]
pub mod console;
pub mod config;
pub mod heap;
pub mod logger;
pub mod stubs;
pub mod syscall;

mod ffi;
#[cfg(not(unix))]
mod panic;
#[cfg(all(unix, test))]
mod test_utils;

pub use common::{Errno, FileMode, Stat, SysRet, Tms};
pub use heap::{DataSegment, HeapCursor};
pub use syscall::{KernelCall, Syscall};

pub fn write(fd: c_int, buffer: &[u8]) -> isize {
    syscall::raw_write(&syscall::KERNEL, fd, buffer.as_ptr(), buffer.len())
}

pub fn exit(exit_code: c_int) -> ! {
    syscall::terminate(&syscall::KERNEL, exit_code)
}

#[cfg(not(unix))]
pub use heap::sbrk;
