//! Crossing into the kernel.
//!
//! Every kernel entry goes through a [`KernelCall`]. [`Int80`] is the only
//! implementation that executes the privileged instruction; callers never
//! touch registers themselves.

use core::ffi::c_int;
use syscall_id::*;

#[cfg(unix)]
mod hosted;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod int80;

#[cfg(unix)]
pub use hosted::HostKernel;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use int80::Int80;

/// One kernel request: operation code plus three word-sized arguments.
/// Unused arguments are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syscall {
    pub id: usize,
    pub args: [usize; 3],
}

impl Syscall {
    pub const fn new(id: usize, args: [usize; 3]) -> Self {
        Self { id, args }
    }
}

pub trait KernelCall {
    /// Raise the kernel entry with `request` and return the return register.
    fn call(&self, request: Syscall) -> isize;

    /// Raise the kernel entry for a request the kernel never returns from.
    fn call_noreturn(&self, request: Syscall) -> !;
}

/// Build a [`Syscall`] from up to three arguments and hand it to `$kernel`.
#[macro_export]
macro_rules! syscall {
    ($kernel:expr, $id:expr $(, $arg:expr)* $(,)?) => {{
        let mut args = [0usize; 3];
        let _arg_slice = [$($arg as usize),*];
        for i in 0..3.min(_arg_slice.len()) {
            args[i] = _arg_slice[i];
        }
        $crate::syscall::KernelCall::call($kernel, $crate::syscall::Syscall::new($id, args))
    }};
}

/// Kernel used by the crate-level wrappers for this build.
#[cfg(not(unix))]
pub type DefaultKernel = Int80;
#[cfg(unix)]
pub type DefaultKernel = HostKernel;

#[cfg(not(unix))]
pub const KERNEL: DefaultKernel = Int80;
#[cfg(unix)]
pub const KERNEL: DefaultKernel = HostKernel;

/// End the calling process. Nothing is flushed and no destructor runs.
pub fn terminate<K: KernelCall + ?Sized>(kernel: &K, exit_code: c_int) -> ! {
    kernel.call_noreturn(Syscall::new(SYSCALL_EXIT, [exit_code as usize, 0, 0]))
}

/// Write `len` bytes at `buf` to `fd`. Nothing is checked on this side; the
/// kernel's return value comes back untouched.
pub fn raw_write<K: KernelCall + ?Sized>(kernel: &K, fd: c_int, buf: *const u8, len: usize) -> isize {
    syscall!(kernel, SYSCALL_WRITE, fd, buf, len)
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use crate::test_utils::RecordingKernel;

    #[test]
    fn test_raw_write_single_call() {
        let kernel = RecordingKernel::new();
        let msg = b"hello";
        let ret = raw_write(&kernel, 1, msg.as_ptr(), msg.len());

        assert_eq!(ret, 5);
        assert_eq!(
            kernel.calls(),
            [Syscall::new(
                SYSCALL_WRITE,
                [1, msg.as_ptr() as usize, msg.len()]
            )]
        );
        assert_eq!(kernel.written(), b"hello");
    }

    #[test]
    fn test_raw_write_passes_kernel_value_through() {
        let kernel = RecordingKernel::new().reply_with([-9, 3, 0x7fff]);
        let msg = b"abcdef";

        assert_eq!(raw_write(&kernel, 7, msg.as_ptr(), msg.len()), -9);
        assert_eq!(raw_write(&kernel, 1, msg.as_ptr(), msg.len()), 3);
        // Even a value larger than the request is handed back as-is.
        assert_eq!(raw_write(&kernel, 1, msg.as_ptr(), msg.len()), 0x7fff);
        assert_eq!(kernel.calls().len(), 3);
        assert_eq!(kernel.calls()[0].args[0], 7);
    }

    #[test]
    fn test_raw_write_does_not_validate() {
        let kernel = RecordingKernel::new().reply_with([-14]);
        let ret = raw_write(&kernel, -1, core::ptr::null(), 0);

        assert_eq!(ret, -14);
        assert_eq!(
            kernel.calls(),
            [Syscall::new(SYSCALL_WRITE, [-1isize as usize, 0, 0])]
        );
    }

    #[test]
    fn test_syscall_macro_zero_fills() {
        let kernel = RecordingKernel::new().reply_with([0, 0]);
        let _ = syscall!(&kernel, 42);
        let _ = syscall!(&kernel, 43, 9usize);

        assert_eq!(
            kernel.calls(),
            [Syscall::new(42, [0, 0, 0]), Syscall::new(43, [9, 0, 0])]
        );
    }
}
