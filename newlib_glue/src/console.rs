use crate::config::{STDERR, STDOUT};
use crate::syscall::{KERNEL, KernelCall, raw_write};
use core::ffi::c_int;
use core::fmt::{self, Write};

/// Formatted output to one descriptor through the write syscall.
pub struct Console<'a, K: ?Sized> {
    kernel: &'a K,
    fd: c_int,
}

impl<'a, K: KernelCall + ?Sized> Console<'a, K> {
    pub fn new(kernel: &'a K, fd: c_int) -> Self {
        Self { kernel, fd }
    }
}

impl<K: KernelCall + ?Sized> Write for Console<'_, K> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s.as_bytes();
        while !rest.is_empty() {
            let n = raw_write(self.kernel, self.fd, rest.as_ptr(), rest.len());
            if n <= 0 {
                return Err(fmt::Error);
            }
            rest = &rest[(n as usize).min(rest.len())..];
        }
        Ok(())
    }
}

#[doc(hidden)]
#[inline]
pub fn _print(args: fmt::Arguments) {
    let _ = Console::new(&KERNEL, STDOUT).write_fmt(args);
}

#[doc(hidden)]
#[inline]
pub fn _eprint(args: fmt::Arguments) {
    let _ = Console::new(&KERNEL, STDERR).write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::_print(core::format_args!($($arg)*));
    }
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {{
        $crate::console::_print(core::format_args!($($arg)*));
        $crate::println!();
    }}
}

#[macro_export]
macro_rules! eprint {
    ($($arg:tt)*) => {
        $crate::console::_eprint(core::format_args!($($arg)*));
    }
}

#[macro_export]
macro_rules! eprintln {
    () => ($crate::eprint!("\n"));
    ($($arg:tt)*) => {{
        $crate::console::_eprint(core::format_args!($($arg)*));
        $crate::eprintln!();
    }}
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use crate::test_utils::RecordingKernel;
    use syscall_id::SYSCALL_WRITE;

    #[test]
    fn test_console_formats_to_fd() {
        let kernel = RecordingKernel::new();
        write!(Console::new(&kernel, STDERR), "pid {} ok", 1).unwrap();

        assert_eq!(kernel.written(), b"pid 1 ok");
        assert!(
            kernel
                .calls()
                .iter()
                .all(|c| c.id == SYSCALL_WRITE && c.args[0] == STDERR as usize)
        );
    }

    #[test]
    fn test_console_retries_short_writes() {
        let kernel = RecordingKernel::new().reply_with([2, 2, 1]);
        Console::new(&kernel, STDOUT).write_str("hello").unwrap();

        let calls = kernel.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args[2], 5);
        assert_eq!(calls[1].args[2], 3);
        assert_eq!(calls[2].args[2], 1);
        assert_eq!(calls[1].args[1], calls[0].args[1] + 2);
        assert_eq!(kernel.written(), b"hello");
    }

    #[test]
    fn test_console_stops_on_error() {
        let kernel = RecordingKernel::new().reply_with([-5]);
        assert!(Console::new(&kernel, STDOUT).write_str("lost").is_err());
        assert_eq!(kernel.calls().len(), 1);
    }
}
