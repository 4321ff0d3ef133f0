//! Symbols newlib links against.
//!
//! Thin adapters: every export forwards to the trampoline, the program break
//! or the stub table, then moves the error number into newlib's `errno`.

use common::{Errno, Stat, SysRet};
use core::ffi::{c_int, c_ulong};

#[cfg(not(unix))]
mod exports;

/// Copy `ret`'s error number, if any, into `slot` and return the C value.
/// A failure without an error number leaves `slot` as it was.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn finish_into(ret: SysRet, slot: &mut c_int) -> c_int {
    if let Some(errno) = ret.errno {
        *slot = errno.as_c_int();
    }
    ret.value as c_int
}

/// As [`finish_into`] for calls returning `clock_t`, where failure is
/// `(clock_t)-1`.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn clock_into(ret: SysRet, slot: &mut c_int) -> c_ulong {
    finish_into(ret, slot) as c_ulong
}

/// Run `fill` on a caller's `struct stat`, or fail with `EFAULT` when the
/// caller passed none.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn fill_stat(st: Option<&mut Stat>, fill: impl FnOnce(&mut Stat) -> SysRet) -> SysRet {
    match st {
        Some(st) => fill(st),
        None => SysRet::fail(Errno::EFAULT),
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use crate::stubs;
    use common::FileMode;
    use core::ptr;

    #[test]
    fn test_silent_failures_keep_errno() {
        let mut errno = Errno::EIO.as_c_int();
        assert_eq!(finish_into(stubs::close(3), &mut errno), -1);
        assert_eq!(finish_into(stubs::open(c"/x".as_ptr(), 0), &mut errno), -1);
        assert_eq!(clock_into(stubs::times(ptr::null_mut()), &mut errno), c_ulong::MAX);
        assert_eq!(errno, 5);
    }

    #[test]
    fn test_failures_set_errno_every_call() {
        let path = c"/tmp/x".as_ptr();
        let mut errno = 0;
        for _ in 0..2 {
            assert_eq!(finish_into(stubs::fork(), &mut errno), -1);
            assert_eq!(errno, 11);
            assert_eq!(finish_into(stubs::wait(ptr::null_mut()), &mut errno), -1);
            assert_eq!(errno, 10);
            assert_eq!(
                finish_into(stubs::execve(path, ptr::null(), ptr::null()), &mut errno),
                -1
            );
            assert_eq!(errno, 12);
            assert_eq!(finish_into(stubs::kill(1, 15), &mut errno), -1);
            assert_eq!(errno, 22);
            assert_eq!(finish_into(stubs::link(path, path), &mut errno), -1);
            assert_eq!(errno, 31);
            assert_eq!(finish_into(stubs::unlink(path), &mut errno), -1);
            assert_eq!(errno, 2);
        }
    }

    #[test]
    fn test_successes_keep_errno() {
        let mut errno = Errno::EAGAIN.as_c_int();
        let mut st = Stat::default();
        assert_eq!(finish_into(stubs::getpid(), &mut errno), 1);
        assert_eq!(finish_into(stubs::isatty(0), &mut errno), 1);
        assert_eq!(finish_into(stubs::lseek(0, 10, 0), &mut errno), 0);
        assert_eq!(finish_into(stubs::fstat(1, &mut st), &mut errno), 0);
        assert_eq!(errno, 11);
    }

    #[test]
    fn test_fill_stat_null_buffer() {
        let mut errno = 0;
        let ret = fill_stat(None, |st| stubs::fstat(1, st));
        assert_eq!(finish_into(ret, &mut errno), -1);
        assert_eq!(errno, 14);

        let mut st = Stat::default();
        let ret = fill_stat(Some(&mut st), |st| stubs::stat(c"/dev/tty".as_ptr(), st));
        assert_eq!(finish_into(ret, &mut errno), 0);
        assert!(st.mode().contains(FileMode::IFCHR));
        assert_eq!(errno, 14);
    }
}
