//! Error numbers and the per-call return record handed back to the C runtime.

use core::ffi::c_int;

/// Error numbers, numbered the way newlib's `<sys/errno.h>` numbers them.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Errno {
    EPERM = 1,
    ENOENT = 2,
    EINTR = 4,
    EIO = 5,
    EBADF = 9,
    ECHILD = 10,
    EAGAIN = 11,
    ENOMEM = 12,
    EFAULT = 14,
    EINVAL = 22,
    EMLINK = 31,
    ENOSYS = 88,
}

impl Errno {
    #[inline]
    pub fn as_c_int(self) -> c_int {
        self as c_int
    }

    /// Map a raw error number back to a known variant.
    pub fn from_c_int(val: c_int) -> Option<Self> {
        let errno = match val {
            1 => Self::EPERM,
            2 => Self::ENOENT,
            4 => Self::EINTR,
            5 => Self::EIO,
            9 => Self::EBADF,
            10 => Self::ECHILD,
            11 => Self::EAGAIN,
            12 => Self::ENOMEM,
            14 => Self::EFAULT,
            22 => Self::EINVAL,
            31 => Self::EMLINK,
            88 => Self::ENOSYS,
            _ => return None,
        };
        Some(errno)
    }

    /// Negated form, as kernels put it in the return register.
    #[inline]
    pub fn as_neg_ret(self) -> isize {
        -(self as isize)
    }
}

/// What a libc-level call hands back: the return value and, on failure, the
/// error number the caller would find in `errno`.
///
/// A failure without an error number is valid: `close` reports `-1` and
/// leaves `errno` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysRet {
    pub value: isize,
    pub errno: Option<Errno>,
}

impl SysRet {
    /// Failure sentinel returned by every failing call.
    pub const FAILURE: isize = -1;

    pub const fn ok(value: isize) -> Self {
        Self { value, errno: None }
    }

    /// `-1` with `errno` set to `errno`.
    pub const fn fail(errno: Errno) -> Self {
        Self {
            value: Self::FAILURE,
            errno: Some(errno),
        }
    }

    /// `-1` without touching `errno`.
    pub const fn fail_silent() -> Self {
        Self {
            value: Self::FAILURE,
            errno: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.value == Self::FAILURE
    }

    pub fn into_result(self) -> Result<isize, Option<Errno>> {
        if self.is_error() {
            Err(self.errno)
        } else {
            Ok(self.value)
        }
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::*;

    #[test]
    fn test_errno_numbers() {
        assert_eq!(Errno::ENOENT.as_c_int(), 2);
        assert_eq!(Errno::ECHILD.as_c_int(), 10);
        assert_eq!(Errno::EAGAIN.as_c_int(), 11);
        assert_eq!(Errno::ENOMEM.as_c_int(), 12);
        assert_eq!(Errno::EINVAL.as_c_int(), 22);
        assert_eq!(Errno::EMLINK.as_c_int(), 31);

        assert_eq!(Errno::from_c_int(31), Some(Errno::EMLINK));
        assert_eq!(Errno::from_c_int(88), Some(Errno::ENOSYS));
        assert_eq!(Errno::from_c_int(0), None);
        assert_eq!(Errno::from_c_int(-2), None);
        assert_eq!(Errno::ENOSYS.as_neg_ret(), -88);
    }

    #[test]
    fn test_sysret() {
        assert_eq!(SysRet::ok(7).into_result(), Ok(7));
        assert_eq!(SysRet::ok(0).into_result(), Ok(0));
        assert_eq!(
            SysRet::fail(Errno::ECHILD).into_result(),
            Err(Some(Errno::ECHILD))
        );

        let silent = SysRet::fail_silent();
        assert!(silent.is_error());
        assert_eq!(silent.value, -1);
        assert_eq!(silent.errno, None);
    }
}
