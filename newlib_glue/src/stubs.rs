//! Calls the target cannot serve.
//!
//! None of these reach the kernel. Each answers with the fixed value from
//! [`Stub::response`] no matter what it is passed; `fstat` and `stat` also
//! report every file as a character device.

use common::{Errno, FileMode, Stat, SysRet, Tms};
use core::ffi::{c_char, c_int, c_long};
use log::trace;

use crate::config::FIXED_PID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stub {
    Close,
    Execve,
    Fork,
    Fstat,
    Getpid,
    Isatty,
    Kill,
    Link,
    Lseek,
    Open,
    Read,
    Stat,
    Times,
    Unlink,
    Wait,
}

impl Stub {
    pub const ALL: [Stub; 15] = [
        Stub::Close,
        Stub::Execve,
        Stub::Fork,
        Stub::Fstat,
        Stub::Getpid,
        Stub::Isatty,
        Stub::Kill,
        Stub::Link,
        Stub::Lseek,
        Stub::Open,
        Stub::Read,
        Stub::Stat,
        Stub::Times,
        Stub::Unlink,
        Stub::Wait,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Stub::Close => "close",
            Stub::Execve => "execve",
            Stub::Fork => "fork",
            Stub::Fstat => "fstat",
            Stub::Getpid => "getpid",
            Stub::Isatty => "isatty",
            Stub::Kill => "kill",
            Stub::Link => "link",
            Stub::Lseek => "lseek",
            Stub::Open => "open",
            Stub::Read => "read",
            Stub::Stat => "stat",
            Stub::Times => "times",
            Stub::Unlink => "unlink",
            Stub::Wait => "wait",
        }
    }

    pub const fn response(self) -> SysRet {
        match self {
            Stub::Close | Stub::Open | Stub::Times => SysRet::fail_silent(),
            Stub::Execve => SysRet::fail(Errno::ENOMEM),
            Stub::Fork => SysRet::fail(Errno::EAGAIN),
            Stub::Kill => SysRet::fail(Errno::EINVAL),
            Stub::Link => SysRet::fail(Errno::EMLINK),
            Stub::Unlink => SysRet::fail(Errno::ENOENT),
            Stub::Wait => SysRet::fail(Errno::ECHILD),
            Stub::Getpid => SysRet::ok(FIXED_PID),
            Stub::Isatty => SysRet::ok(1),
            Stub::Fstat | Stub::Lseek | Stub::Read | Stub::Stat => SysRet::ok(0),
        }
    }

    fn answer(self) -> SysRet {
        let ret = self.response();
        trace!("{}: stubbed, returning {:?}", self.name(), ret);
        ret
    }
}

pub fn close(_fd: c_int) -> SysRet {
    Stub::Close.answer()
}

pub fn execve(
    _name: *const c_char,
    _argv: *const *const c_char,
    _env: *const *const c_char,
) -> SysRet {
    Stub::Execve.answer()
}

pub fn fork() -> SysRet {
    Stub::Fork.answer()
}

pub fn fstat(_fd: c_int, st: &mut Stat) -> SysRet {
    st.set_mode(FileMode::IFCHR);
    Stub::Fstat.answer()
}

pub fn getpid() -> SysRet {
    Stub::Getpid.answer()
}

pub fn isatty(_fd: c_int) -> SysRet {
    Stub::Isatty.answer()
}

pub fn kill(_pid: c_int, _sig: c_int) -> SysRet {
    Stub::Kill.answer()
}

pub fn link(_old: *const c_char, _new: *const c_char) -> SysRet {
    Stub::Link.answer()
}

pub fn lseek(_fd: c_int, _offset: c_long, _whence: c_int) -> SysRet {
    Stub::Lseek.answer()
}

pub fn open(_path: *const c_char, _flags: c_int) -> SysRet {
    Stub::Open.answer()
}

pub fn read(_fd: c_int, _buf: *mut u8, _len: usize) -> SysRet {
    Stub::Read.answer()
}

pub fn stat(_path: *const c_char, st: &mut Stat) -> SysRet {
    st.set_mode(FileMode::IFCHR);
    Stub::Stat.answer()
}

pub fn times(_buf: *mut Tms) -> SysRet {
    Stub::Times.answer()
}

pub fn unlink(_name: *const c_char) -> SysRet {
    Stub::Unlink.answer()
}

pub fn wait(_status: *mut c_int) -> SysRet {
    Stub::Wait.answer()
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use core::ptr;

    #[test]
    fn test_response_table() {
        let expected = [
            (Stub::Close, -1, None),
            (Stub::Execve, -1, Some(Errno::ENOMEM)),
            (Stub::Fork, -1, Some(Errno::EAGAIN)),
            (Stub::Fstat, 0, None),
            (Stub::Getpid, 1, None),
            (Stub::Isatty, 1, None),
            (Stub::Kill, -1, Some(Errno::EINVAL)),
            (Stub::Link, -1, Some(Errno::EMLINK)),
            (Stub::Lseek, 0, None),
            (Stub::Open, -1, None),
            (Stub::Read, 0, None),
            (Stub::Stat, 0, None),
            (Stub::Times, -1, None),
            (Stub::Unlink, -1, Some(Errno::ENOENT)),
            (Stub::Wait, -1, Some(Errno::ECHILD)),
        ];
        assert_eq!(expected.len(), Stub::ALL.len());
        for ((stub, value, errno), listed) in expected.into_iter().zip(Stub::ALL) {
            assert_eq!(stub, listed);
            assert_eq!(stub.response(), SysRet { value, errno }, "{}", stub.name());
        }
    }

    #[test]
    fn test_answers_ignore_arguments() {
        let path = c"/dev/console".as_ptr();
        let mut status = 0;
        let mut buf = [0u8; 16];

        for fd in [-1, 0, 1, 2, 1000] {
            assert_eq!(isatty(fd), SysRet::ok(1));
            assert_eq!(close(fd), SysRet::fail_silent());
            assert_eq!(lseek(fd, 1234, 2), SysRet::ok(0));
            assert_eq!(read(fd, buf.as_mut_ptr(), buf.len()), SysRet::ok(0));
            assert_eq!(read(fd, ptr::null_mut(), usize::MAX), SysRet::ok(0));
        }
        for _ in 0..3 {
            assert_eq!(execve(path, ptr::null(), ptr::null()), SysRet::fail(Errno::ENOMEM));
            assert_eq!(fork(), SysRet::fail(Errno::EAGAIN));
            assert_eq!(getpid(), SysRet::ok(1));
            assert_eq!(kill(1, 9), SysRet::fail(Errno::EINVAL));
            assert_eq!(kill(-1, 0), SysRet::fail(Errno::EINVAL));
            assert_eq!(link(path, path), SysRet::fail(Errno::EMLINK));
            assert_eq!(open(path, 0), SysRet::fail_silent());
            assert_eq!(open(ptr::null(), 0o1101), SysRet::fail_silent());
            assert_eq!(times(ptr::null_mut()), SysRet::fail_silent());
            assert_eq!(unlink(path), SysRet::fail(Errno::ENOENT));
            assert_eq!(wait(&mut status), SysRet::fail(Errno::ECHILD));
            assert_eq!(wait(ptr::null_mut()), SysRet::fail(Errno::ECHILD));
        }
        assert_eq!(buf, [0; 16]);
        assert_eq!(status, 0);
    }

    #[test]
    fn test_stat_reports_char_device() {
        let mut st = Stat {
            st_mode: 0o100644,
            st_size: 99,
            ..Default::default()
        };
        assert_eq!(fstat(3, &mut st), SysRet::ok(0));
        assert_eq!(st.st_mode, FileMode::IFCHR.bits());
        assert_eq!(st.st_size, 99);

        let mut st = Stat::default();
        assert_eq!(stat(c"anything".as_ptr(), &mut st), SysRet::ok(0));
        assert_eq!(st.mode().file_type(), FileMode::IFCHR);
    }
}
