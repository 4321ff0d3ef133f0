//! Kernel stand-in for running the glue inside an ordinary host process.

use super::{KernelCall, Syscall};
use common::Errno;
use log::warn;
use std::{
    fs::File,
    io::Write,
    mem::ManuallyDrop,
    os::fd::{FromRawFd, RawFd},
    slice,
};
use syscall_id::*;

/// Serves `SYSCALL_EXIT` and `SYSCALL_WRITE` from the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostKernel;

impl HostKernel {
    fn sys_write(fd: RawFd, buf: *const u8, len: usize) -> isize {
        if fd < 0 {
            return Errno::EBADF.as_neg_ret();
        }
        if len == 0 {
            return 0;
        }
        if buf.is_null() {
            return Errno::EFAULT.as_neg_ret();
        }
        // The descriptor belongs to the caller; never close it here.
        let mut file = ManuallyDrop::new(unsafe { File::from_raw_fd(fd) });
        let bytes = unsafe { slice::from_raw_parts(buf, len) };
        match file.write(bytes) {
            Ok(n) => n as isize,
            Err(err) => -(err.raw_os_error().unwrap_or(Errno::EIO.as_c_int()) as isize),
        }
    }
}

impl KernelCall for HostKernel {
    fn call(&self, request: Syscall) -> isize {
        let [a0, a1, a2] = request.args;
        match request.id {
            SYSCALL_EXIT => self.call_noreturn(request),
            SYSCALL_WRITE => Self::sys_write(a0 as RawFd, a1 as *const u8, a2),
            id => {
                warn!("Unknown syscall: {id}");
                Errno::ENOSYS.as_neg_ret()
            }
        }
    }

    fn call_noreturn(&self, request: Syscall) -> ! {
        if request.id != SYSCALL_EXIT {
            warn!("Syscall {} cannot be non-returning", request.id);
            std::process::abort();
        }
        std::process::exit(request.args[0] as i32)
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::*;
    use crate::syscall::raw_write;
    use std::{
        fs::{self, OpenOptions},
        os::fd::AsRawFd,
        process,
    };

    #[test]
    fn test_host_write_reaches_descriptor() {
        let path = std::env::temp_dir().join(format!("newlib_glue_host_{}", process::id()));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .unwrap();

        let msg = b"written through the glue\n";
        let ret = raw_write(&HostKernel, file.as_raw_fd(), msg.as_ptr(), msg.len());
        assert_eq!(ret, msg.len() as isize);
        // The descriptor must still be usable after the kernel call.
        assert_eq!(raw_write(&HostKernel, file.as_raw_fd(), b"!".as_ptr(), 1), 1);

        drop(file);
        assert_eq!(fs::read(&path).unwrap(), b"written through the glue\n!");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_host_write_bad_descriptor() {
        let ret = raw_write(&HostKernel, -1, b"x".as_ptr(), 1);
        assert_eq!(ret, -(Errno::EBADF.as_c_int() as isize));
    }

    #[test]
    fn test_host_unknown_syscall() {
        let ret = HostKernel.call(Syscall::new(999, [0; 3]));
        assert_eq!(ret, -88);
    }
}
