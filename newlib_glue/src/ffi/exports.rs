use common::{Stat, SysRet, Tms};
use core::ffi::{c_char, c_int, c_long, c_ulong, c_void};
use core::ptr;

use super::{clock_into, fill_stat, finish_into};
use crate::heap;
use crate::stubs;
use crate::syscall::{KERNEL, raw_write, terminate};

unsafe extern "C" {
    /// newlib's accessor for the current thread's `errno`.
    fn __errno() -> *mut c_int;
}

fn errno_slot() -> &'static mut c_int {
    unsafe { &mut *__errno() }
}

fn finish(ret: SysRet) -> c_int {
    finish_into(ret, errno_slot())
}

#[allow(non_upper_case_globals)]
#[unsafe(no_mangle)]
pub static mut __env: [*mut c_char; 1] = [ptr::null_mut()];

#[allow(non_upper_case_globals)]
#[unsafe(no_mangle)]
pub static mut environ: *mut *mut c_char = &raw mut __env as *mut *mut c_char;

#[unsafe(no_mangle)]
pub extern "C" fn _exit(code: c_int) -> ! {
    terminate(&KERNEL, code)
}

#[unsafe(no_mangle)]
pub extern "C" fn close(file: c_int) -> c_int {
    finish(stubs::close(file))
}

#[unsafe(no_mangle)]
pub extern "C" fn execve(
    name: *const c_char,
    argv: *const *const c_char,
    env: *const *const c_char,
) -> c_int {
    finish(stubs::execve(name, argv, env))
}

#[unsafe(no_mangle)]
pub extern "C" fn fork() -> c_int {
    finish(stubs::fork())
}

/// Always reports a character device and returns 0, except for a null `st`,
/// which returns -1 with `errno` set to `EFAULT`.
///
/// # Safety
///
/// `st` must be null or point to a writable `struct stat`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fstat(file: c_int, st: *mut Stat) -> c_int {
    finish(fill_stat(unsafe { st.as_mut() }, |st| stubs::fstat(file, st)))
}

#[unsafe(no_mangle)]
pub extern "C" fn getpid() -> c_int {
    finish(stubs::getpid())
}

#[unsafe(no_mangle)]
pub extern "C" fn isatty(file: c_int) -> c_int {
    finish(stubs::isatty(file))
}

#[unsafe(no_mangle)]
pub extern "C" fn kill(pid: c_int, sig: c_int) -> c_int {
    finish(stubs::kill(pid, sig))
}

#[unsafe(no_mangle)]
pub extern "C" fn link(old: *const c_char, new: *const c_char) -> c_int {
    finish(stubs::link(old, new))
}

#[unsafe(no_mangle)]
pub extern "C" fn lseek(file: c_int, ptr: c_int, dir: c_int) -> c_int {
    finish(stubs::lseek(file, ptr as c_long, dir))
}

// C declares `open` variadic. With cdecl the caller pops the arguments, so a
// fixed third parameter reads the optional mode without disturbing anything.
#[unsafe(no_mangle)]
pub extern "C" fn open(file: *const c_char, flags: c_int, _mode: c_int) -> c_int {
    finish(stubs::open(file, flags))
}

#[unsafe(no_mangle)]
pub extern "C" fn read(file: c_int, ptr: *mut c_char, len: c_int) -> c_int {
    finish(stubs::read(file, ptr.cast(), len as usize))
}

#[unsafe(no_mangle)]
pub extern "C" fn sbrk(incr: c_int) -> *mut c_void {
    heap::sbrk(incr as isize).cast()
}

/// Always reports a character device and returns 0, except for a null
/// `sbuf`, which returns -1 with `errno` set to `EFAULT`.
///
/// # Safety
///
/// `sbuf` must be null or point to a writable `struct stat`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn stat(path: *const c_char, sbuf: *mut Stat) -> c_int {
    finish(fill_stat(unsafe { sbuf.as_mut() }, |st| stubs::stat(path, st)))
}

#[unsafe(no_mangle)]
pub extern "C" fn times(buf: *mut Tms) -> c_ulong {
    clock_into(stubs::times(buf), errno_slot())
}

#[unsafe(no_mangle)]
pub extern "C" fn unlink(name: *const c_char) -> c_int {
    finish(stubs::unlink(name))
}

#[unsafe(no_mangle)]
pub extern "C" fn wait(status: *mut c_int) -> c_int {
    finish(stubs::wait(status))
}

#[unsafe(no_mangle)]
pub extern "C" fn write(file: c_int, ptr: *const c_char, len: c_int) -> c_int {
    raw_write(&KERNEL, file, ptr.cast(), len as usize) as c_int
}
