#![cfg_attr(not(unix), no_std)]
#![cfg_attr(not(unix), feature(custom_test_frameworks))]
#![cfg_attr(not(unix), test_runner(test_runner))]

/// Software interrupt vector the kernel listens on.
pub const SYSCALL_VECTOR: u8 = 0x80;

pub const SYSCALL_EXIT: usize = 1;
pub const SYSCALL_WRITE: usize = 4;

#[cfg(all(not(unix), test))]
fn test_runner(_tests: &[&dyn Fn()]) {
    unreachable!("this function will never be called");
}
