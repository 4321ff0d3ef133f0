#![cfg_attr(not(unix), no_std)]
#![cfg_attr(not(unix), feature(custom_test_frameworks))]
#![cfg_attr(not(unix), test_runner(test_runner))]

pub mod errno;
pub mod stat;

pub use errno::{Errno, SysRet};
pub use stat::{FileMode, Stat, Tms};

#[cfg(all(not(unix), test))]
fn test_runner(_tests: &[&dyn Fn()]) {
    unreachable!("this function will never be called");
}
