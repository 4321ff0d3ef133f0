//! Runs on the bare target only; a host build just says so.
#![cfg_attr(not(unix), no_std)]
#![cfg_attr(not(unix), no_main)]

#[cfg(not(unix))]
extern crate alloc;

#[cfg(not(unix))]
use alloc::vec::Vec;
#[cfg(not(unix))]
use core::ffi::c_int;
#[cfg(not(unix))]
use log::info;
#[cfg(not(unix))]
use newlib_glue::{config::STDOUT, exit, logger, println, sbrk, stubs};

#[cfg(unix)]
fn main() {
    eprintln!("hello: build for the bare x86 target to run this demo");
    std::process::exit(1);
}

/// No newlib underneath this program, so the glue's `errno` lives here.
#[cfg(not(unix))]
#[unsafe(no_mangle)]
pub extern "C" fn __errno() -> *mut c_int {
    static mut ERRNO: c_int = 0;
    &raw mut ERRNO
}

#[cfg(not(unix))]
#[unsafe(no_mangle)]
#[unsafe(link_section = ".text.entry")]
pub extern "C" fn _start() -> ! {
    logger::init();
    println!("Hello from newlib_glue!");

    let start = sbrk(0);
    let squares: Vec<u64> = (0..4096).map(|i| i * i).collect();
    info!("heap grew from {:p} to {:p}", start, sbrk(0));
    println!("sum of squares: {}", squares.iter().sum::<u64>());

    if stubs::isatty(STDOUT).value == 1 {
        println!("stdout is a terminal, pid {}", stubs::getpid().value);
    }
    exit(0)
}
