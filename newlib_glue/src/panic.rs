use crate::syscall::{KERNEL, terminate};

#[panic_handler]
fn panic_handler(panic_info: &core::panic::PanicInfo) -> ! {
    let err = panic_info.message();
    if let Some(location) = panic_info.location() {
        eprintln!(
            "Panicked at {}:{}, {}",
            location.file(),
            location.line(),
            err
        );
    } else {
        eprintln!("Panicked: {}", err);
    }
    terminate(&KERNEL, 1)
}
