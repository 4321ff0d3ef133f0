fn main() {
    use std::{env, fs, path::PathBuf};

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LOG");

    // Hosted builds link the ordinary way.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }
    let arch = match env::var("CARGO_CFG_TARGET_ARCH").as_deref() {
        Ok("x86_64") => "i386:x86-64",
        _ => "i386",
    };

    let ld = PathBuf::from(env::var_os("OUT_DIR").unwrap()).join("linker.ld");
    fs::write(&ld, LINKER.replace("{arch}", arch)).unwrap();
    println!("cargo:rustc-link-arg-bins=-T{}", ld.display());
}

const LINKER: &str = "
OUTPUT_ARCH({arch})
ENTRY(_start)
BASE_ADDRESS = 0x00400000;

SECTIONS
{
    . = BASE_ADDRESS;
    .text : {
        *(.text.entry)
        *(.text .text.*)
    }
    .rodata : {
        *(.rodata .rodata.*)
    }
    .data : {
        *(.data .data.*)
    }
    .bss : {
        *(.bss .bss.*)
        *(COMMON)
    }
    . = ALIGN(4096);
    _end = .;
    /DISCARD/ : {
        *(.eh_frame)
        *(.debug*)
    }
}";
