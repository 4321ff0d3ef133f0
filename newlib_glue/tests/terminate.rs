//! `exit` must never come back, so it is observed from a parent process:
//! the test binary re-runs itself with `CHILD_ENV` set and the child calls it.
#![cfg(unix)]

use std::{env, process::Command};

const CHILD_ENV: &str = "NEWLIB_GLUE_EXIT_CODE";

fn run_child(test_name: &str, code: i32) -> std::process::Output {
    Command::new(env::current_exe().unwrap())
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, code.to_string())
        .output()
        .unwrap()
}

#[test]
fn exit_never_returns_to_caller() {
    if let Ok(code) = env::var(CHILD_ENV) {
        newlib_glue::write(1, b"before exit\n");
        newlib_glue::exit(code.parse().unwrap());
    }

    for code in [0, 3, 42] {
        let out = run_child("exit_never_returns_to_caller", code);
        assert_eq!(out.status.code(), Some(code));

        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("before exit"), "{stdout}");
        // The harness reports a finished test only when the body returns.
        assert!(!stdout.contains("test result:"), "{stdout}");
    }
}

#[test]
fn exit_skips_destructors() {
    struct Loud;

    impl Drop for Loud {
        fn drop(&mut self) {
            newlib_glue::write(1, b"destructor ran\n");
        }
    }

    if let Ok(code) = env::var(CHILD_ENV) {
        let _guard = Loud;
        newlib_glue::exit(code.parse().unwrap());
    }

    let out = run_child("exit_skips_destructors", 7);
    assert_eq!(out.status.code(), Some(7));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("destructor ran"));
}
