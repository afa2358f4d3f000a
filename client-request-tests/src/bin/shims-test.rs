use std::ffi::CString;

use client_request_tests::{exit_code, MARKER};
use valgrind_bridge::shims;
use valgrind_bridge::valgrind_println;

fn main() {
    valgrind_println!("{MARKER}").unwrap();

    let running = shims::running_on_valgrind().unwrap();
    println!("running_on_valgrind: {running}");

    let message = CString::new("hello\n").unwrap();
    println!("printf hello: {}", shims::printf(&message).unwrap());

    // Without a trailing newline, valgrind completes the line with the next message
    let message = CString::new("abc").unwrap();
    println!("printf: {}", shims::printf(&message).unwrap());

    // A `%s` is printed literally and never interpreted as format specifier
    let message = CString::new("\nbacktrace: %s\n").unwrap();
    println!(
        "printf_backtrace: {}",
        shims::printf_backtrace(&message).unwrap()
    );

    std::process::exit(exit_code(running));
}
