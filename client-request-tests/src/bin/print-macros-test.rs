use client_request_tests::{exit_code, MARKER};
use valgrind_bridge::{
    valgrind, valgrind_printf, valgrind_printf_backtrace, valgrind_printf_backtrace_unchecked,
    valgrind_printf_unchecked, valgrind_println, valgrind_println_backtrace,
    valgrind_println_backtrace_unchecked, valgrind_println_unchecked, ClientRequestError,
};

fn main() {
    let invalid_cstring = "INV\0LID";
    let valid_cstring = "foo";

    unsafe {
        valgrind_println_unchecked!("{MARKER}").unwrap();
    }

    valgrind_printf!("printf: {valid_cstring}\n").unwrap();
    assert!(matches!(
        valgrind_printf!("printf (invalid): {invalid_cstring}\n"),
        Err(ClientRequestError::InteriorNul(_))
    ));
    valgrind_println!().unwrap();
    unsafe {
        valgrind_printf_unchecked!("printf unchecked: {valid_cstring}\n").unwrap();
        valgrind_println_unchecked!().unwrap();
    }

    valgrind_println!("println: {valid_cstring}").unwrap();
    valgrind_println!("println (invalid): {invalid_cstring}").unwrap_err();
    unsafe {
        valgrind_println_unchecked!("println unchecked: {valid_cstring}").unwrap();
    }

    valgrind_printf_backtrace!("printf backtrace: {valid_cstring}\n").unwrap();
    valgrind_printf_backtrace!("printf backtrace (invalid): {invalid_cstring}\n").unwrap_err();
    unsafe {
        valgrind_printf_backtrace_unchecked!("printf backtrace unchecked: {valid_cstring}\n")
            .unwrap();
    }

    valgrind_println_backtrace!("println backtrace: {valid_cstring}").unwrap();
    valgrind_println_backtrace!("println backtrace (invalid): {invalid_cstring}").unwrap_err();
    unsafe {
        valgrind_println_backtrace_unchecked!("println backtrace unchecked: {valid_cstring}")
            .unwrap();
    }

    std::process::exit(exit_code(valgrind::running_on_valgrind()));
}
