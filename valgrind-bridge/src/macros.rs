//! The macros shared by the client request modules and the exported print macros

/// Return true if a client request is defined and available in the used valgrind version
///
/// Requests the installed `valgrind.h` doesn't know about are generated with the code `0` by the
/// build script. All valid request codes are above `0x1000`. We're only using constant values
/// known at compile time, which the compiler will finally optimize away, so this macro costs us
/// nothing.
macro_rules! is_def {
    ($user_req:path) => {{
        $user_req > 0x1000
    }};
}

/// Perform a client request if it is defined, exit with a fatal error otherwise
///
/// The form with a `default` value is the expression form returning the result of the request.
/// The form without `default` is the statement form discarding the result.
macro_rules! do_client_request {
    (
        $name:literal, $default:expr, $user_req:path,
        $arg1:expr, $arg2:expr, $arg3:expr, $arg4:expr, $arg5:expr
    ) => {{
        if is_def!($user_req) {
            $crate::arch::valgrind_do_client_request_expr(
                $default, $user_req, $arg1, $arg2, $arg3, $arg4, $arg5,
            )
        } else {
            $crate::fatal_error($name)
        }
    }};
    (
        $name:literal, $user_req:path,
        $arg1:expr, $arg2:expr, $arg3:expr, $arg4:expr, $arg5:expr
    ) => {{
        if is_def!($user_req) {
            $crate::arch::valgrind_do_client_request_stmt(
                $user_req, $arg1, $arg2, $arg3, $arg4, $arg5,
            );
        } else {
            $crate::fatal_error($name);
        }
    }};
}

/// Print a formatted message to the valgrind log
///
/// Accepts the same arguments as [`format!`]. Returns the number of bytes valgrind wrote or a
/// [`crate::ClientRequestError`] if the formatted message contains a `\0` byte or the print
/// shim is not available. Outside of valgrind nothing is printed and the returned count is `0`.
///
/// # Examples
///
/// ```rust,no_run
/// use valgrind_bridge::valgrind_printf;
///
/// let name = "world";
/// valgrind_printf!("Hello {name}\n").unwrap();
/// ```
#[macro_export]
macro_rules! valgrind_printf {
    ($($arg:tt)*) => {{
        $crate::__valgrind_print(format!($($arg)*))
    }};
}

/// Like [`valgrind_printf!`] but appends a newline
#[macro_export]
macro_rules! valgrind_println {
    () => { $crate::valgrind_printf!("\n") };
    ($($arg:tt)*) => {{
        $crate::__valgrind_print(format!("{}\n", format_args!($($arg)*)))
    }};
}

/// Like [`valgrind_printf!`] but valgrind appends a stack backtrace to the message
#[macro_export]
macro_rules! valgrind_printf_backtrace {
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_backtrace(format!($($arg)*))
    }};
}

/// Like [`valgrind_printf_backtrace!`] but appends a newline
#[macro_export]
macro_rules! valgrind_println_backtrace {
    () => { $crate::valgrind_printf_backtrace!("\n") };
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_backtrace(format!("{}\n", format_args!($($arg)*)))
    }};
}

/// The unsafe version of [`valgrind_printf!`] skipping the check for `\0` bytes
///
/// # Safety
///
/// The formatted message must not contain `\0` bytes. Valgrind stops printing at the first one.
#[macro_export]
macro_rules! valgrind_printf_unchecked {
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_unchecked(format!($($arg)*))
    }};
}

/// The unsafe version of [`valgrind_println!`]
///
/// # Safety
///
/// See [`valgrind_printf_unchecked!`]
#[macro_export]
macro_rules! valgrind_println_unchecked {
    () => { $crate::valgrind_printf_unchecked!("\n") };
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_unchecked(format!("{}\n", format_args!($($arg)*)))
    }};
}

/// The unsafe version of [`valgrind_printf_backtrace!`]
///
/// # Safety
///
/// See [`valgrind_printf_unchecked!`]
#[macro_export]
macro_rules! valgrind_printf_backtrace_unchecked {
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_backtrace_unchecked(format!($($arg)*))
    }};
}

/// The unsafe version of [`valgrind_println_backtrace!`]
///
/// # Safety
///
/// See [`valgrind_printf_unchecked!`]
#[macro_export]
macro_rules! valgrind_println_backtrace_unchecked {
    () => { $crate::valgrind_printf_backtrace_unchecked!("\n") };
    ($($arg:tt)*) => {{
        $crate::__valgrind_print_backtrace_unchecked(format!("{}\n", format_args!($($arg)*)))
    }};
}

#[cfg(test)]
mod tests {
    const UNAVAILABLE: cty::c_uint = 0;
    const RUNNING_ON_VALGRIND: cty::c_uint = 0x1001;
    const CALLGRIND_DUMP_STATS: cty::c_uint = 0x4354_0000;

    #[test]
    fn test_is_def() {
        assert!(!is_def!(UNAVAILABLE));
        assert!(is_def!(RUNNING_ON_VALGRIND));
        assert!(is_def!(CALLGRIND_DUMP_STATS));
    }

    #[test]
    fn test_do_client_request_when_defined_then_default() {
        let result = do_client_request!("tests::running", 7, RUNNING_ON_VALGRIND, 0, 0, 0, 0, 0);
        assert_eq!(result, 7);
    }

    #[test]
    #[should_panic(expected = "tests::unavailable not available!")]
    fn test_do_client_request_when_not_defined_then_panic() {
        do_client_request!("tests::unavailable", UNAVAILABLE, 0, 0, 0, 0, 0);
    }
}
