//! Valgrind's client request mechanism for Rust
//!
//! Valgrind tools like Memcheck, Callgrind or DHAT can be controlled by the program running under
//! them through [client
//! requests](https://valgrind.org/docs/manual/manual-core-adv.html#manual-core-adv.clientreq). A
//! client request is a magic instruction sequence which does nothing when running natively and is
//! trapped by valgrind otherwise. This crate compiles a small C bridge against the valgrind headers
//! installed on your system and offers the client requests with a plain function-call interface.
//!
//! # The bridge
//!
//! The C bridge exports the following functions with the C calling convention:
//!
//! * `valgrind_do_client_request_expr(default, request, arg1, arg2, arg3, arg4, arg5)`: The generic
//!   dispatcher. Returns `default` when not running under valgrind or if the tool doesn't handle
//!   the request.
//! * `running_on_valgrind()`, `valgrind_printf(message)` and `valgrind_printf_backtrace(message)`:
//!   The named shims around the macros (or functions) of the same name in `valgrind.h`.
//!
//! If the installed `valgrind.h` lacks the macro of a named shim, the C shim prints an error
//! message naming the macro and the version of the header and exits the process. The Rust
//! functions in [`shims`] check the availability at build time instead and return a
//! [`ClientRequestError::Unavailable`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use valgrind_bridge::{callgrind, shims, valgrind_println};
//!
//! if shims::running_on_valgrind().unwrap() > 0 {
//!     valgrind_println!("We're running under valgrind").unwrap();
//! }
//!
//! callgrind::zero_stats();
//! // The code to measure
//! callgrind::dump_stats();
//! ```
//!
//! Arbitrary requests can be sent with a [`ClientRequest`]:
//!
//! ```rust
//! use valgrind_bridge::ClientRequest;
//!
//! // An unknown request code is ignored by valgrind. The default value is returned.
//! let request = ClientRequest::new(0).with_default(42);
//! assert_eq!(request.dispatch(), 42);
//! ```
//!
//! # Configuration
//!
//! The build script looks for `valgrind/valgrind.h` in the directory given by the environment
//! variable `VALGRIND_BRIDGE_VALGRIND_INCLUDE`, then in
//! `/valgrind/target/valgrind/$VALGRIND_BRIDGE_CROSS_TARGET/include` and finally in the usual
//! system include directories.

#![doc(test(attr(warn(unused))))]
#![doc(test(attr(allow(unused_extern_crates))))]

#[macro_use]
mod macros;

mod arch;
mod bindings;
pub mod callgrind;
pub mod dhat;
mod error;
pub mod memcheck;
#[cfg(not(client_requests_support = "no"))]
mod native_bindings;
mod request;
pub mod shims;
pub mod valgrind;

use std::ffi::CString;

pub use arch::{valgrind_do_client_request_expr, valgrind_do_client_request_stmt};
pub use error::ClientRequestError;
pub use request::ClientRequest;
pub use shims::Shim;

fn fatal_error(func: &str) -> ! {
    panic!(
        "FATAL: {}::{func} not available! You may need update your installed valgrind version. \
         The valgrind version of the active valgrind.h header file is {}.{}. Exiting...",
        module_path!(),
        bindings::__VALGRIND_MAJOR__,
        bindings::__VALGRIND_MINOR__
    );
}

#[doc(hidden)]
pub fn __valgrind_print(string: String) -> Result<cty::c_int, ClientRequestError> {
    let c_string = CString::new(string)?;
    shims::printf(c_string)
}

#[doc(hidden)]
pub fn __valgrind_print_backtrace(string: String) -> Result<cty::c_int, ClientRequestError> {
    let c_string = CString::new(string)?;
    shims::printf_backtrace(c_string)
}

#[doc(hidden)]
/// # Safety
///
/// `string` must not contain `\0` bytes
pub unsafe fn __valgrind_print_unchecked(string: String) -> Result<cty::c_int, ClientRequestError> {
    // SAFETY: The caller guarantees that there are no interior `\0` bytes
    let c_string = unsafe { CString::from_vec_unchecked(string.into_bytes()) };
    shims::printf(c_string)
}

#[doc(hidden)]
/// # Safety
///
/// `string` must not contain `\0` bytes
pub unsafe fn __valgrind_print_backtrace_unchecked(
    string: String,
) -> Result<cty::c_int, ClientRequestError> {
    // SAFETY: The caller guarantees that there are no interior `\0` bytes
    let c_string = unsafe { CString::from_vec_unchecked(string.into_bytes()) };
    shims::printf_backtrace(c_string)
}
