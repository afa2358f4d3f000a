//! The platform dependent implementations of the generic client request dispatcher
//!
//! The rust `asm!` macro is not stable for all platforms which valgrind supports. We use `asm!` on
//! `x86_64`, `x86` and `aarch64` and fall back to the dispatcher of the C bridge (`native`) on all
//! other platforms valgrind supports, for example:
//!
//! * arm (linux)
//! * s390x-unknown-linux
//! * mips32-unknown-linux
//! * mips64-unknown-linux
//! * powerpc64le-unknown-linux
//! * riscv64 (linux)

// The `client_requests_support` cfg is set in the build script
cfg_if::cfg_if! {
    if #[cfg(client_requests_support = "x86_64")] {
        #[path = "x86_64.rs"]
        mod imp;
    } else if #[cfg(client_requests_support = "x86")] {
        #[path = "x86.rs"]
        mod imp;
    } else if #[cfg(client_requests_support = "aarch64")] {
        #[path = "aarch64.rs"]
        mod imp;
    } else if #[cfg(client_requests_support = "native")] {
        #[path = "native.rs"]
        mod imp;
    } else {
        // We're here when `client_requests_support = "no"`
        compile_error!("Client requests are not supported on this platform");
    }
}

pub use imp::valgrind_do_client_request_expr;

/// The statement form of [`valgrind_do_client_request_expr`] discarding the result
#[inline(always)]
pub fn valgrind_do_client_request_stmt(
    request: cty::c_uint,
    arg1: usize,
    arg2: usize,
    arg3: usize,
    arg4: usize,
    arg5: usize,
) {
    imp::valgrind_do_client_request_expr(0, request, arg1, arg2, arg3, arg4, arg5);
}
