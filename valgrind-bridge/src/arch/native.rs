//! The implementation of `valgrind_do_client_request_expr` calling into the C bridge

use crate::native_bindings;

/// Perform the client request `request` with the arguments `arg1` to `arg5`
///
/// Returns `default` if not running under valgrind or if the tool does not handle the request.
#[inline(always)]
#[allow(clippy::similar_names)]
pub fn valgrind_do_client_request_expr(
    default: usize,
    request: cty::c_uint,
    arg1: usize,
    arg2: usize,
    arg3: usize,
    arg4: usize,
    arg5: usize,
) -> usize {
    // SAFETY: This call is as safe as valgrind's `VALGRIND_DO_CLIENT_REQUEST_EXPR` macro
    unsafe {
        native_bindings::valgrind_do_client_request_expr(
            default,
            request as usize,
            arg1,
            arg2,
            arg3,
            arg4,
            arg5,
        )
    }
}
