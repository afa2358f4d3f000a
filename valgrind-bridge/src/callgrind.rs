//! All client requests from the `callgrind.h` header file
//!
//! See also [Callgrind specific client
//! requests](https://valgrind.org/docs/manual/cl-manual.html#cl-manual.clientrequests)

use std::ffi::CStr;

use crate::bindings::VB_CallgrindClientRequest as Request;

/// Dump the current state of the execution counters to a new profile data file
///
/// The counters are zeroed afterwards. The name of the file is `callgrind.out.<pid>.<part>`.
#[inline(always)]
pub fn dump_stats() {
    do_client_request!(
        "callgrind::dump_stats",
        Request::VB_DUMP_STATS,
        0,
        0,
        0,
        0,
        0
    );
}

/// Like [`dump_stats`] with the string `reason` written into the profile data as reason of the
/// dump
#[inline(always)]
pub fn dump_stats_at<T>(reason: T)
where
    T: AsRef<CStr>,
{
    do_client_request!(
        "callgrind::dump_stats_at",
        Request::VB_DUMP_STATS_AT,
        reason.as_ref().as_ptr() as usize,
        0,
        0,
        0,
        0
    );
}

/// Reset the execution counters of the current thread to zero
#[inline(always)]
pub fn zero_stats() {
    do_client_request!(
        "callgrind::zero_stats",
        Request::VB_ZERO_STATS,
        0,
        0,
        0,
        0,
        0
    );
}

/// Toggle the collection state
///
/// Events are only counted while collection is on. Use it together with the callgrind option
/// `--collect-atstart=no` to restrict the measurement to a part of the program.
#[inline(always)]
pub fn toggle_collect() {
    do_client_request!(
        "callgrind::toggle_collect",
        Request::VB_TOGGLE_COLLECT,
        0,
        0,
        0,
        0,
        0
    );
}

/// Start full callgrind instrumentation if not already switched on
///
/// Switching the instrumentation on flushes valgrind's translation cache, which is expensive.
#[inline(always)]
pub fn start_instrumentation() {
    do_client_request!(
        "callgrind::start_instrumentation",
        Request::VB_START_INSTRUMENTATION,
        0,
        0,
        0,
        0,
        0
    );
}

/// Stop full callgrind instrumentation if not already switched off
///
/// Use it together with the callgrind option `--instr-atstart=no` to skip the instrumentation of
/// uninteresting code.
#[inline(always)]
pub fn stop_instrumentation() {
    do_client_request!(
        "callgrind::stop_instrumentation",
        Request::VB_STOP_INSTRUMENTATION,
        0,
        0,
        0,
        0,
        0
    );
}
