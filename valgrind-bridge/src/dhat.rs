//! All client requests from the `dhat.h` header file
//!
//! Both requests need at least valgrind 3.17.
//!
//! See also the [DHAT documentation](https://valgrind.org/docs/manual/dh-manual.html#dh-manual)

use crate::bindings::VB_DHATClientRequest as Request;

/// Record an ad hoc event
///
/// If DHAT is invoked with `--mode=ad-hoc`, instead of profiling heap operations (allocations and
/// deallocations), it profiles calls to this `ad_hoc_event` client request.
///
/// The meaning of the `weight` argument is up to the user. If no meaningful `weight` argument
/// exists, just use 1.
///
/// See also [Ad hoc
/// profiling](https://valgrind.org/docs/manual/dh-manual.html#dh-manual.ad-hoc-profiling)
#[inline(always)]
pub fn ad_hoc_event(weight: usize) {
    do_client_request!(
        "dhat::ad_hoc_event",
        Request::VB_DHAT_AD_HOC_EVENT,
        weight,
        0,
        0,
        0,
        0
    );
}

/// Request access count histograms for the heap block at `addr` even if it is larger than 1024
/// bytes
///
/// Place the call immediately after the allocation with the pointer returned by the allocator.
///
/// See also [Access Counts](https://valgrind.org/docs/manual/dh-manual.html#dh-access-counts)
#[inline(always)]
pub fn histogram_memory(addr: *const ()) {
    do_client_request!(
        "dhat::histogram_memory",
        Request::VB_DHAT_HISTOGRAM_MEMORY,
        addr as usize,
        0,
        0,
        0,
        0
    );
}
