//! A selection of client requests from the `memcheck.h` header file
//!
//! See also [Memcheck Client
//! Requests](https://valgrind.org/docs/manual/mc-manual.html#mc-manual.clientreqs)

use crate::bindings::VB_MemcheckClientRequest as Request;

/// The leak counts as returned by [`count_leaks`]
///
/// The number of bytes found by the previous leak check to be leaked (the sum of direct and
/// indirect leaks), dubious, reachable and suppressed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LeakCounts {
    /// Bytes in direct and indirect leaks
    pub leaked: usize,
    /// Bytes in possible leaks
    pub dubious: usize,
    /// Bytes still reachable
    pub reachable: usize,
    /// Bytes in suppressed leaks
    pub suppressed: usize,
}

/// Tell memcheck that the `len` bytes at `addr` must not be accessed
#[inline(always)]
pub fn make_mem_noaccess(addr: *const (), len: usize) -> usize {
    do_client_request!(
        "memcheck::make_mem_noaccess",
        0,
        Request::VB_MAKE_MEM_NOACCESS,
        addr as usize,
        len,
        0,
        0,
        0
    )
}

/// Tell memcheck that the `len` bytes at `addr` are accessible but hold no defined value
#[inline(always)]
pub fn make_mem_undefined(addr: *const (), len: usize) -> usize {
    do_client_request!(
        "memcheck::make_mem_undefined",
        0,
        Request::VB_MAKE_MEM_UNDEFINED,
        addr as usize,
        len,
        0,
        0,
        0
    )
}

/// Tell memcheck that the `len` bytes at `addr` are accessible and initialized
#[inline(always)]
pub fn make_mem_defined(addr: *const (), len: usize) -> usize {
    do_client_request!(
        "memcheck::make_mem_defined",
        0,
        Request::VB_MAKE_MEM_DEFINED,
        addr as usize,
        len,
        0,
        0,
        0
    )
}

/// Ask memcheck whether all `len` bytes at `addr` may be accessed
///
/// Returns `0` on success. Otherwise memcheck reports an error and the address of the first
/// inaccessible byte is returned.
#[inline(always)]
pub fn check_mem_is_addressable(addr: *const (), len: usize) -> usize {
    do_client_request!(
        "memcheck::check_mem_is_addressable",
        0,
        Request::VB_CHECK_MEM_IS_ADDRESSABLE,
        addr as usize,
        len,
        0,
        0,
        0
    )
}

/// Like [`check_mem_is_addressable`] but the bytes must be initialized, too
#[inline(always)]
pub fn check_mem_is_defined(addr: *const (), len: usize) -> usize {
    do_client_request!(
        "memcheck::check_mem_is_defined",
        0,
        Request::VB_CHECK_MEM_IS_DEFINED,
        addr as usize,
        len,
        0,
        0,
        0
    )
}

/// Run a leak check now, reporting like `--leak-check=full`
#[inline(always)]
pub fn do_leak_check() {
    do_client_request!(
        "memcheck::do_leak_check",
        Request::VB_DO_LEAK_CHECK,
        0,
        0,
        0,
        0,
        0
    );
}

/// Run a leak check now, reporting like `--leak-check=summary`
#[inline(always)]
pub fn do_quick_leak_check() {
    do_client_request!(
        "memcheck::do_quick_leak_check",
        Request::VB_DO_LEAK_CHECK,
        1,
        0,
        0,
        0,
        0
    );
}

/// Return the [`LeakCounts`] found by the previous leak check
///
/// Useful in test harness code after calling [`do_leak_check`] or [`do_quick_leak_check`]. All
/// counts are zero when not running under memcheck.
#[inline(always)]
pub fn count_leaks() -> LeakCounts {
    let mut leaks = LeakCounts::default();
    do_client_request!(
        "memcheck::count_leaks",
        Request::VB_COUNT_LEAKS,
        std::ptr::addr_of_mut!(leaks.leaked) as usize,
        std::ptr::addr_of_mut!(leaks.dubious) as usize,
        std::ptr::addr_of_mut!(leaks.reachable) as usize,
        std::ptr::addr_of_mut!(leaks.suppressed) as usize,
        0
    );
    leaks
}
