//! The core client requests of the `valgrind.h` header file, independent of a specific tool
//!
//! These functions use the generic dispatcher directly. A request unknown to the installed
//! `valgrind.h` causes a panic when called.
//!
//! See also [The client request
//! mechanism](https://valgrind.org/docs/manual/manual-core-adv.html#manual-core-adv.clientreq)

use std::ffi::CStr;

use crate::bindings::VB_ValgrindClientRequest as Request;

/// The nesting depth of valgrind around this process
///
/// `0` natively, `1` under valgrind and `2` under valgrind running under valgrind. Unlike
/// [`crate::shims::running_on_valgrind`] this doesn't call into the C bridge.
#[inline(always)]
pub fn running_on_valgrind() -> usize {
    do_client_request!(
        "valgrind::running_on_valgrind",
        0,
        Request::VB_RUNNING_ON_VALGRIND,
        0,
        0,
        0,
        0,
        0
    )
}

/// Throw away valgrind's translations of the code in `addr..addr + len`
///
/// Needed by programs generating code at run time, so that valgrind translates the new code the
/// next time it is executed.
#[inline(always)]
pub fn discard_translations(addr: *const (), len: usize) {
    do_client_request!(
        "valgrind::discard_translations",
        Request::VB_DISCARD_TRANSLATIONS,
        addr as usize,
        len,
        0,
        0,
        0
    );
}

/// The number of errors the tool found so far
///
/// Only tools reporting errors through the core error manager (Memcheck, DRD, Helgrind) count
/// them. Always `0` for other tools.
#[inline(always)]
pub fn count_errors() -> usize {
    do_client_request!(
        "valgrind::count_errors",
        0,
        Request::VB_COUNT_ERRORS,
        0,
        0,
        0,
        0,
        0
    )
}

/// Suppress error reports of the calling thread
///
/// The calls nest: reporting resumes after as many [`enable_error_reporting`] calls. Threads
/// spawned afterwards report errors regardless.
#[inline(always)]
pub fn disable_error_reporting() {
    do_client_request!(
        "valgrind::disable_error_reporting",
        Request::VB_CHANGE_ERR_DISABLEMENT,
        1,
        0,
        0,
        0,
        0
    );
}

/// Undo one [`disable_error_reporting`]
#[inline(always)]
pub fn enable_error_reporting() {
    do_client_request!(
        "valgrind::enable_error_reporting",
        Request::VB_CHANGE_ERR_DISABLEMENT,
        usize::MAX, // `valgrind.h` uses `-1`
        0,
        0,
        0,
        0
    );
}

/// Run a gdbserver monitor command like `v.info all_errors`
///
/// The output goes to an attached GDB or to the valgrind log. Returns `true` if valgrind
/// recognized the command. Natively, every command counts as recognized.
///
/// <https://valgrind.org/docs/manual/manual-core-adv.html#manual-core-adv.valgrind-monitor-commands>
#[inline(always)]
pub fn monitor_command<T>(command: T) -> bool
where
    T: AsRef<CStr>,
{
    do_client_request!(
        "valgrind::monitor_command",
        0,
        Request::VB_GDB_MONITOR_COMMAND,
        command.as_ref().as_ptr() as usize,
        0,
        0,
        0,
        0
    ) != 1
}

/// Set a command line option like `--leak-check=summary` while the program runs
///
/// `valgrind --help-dyn-options` lists the options which can be changed this way. Valgrind warns
/// about any other option and ignores it. Needs valgrind 3.16.
#[inline(always)]
pub fn clo_change<T>(option: T)
where
    T: AsRef<CStr>,
{
    do_client_request!(
        "valgrind::clo_change",
        Request::VB_CLO_CHANGE,
        option.as_ref().as_ptr() as usize,
        0,
        0,
        0,
        0
    );
}
