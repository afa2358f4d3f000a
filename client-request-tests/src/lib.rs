//! Shared items of the client request test binaries and the `valgrind-wrapper`

use std::ffi::CStr;

/// Every line the valgrind-wrapper sees on stderr before this marker is discarded
pub const MARKER: &str = "@@@ CLIENT REQUEST TESTS START @@@";

/// The shims compiled against crippled `valgrind.h` headers by the build script
///
/// The `stripped_` shims lack `RUNNING_ON_VALGRIND`, the `nvalgrind_` shims are compiled with
/// `NVALGRIND` and lack the print functions. A shim with a missing macro prints an error and exits
/// the process. Never call them from anything but a dedicated test binary.
pub mod crippled {
    use cty::c_char;

    extern "C" {
        pub fn stripped_running_on_valgrind() -> usize;
        pub fn stripped_valgrind_printf(message: *const c_char) -> cty::c_int;
        pub fn stripped_valgrind_printf_backtrace(message: *const c_char) -> cty::c_int;

        pub fn nvalgrind_running_on_valgrind() -> usize;
        pub fn nvalgrind_valgrind_printf(message: *const c_char) -> cty::c_int;
        pub fn nvalgrind_valgrind_printf_backtrace(message: *const c_char) -> cty::c_int;
    }
}

/// The crippled shims selectable by name on the command line of the `crippled-shims-test`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrippledShim {
    /// `stripped_running_on_valgrind`: Exits, the macro is missing
    StrippedRunningOnValgrind,
    /// `stripped_valgrind_printf`
    StrippedPrintf,
    /// `stripped_valgrind_printf_backtrace`
    StrippedPrintfBacktrace,
    /// `nvalgrind_running_on_valgrind`: Always `0` with `NVALGRIND`
    NvalgrindRunningOnValgrind,
    /// `nvalgrind_valgrind_printf`: Exits, the function is missing
    NvalgrindPrintf,
    /// `nvalgrind_valgrind_printf_backtrace`: Exits, the function is missing
    NvalgrindPrintfBacktrace,
}

impl CrippledShim {
    /// The shim with the C symbol `name` or `None` if there is no such shim
    pub fn from_name(name: &str) -> Option<Self> {
        let shim = match name {
            "stripped_running_on_valgrind" => Self::StrippedRunningOnValgrind,
            "stripped_valgrind_printf" => Self::StrippedPrintf,
            "stripped_valgrind_printf_backtrace" => Self::StrippedPrintfBacktrace,
            "nvalgrind_running_on_valgrind" => Self::NvalgrindRunningOnValgrind,
            "nvalgrind_valgrind_printf" => Self::NvalgrindPrintf,
            "nvalgrind_valgrind_printf_backtrace" => Self::NvalgrindPrintfBacktrace,
            _ => return None,
        };
        Some(shim)
    }

    /// Call the shim and return its result
    ///
    /// The print shims print the `message`. Returns only if the macro behind the shim was
    /// available when compiling it.
    pub fn call(self, message: &CStr) -> usize {
        let ptr = message.as_ptr();
        // SAFETY: The shims either run the magic sequence of valgrind or exit the process
        unsafe {
            match self {
                Self::StrippedRunningOnValgrind => crippled::stripped_running_on_valgrind(),
                Self::StrippedPrintf => to_usize(crippled::stripped_valgrind_printf(ptr)),
                Self::StrippedPrintfBacktrace => {
                    to_usize(crippled::stripped_valgrind_printf_backtrace(ptr))
                }
                Self::NvalgrindRunningOnValgrind => crippled::nvalgrind_running_on_valgrind(),
                Self::NvalgrindPrintf => to_usize(crippled::nvalgrind_valgrind_printf(ptr)),
                Self::NvalgrindPrintfBacktrace => {
                    to_usize(crippled::nvalgrind_valgrind_printf_backtrace(ptr))
                }
            }
        }
    }
}

fn to_usize(count: cty::c_int) -> usize {
    usize::try_from(count).unwrap_or_default()
}

/// Convert the result of a client request into an exit code
pub fn exit_code(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
