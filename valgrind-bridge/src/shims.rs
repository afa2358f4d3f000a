//! The named shims of the C bridge
//!
//! The C functions `running_on_valgrind`, `valgrind_printf` and `valgrind_printf_backtrace` wrap
//! the macros (or functions) of the same name in `valgrind.h`. If the installed `valgrind.h` does
//! not define such a macro, the C function prints an error and exits the process when called.
//!
//! The functions in this module know at build time which macros are available and return a
//! [`ClientRequestError::Unavailable`] instead of calling into an exiting C function.

use std::ffi::CStr;

use log::debug;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::{bindings, native_bindings, ClientRequestError};

/// The macros of `valgrind.h` behind the named shims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Shim {
    /// `RUNNING_ON_VALGRIND` behind [`running_on_valgrind`]
    RunningOnValgrind,
    /// `VALGRIND_PRINTF` behind [`printf`]
    ValgrindPrintf,
    /// `VALGRIND_PRINTF_BACKTRACE` behind [`printf_backtrace`]
    ValgrindPrintfBacktrace,
}

impl Shim {
    /// Return true if the macro was defined in the `valgrind.h` header the bridge was compiled
    /// against
    pub const fn is_available(self) -> bool {
        match self {
            Self::RunningOnValgrind => bindings::VB_HAS_RUNNING_ON_VALGRIND == 1,
            Self::ValgrindPrintf => bindings::VB_HAS_VALGRIND_PRINTF == 1,
            Self::ValgrindPrintfBacktrace => bindings::VB_HAS_VALGRIND_PRINTF_BACKTRACE == 1,
        }
    }

    /// The name of the macro in `valgrind.h`
    pub fn macro_name(self) -> &'static str {
        self.into()
    }

    fn check(self) -> Result<(), ClientRequestError> {
        if self.is_available() {
            Ok(())
        } else {
            let (major, minor) = header_version();
            debug!(
                "Refusing to call the {self} shim: Not available in valgrind.h {major}.{minor}"
            );
            Err(ClientRequestError::Unavailable(self, major, minor))
        }
    }
}

/// The `(major, minor)` version of the `valgrind.h` header the bridge was compiled against
pub const fn header_version() -> (u32, u32) {
    (bindings::__VALGRIND_MAJOR__, bindings::__VALGRIND_MINOR__)
}

/// Returns the number of Valgrinds this code is running under
///
/// That is, 0 if running natively, 1 if running under Valgrind, 2 if running under Valgrind which
/// is running under another Valgrind, etc. Compare against `0` to get a boolean.
///
/// # Examples
///
/// ```rust
/// let is_native = valgrind_bridge::shims::running_on_valgrind().unwrap() == 0;
/// # assert!(is_native);
/// ```
pub fn running_on_valgrind() -> Result<usize, ClientRequestError> {
    Shim::RunningOnValgrind.check()?;
    // SAFETY: The shim only executes the `RUNNING_ON_VALGRIND` magic sequence
    Ok(unsafe { native_bindings::running_on_valgrind() })
}

/// Print the `message` to the valgrind log and return the number of bytes written
///
/// The `message` is printed literally. Format specifiers like `%s` have no special meaning. When
/// not running under valgrind, nothing is printed and `0` is returned.
pub fn printf<T>(message: T) -> Result<cty::c_int, ClientRequestError>
where
    T: AsRef<CStr>,
{
    Shim::ValgrindPrintf.check()?;
    // SAFETY: The `CStr` is a valid nul-terminated string which outlives the call and the shim
    // doesn't retain the pointer
    Ok(unsafe { native_bindings::valgrind_printf(message.as_ref().as_ptr()) })
}

/// Like [`printf`] but valgrind appends a stack backtrace of the calling thread
pub fn printf_backtrace<T>(message: T) -> Result<cty::c_int, ClientRequestError>
where
    T: AsRef<CStr>,
{
    Shim::ValgrindPrintfBacktrace.check()?;
    // SAFETY: See `printf`
    Ok(unsafe { native_bindings::valgrind_printf_backtrace(message.as_ref().as_ptr()) })
}
