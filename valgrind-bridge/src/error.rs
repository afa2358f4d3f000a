//! The error type of the client requests which can fail on the Rust side
use core::fmt::Display;
use std::ffi::NulError;

use crate::Shim;

/// The error returned by the named shims and the print macros
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequestError {
    /// The message to print contained a `\0` byte
    InteriorNul(NulError),
    /// The macro of the named shim is not defined in the `valgrind.h` header the bridge was
    /// compiled against
    ///
    /// `Unavailable(shim, valgrind_major_version, valgrind_minor_version)`
    Unavailable(Shim, u32, u32),
}

impl std::error::Error for ClientRequestError {}

impl From<NulError> for ClientRequestError {
    fn from(value: NulError) -> Self {
        Self::InteriorNul(value)
    }
}

impl Display for ClientRequestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InteriorNul(inner) => {
                write!(
                    f,
                    "client requests: print error: {}: '{}'",
                    inner,
                    String::from_utf8_lossy(&inner.clone().into_vec())
                )
            }
            Self::Unavailable(shim, major, minor) => {
                write!(
                    f,
                    "client requests: {shim} not defined! You may need to check your installed \
                     valgrind version having this client request available. The valgrind version \
                     of the valgrind.h header file is {major}.{minor}"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_error_display_interior_nul() {
        let expected = "client requests: print error: nul byte found in provided data at \
                        position: 1: 'f\0o'";
        let error: ClientRequestError = std::ffi::CString::new(b"f\0o".to_vec())
            .unwrap_err()
            .into();
        assert_eq!(expected, error.to_string());
    }

    #[test]
    fn test_client_request_error_display_unavailable() {
        let expected = "client requests: VALGRIND_PRINTF_BACKTRACE not defined! You may need to \
                        check your installed valgrind version having this client request \
                        available. The valgrind version of the valgrind.h header file is 3.14";
        let error = ClientRequestError::Unavailable(Shim::ValgrindPrintfBacktrace, 3, 14);
        assert_eq!(expected, error.to_string());
    }
}
