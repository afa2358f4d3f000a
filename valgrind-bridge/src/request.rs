//! The plain value type for arbitrary client requests

use log::trace;

/// A client request: The request code, up to five arguments and the default return value
///
/// The request code and the arguments are opaque to this type. Their meaning is defined by the
/// valgrind tool handling the request. Without valgrind, or if the tool does not recognize the
/// request code, dispatching a request returns the default value.
///
/// # Examples
///
/// ```rust
/// use valgrind_bridge::ClientRequest;
///
/// let request = ClientRequest::new(0x1234)
///     .with_args([1, 2, 3, 0, 0])
///     .with_default(42);
///
/// assert_eq!(request.args(), [1, 2, 3, 0, 0]);
/// // Natively, the default value is returned
/// assert_eq!(request.dispatch(), 42);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientRequest {
    request: cty::c_uint,
    args: [usize; 5],
    default: usize,
}

impl ClientRequest {
    /// Create a new `ClientRequest` with all arguments and the default value set to `0`
    pub const fn new(request: cty::c_uint) -> Self {
        Self {
            request,
            args: [0; 5],
            default: 0,
        }
    }

    /// Set the value returned when not running under valgrind
    pub const fn with_default(mut self, default: usize) -> Self {
        self.default = default;
        self
    }

    /// Set all five arguments at once
    pub const fn with_args(mut self, args: [usize; 5]) -> Self {
        self.args = args;
        self
    }

    /// Set the argument at position `index`
    ///
    /// The positions are counted from `1` like the `_zzq_arg1` to `_zzq_arg5` arguments of the
    /// `VALGRIND_DO_CLIENT_REQUEST_EXPR` macro.
    ///
    /// # Panics
    ///
    /// If `index` is not within `1..=5`
    pub fn with_arg(mut self, index: usize, value: usize) -> Self {
        assert!(
            (1..=5).contains(&index),
            "A client request argument index must be in the range 1..=5 but was {index}"
        );
        self.args[index - 1] = value;
        self
    }

    /// The request code
    pub const fn request(&self) -> cty::c_uint {
        self.request
    }

    /// The five arguments
    pub const fn args(&self) -> [usize; 5] {
        self.args
    }

    /// The value returned when not running under valgrind
    pub const fn default_value(&self) -> usize {
        self.default
    }

    /// Perform this client request and return the result
    ///
    /// Uses the inline assembly implementation of the current platform if there is one.
    #[inline(always)]
    pub fn dispatch(&self) -> usize {
        let [arg1, arg2, arg3, arg4, arg5] = self.args;
        crate::arch::valgrind_do_client_request_expr(
            self.default,
            self.request,
            arg1,
            arg2,
            arg3,
            arg4,
            arg5,
        )
    }

    /// Perform this client request with the `valgrind_do_client_request_expr` function of the C
    /// bridge
    ///
    /// The result is the same as with [`ClientRequest::dispatch`] but costs a function call.
    pub fn dispatch_native(&self) -> usize {
        trace!("Dispatching client request with the C bridge: {self:?}");
        let [arg1, arg2, arg3, arg4, arg5] = self.args;
        // SAFETY: The C dispatcher only forwards the values to valgrind. An unknown request code
        // leaves the default value untouched.
        unsafe {
            crate::native_bindings::valgrind_do_client_request_expr(
                self.default,
                self.request as usize,
                arg1,
                arg2,
                arg3,
                arg4,
                arg5,
            )
        }
    }
}

impl From<cty::c_uint> for ClientRequest {
    fn from(request: cty::c_uint) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    // These tests don't run under valgrind, so every request returns its default value

    #[rstest]
    #[case::zero_request(0, 0x1234)]
    #[case::unknown_request(0xffff_ffff, 42)]
    #[case::running_on_valgrind(0x1001, 0)]
    #[case::max_default(0x1001, usize::MAX)]
    fn test_dispatch_returns_default_when_native(
        #[case] request: cty::c_uint,
        #[case] default: usize,
    ) {
        let request = ClientRequest::new(request)
            .with_args([1, 2, 3, 4, 5])
            .with_default(default);
        assert_eq!(request.dispatch(), default);
        assert_eq!(request.dispatch_native(), default);
    }

    #[rstest]
    #[case::first(1, [7, 0, 0, 0, 0])]
    #[case::third(3, [0, 0, 7, 0, 0])]
    #[case::last(5, [0, 0, 0, 0, 7])]
    fn test_with_arg(#[case] index: usize, #[case] expected: [usize; 5]) {
        let request = ClientRequest::new(1).with_arg(index, 7);
        assert_eq!(request.args(), expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::six(6)]
    #[should_panic(expected = "A client request argument index must be in the range 1..=5")]
    fn test_with_arg_when_index_out_of_range_then_panic(#[case] index: usize) {
        let _ = ClientRequest::new(1).with_arg(index, 1);
    }

    #[test]
    fn test_new_and_from() {
        let expected = ClientRequest::new(0x1001);
        assert_eq!(ClientRequest::from(0x1001), expected);
        assert_eq!(expected.request(), 0x1001);
        assert_eq!(expected.args(), [0; 5]);
        assert_eq!(expected.default_value(), 0);
    }

    #[test]
    fn test_dispatch_from_multiple_threads_is_stateless() {
        const THREADS: usize = 8;
        const CALLS: usize = 100;

        let requests: Vec<ClientRequest> = (0..THREADS * CALLS)
            .map(|i| {
                ClientRequest::new(i.try_into().unwrap())
                    .with_args([i, i + 1, i + 2, i + 3, i + 4])
                    .with_default(i * 3)
            })
            .collect();

        let count = |results: &[usize]| {
            results.iter().fold(HashMap::new(), |mut acc, r| {
                *acc.entry(*r).or_insert(0usize) += 1;
                acc
            })
        };

        let serial: Vec<usize> = requests.iter().map(ClientRequest::dispatch).collect();
        let concurrent: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = requests
                .chunks(CALLS)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(ClientRequest::dispatch)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(count(&serial), count(&concurrent));
    }
}
