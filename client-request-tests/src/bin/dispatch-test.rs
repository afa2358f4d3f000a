use std::collections::BTreeMap;

use client_request_tests::{exit_code, MARKER};
use valgrind_bridge::{valgrind_println, ClientRequest};

const THREADS: usize = 4;
const CALLS: usize = 50;

// `RUNNING_ON_VALGRIND` in `valgrind.h`
const RUNNING_ON_VALGRIND: cty::c_uint = 0x1001;
// A request code of the tool base 'X','X' which no tool handles
const UNKNOWN_REQUEST: cty::c_uint = 0x5858_0000;

fn count(results: impl Iterator<Item = usize>) -> BTreeMap<usize, usize> {
    results.fold(BTreeMap::new(), |mut acc, result| {
        *acc.entry(result).or_default() += 1;
        acc
    })
}

fn main() {
    valgrind_println!("{MARKER}").unwrap();

    let identity = ClientRequest::new(0).with_default(0x1234);
    println!("identity: {:#x}", identity.dispatch());
    println!("identity native: {:#x}", identity.dispatch_native());

    let unknown = ClientRequest::new(UNKNOWN_REQUEST)
        .with_args([1, 2, 3, 4, 5])
        .with_default(42);
    println!("unknown: {}", unknown.dispatch());
    println!("unknown native: {}", unknown.dispatch_native());

    let running = ClientRequest::new(RUNNING_ON_VALGRIND);
    let serial = count((0..THREADS * CALLS).map(|_| running.dispatch()));
    let concurrent = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    (0..CALLS)
                        .map(|_| running.dispatch_native())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        count(
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap()),
        )
    });
    println!("stateless: {}", serial == concurrent);

    std::process::exit(exit_code(running.dispatch()));
}
