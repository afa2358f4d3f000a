use std::ffi::CString;

use client_request_tests::{exit_code, CrippledShim, MARKER};
use valgrind_bridge::valgrind_println;

fn main() {
    let name = std::env::args()
        .nth(1)
        .expect("The name of the shim should be the first argument");
    let shim = CrippledShim::from_name(&name)
        .unwrap_or_else(|| panic!("'{name}' should be a known crippled shim"));

    valgrind_println!("{MARKER}").unwrap();

    let message = CString::new("crippled\n").unwrap();
    let result = shim.call(&message);
    println!("{name}: {result}");

    std::process::exit(exit_code(
        valgrind_bridge::valgrind::running_on_valgrind(),
    ));
}
