use predicates::str::contains;

use crate::common;

#[test]
fn test_dispatch_when_running_native() {
    let mut cmd = common::get_test_bin_command("dispatch-test");
    cmd.assert()
        .code(0)
        .stdout(
            "identity: 0x1234\nidentity native: 0x1234\nunknown: 42\nunknown native: \
             42\nstateless: true\n",
        )
        .stderr("");
}

#[test]
fn test_dispatch_when_running_on_valgrind() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) = common::get_valgrind_wrapper_command("memcheck", "dispatch-test", "");
    cmd.assert()
        .code(1)
        .stdout(contains("identity: 0x1234\nidentity native: 0x1234\n"))
        .stdout(contains("unknown: 42\nunknown native: 42\n"))
        .stdout(contains("stateless: true\n"));
    drop(sandbox);
}
