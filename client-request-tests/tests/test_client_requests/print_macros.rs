use predicates::prelude::*;
use predicates::str::contains;

use crate::common;

#[test]
fn test_print_macros_when_running_native() {
    let mut cmd = common::get_test_bin_command("print-macros-test");
    cmd.assert().code(0).stdout("").stderr("");
}

#[test]
fn test_print_macros_when_running_on_valgrind() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) = common::get_valgrind_wrapper_command("none", "print-macros-test", "");
    cmd.assert()
        .code(1)
        .stdout("")
        .stderr(contains("printf: foo\n"))
        .stderr(contains("printf unchecked: foo\n"))
        .stderr(contains("println: foo\n"))
        .stderr(contains("println unchecked: foo\n"))
        .stderr(contains("printf backtrace: foo\n"))
        .stderr(contains("println backtrace unchecked: foo\n"))
        .stderr(contains("INV").not());
    drop(sandbox);
}
