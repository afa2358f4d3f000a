use predicates::prelude::*;
use predicates::str::{contains, is_match};

use crate::common;

#[test]
fn test_shims_when_running_native() {
    let mut cmd = common::get_test_bin_command("shims-test");
    cmd.assert()
        .code(0)
        .stdout("running_on_valgrind: 0\nprintf hello: 0\nprintf: 0\nprintf_backtrace: 0\n")
        .stderr("");
}

#[test]
fn test_shims_when_running_on_valgrind() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) = common::get_valgrind_wrapper_command("memcheck", "shims-test", "");
    cmd.assert()
        .code(1)
        .stdout(contains("running_on_valgrind: 1\n"))
        .stdout(contains("printf hello: 6\n"))
        .stdout(contains("printf: 3\n"))
        .stderr(is_match(r"(?m)^hello$").unwrap())
        .stderr(is_match(r"(?m)^abc$").unwrap())
        .stderr(contains("backtrace: %s"))
        .stderr(is_match(r"(at|by) 0x[0-9A-Fa-f]+").unwrap());
    drop(sandbox);
}

#[test]
fn test_shims_when_running_on_valgrind_then_no_format_specifier_interpretation() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) = common::get_valgrind_wrapper_command("none", "shims-test", "");
    cmd.assert()
        .code(1)
        .stderr(contains("backtrace: %s"))
        .stderr(contains("(null)").not());
    drop(sandbox);
}
