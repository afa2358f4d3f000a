use predicates::str::contains;
use rstest::rstest;
use version_compare::Cmp;

use crate::common;

fn has_dhat() -> bool {
    valgrind_bridge::shims::header_version() >= (3, 17)
}

#[rstest]
#[case::memcheck("memcheck")]
#[case::callgrind("callgrind")]
#[case::dhat("dhat")]
fn test_client_reqs_when_running_native(#[case] tool: &str) {
    if tool == "dhat" && !has_dhat() {
        return;
    }

    let mut cmd = common::get_test_bin_command("client-reqs-test");
    cmd.arg(tool).assert().code(0).stderr("");
}

#[test]
fn test_memcheck_reqs_when_running_native() {
    let mut cmd = common::get_test_bin_command("client-reqs-test");
    cmd.arg("memcheck")
        .assert()
        .code(0)
        .stdout(
            "check_mem_is_addressable: 0\ncheck_mem_is_defined: 0\ncount_errors: 0\nnoaccess \
             detected: false\ndiscard_translations: done\nmonitor_command: true\nmonitor_command \
             unknown: true\nleaked: 3\ncount_leaks: false\n",
        )
        .stderr("");
}

#[test]
fn test_memcheck_reqs_when_running_on_valgrind() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) =
        common::get_valgrind_wrapper_command("memcheck", "client-reqs-test", "memcheck");
    cmd.assert()
        .code(1)
        .stdout(contains("check_mem_is_addressable: 0\n"))
        .stdout(contains("check_mem_is_defined: 0\n"))
        .stdout(contains("noaccess detected: true\n"))
        .stdout(contains("discard_translations: done\n"))
        .stdout(contains("monitor_command: true\n"))
        .stdout(contains("monitor_command unknown: false\n"))
        .stdout(contains("count_leaks: true\n"))
        .stderr(contains("LEAK SUMMARY"))
        .stderr(contains("Address 0x"));
    drop(sandbox);
}

#[test]
fn test_callgrind_reqs_when_running_on_valgrind() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) =
        common::get_valgrind_wrapper_command("callgrind", "client-reqs-test", "callgrind");
    cmd.assert().code(1).stdout("");
    assert!(
        std::fs::read_dir(sandbox.path())
            .unwrap()
            .filter_map(Result::ok)
            .any(|entry| entry.file_name().to_string_lossy().starts_with("callgrind.out")),
        "Callgrind should have written at least one output file"
    );
}

#[test]
fn test_dhat_reqs_when_running_on_valgrind() {
    skip_if_no_valgrind!();
    if !has_dhat() || !common::compare_valgrind_version(Cmp::Ge, "3.17") {
        return;
    }

    let (mut cmd, sandbox) =
        common::get_valgrind_wrapper_command("dhat", "client-reqs-test", "dhat");
    cmd.assert().code(1).stdout("");
    drop(sandbox);
}
