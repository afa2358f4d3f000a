use predicates::prelude::*;
use predicates::str::contains;
use rstest::rstest;

use crate::common;

#[rstest]
#[case::running_on_valgrind("stripped_running_on_valgrind", "RUNNING_ON_VALGRIND")]
#[case::printf("nvalgrind_valgrind_printf", "VALGRIND_PRINTF")]
#[case::printf_backtrace("nvalgrind_valgrind_printf_backtrace", "VALGRIND_PRINTF_BACKTRACE")]
fn test_crippled_shim_when_macro_missing_then_exit_with_error(
    #[case] shim: &str,
    #[case] macro_name: &str,
) {
    let mut cmd = common::get_test_bin_command("crippled-shims-test");
    cmd.arg(shim)
        .assert()
        .failure()
        .stdout("")
        .stderr(contains(format!("ERROR: {macro_name} not defined!")))
        .stderr(contains("Exiting..."));
}

#[rstest]
#[case::stripped_printf("stripped_valgrind_printf")]
#[case::stripped_printf_backtrace("stripped_valgrind_printf_backtrace")]
#[case::nvalgrind_running_on_valgrind("nvalgrind_running_on_valgrind")]
fn test_crippled_shim_when_macro_available_then_default(#[case] shim: &str) {
    let mut cmd = common::get_test_bin_command("crippled-shims-test");
    cmd.arg(shim)
        .assert()
        .code(0)
        .stdout(format!("{shim}: 0\n"))
        .stderr("");
}

#[test]
fn test_crippled_shim_when_running_on_valgrind_then_exit_with_error() {
    skip_if_no_valgrind!();

    let (mut cmd, sandbox) = common::get_valgrind_wrapper_command(
        "none",
        "crippled-shims-test",
        "stripped_running_on_valgrind",
    );
    cmd.assert()
        .failure()
        .stdout(contains("stripped_running_on_valgrind:").not())
        .stderr(contains("ERROR: RUNNING_ON_VALGRIND not defined!"));
    drop(sandbox);
}
