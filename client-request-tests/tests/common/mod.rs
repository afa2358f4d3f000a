use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};
use version_compare::Cmp;

pub const VALGRIND_WRAPPER: &str = env!("CARGO_BIN_EXE_valgrind-wrapper");

/// Skip the current test if `valgrind` is not installed
macro_rules! skip_if_no_valgrind {
    () => {
        if !$crate::common::is_valgrind_installed() {
            eprintln!("Skipping test: valgrind is not installed");
            return;
        }
    };
}

fn find_runner() -> Option<String> {
    for (key, value) in std::env::vars() {
        if key.starts_with("CARGO_TARGET_") && key.ends_with("_RUNNER") && !value.is_empty() {
            return Some(value);
        }
    }
    None
}

pub fn is_valgrind_installed() -> bool {
    which::which("valgrind").is_ok()
}

/// The version of the installed valgrind like `3.22.0`
pub fn get_valgrind_version() -> Option<String> {
    let output = StdCommand::new("valgrind").arg("--version").output().ok()?;
    let version = String::from_utf8_lossy(&output.stdout);
    version
        .trim()
        .strip_prefix("valgrind-")
        .map(|v| v.split('.').take(3).collect::<Vec<_>>().join("."))
}

pub fn compare_valgrind_version(cmp: Cmp, expected: &str) -> bool {
    get_valgrind_version().is_some_and(|version| {
        version_compare::compare_to(version, expected, cmp)
            .expect("Valgrind version comparison should succeed")
    })
}

pub fn get_test_bin_path(name: &str) -> PathBuf {
    PathBuf::from(VALGRIND_WRAPPER).parent().unwrap().join(name)
}

pub fn get_command<T>(path: T) -> Command
where
    T: AsRef<Path>,
{
    if let Some(runner) = find_runner() {
        let mut runner = runner.split_whitespace();
        let mut cmd = Command::new(runner.next().unwrap());
        for arg in runner {
            cmd.arg(arg);
        }
        cmd.arg(path.as_ref());
        cmd
    } else {
        Command::new(path.as_ref())
    }
}

pub fn get_test_bin_command<T>(name: T) -> Command
where
    T: AsRef<str>,
{
    get_command(get_test_bin_path(name.as_ref()))
}

/// The `valgrind-wrapper` command running the test binary `bin` under the valgrind `tool`
///
/// The command runs in the returned sandbox directory, so the output files of the tool don't end
/// up in the package directory.
pub fn get_valgrind_wrapper_command(tool: &str, bin: &str, bin_args: &str) -> (Command, TempDir) {
    let mut cmd = Command::new(VALGRIND_WRAPPER);
    cmd.args([
        format!("--tool={tool}"),
        "--valgrind-args=--verbose".to_owned(),
        format!("--bin={}", get_test_bin_path(bin).display()),
        format!("--bin-args={bin_args}"),
    ]);
    let sandbox = get_sandbox();
    cmd.current_dir(&sandbox);
    (cmd, sandbox)
}

pub fn get_sandbox() -> TempDir {
    tempdir().expect("Creating sandbox directory failed")
}
