//! Run a test binary under valgrind and filter the valgrind log
//!
//! The stdout of the test binary is forwarded verbatim. From stderr, every line up to and
//! including the [`MARKER`] line is discarded and the `==<pid>==` prefix is stripped from the
//! remaining lines.
//! Exits with the exit code of valgrind.

use std::io::{stderr, stdout, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_request_tests::MARKER;
use colored::{control, Colorize};
use env_logger::Env;
use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;

lazy_static! {
    static ref STRIP_PREFIX_RE: Regex =
        Regex::new(r"^\s*(==|--)([0-9:.]+\s+)?[0-9]+(==|--)\s?(?<rest>.*)$")
            .expect("Regex should compile");
}

/// Arguments split like a shell would do
#[derive(Debug, Clone, Default)]
struct ShellArgs(Vec<String>);

#[derive(Parser, Debug)]
#[clap(
    about = "Run a client request test binary under valgrind",
    long_about = None,
)]
struct Args {
    /// The valgrind tool
    #[clap(long = "tool", default_value = "memcheck")]
    tool: String,

    /// The arguments for valgrind
    #[clap(long = "valgrind-args", default_value = "", value_parser = parse_shell_args)]
    valgrind_args: ShellArgs,

    /// The test binary. Relative paths are resolved against the directory of this executable
    #[clap(long = "bin")]
    bin: PathBuf,

    /// The arguments for the test binary
    #[clap(long = "bin-args", default_value = "", value_parser = parse_shell_args)]
    bin_args: ShellArgs,
}

fn parse_shell_args(value: &str) -> Result<ShellArgs, String> {
    shlex::split(value)
        .map(ShellArgs)
        .ok_or_else(|| format!("Failed to split arguments: '{value}'"))
}

fn filter_stderr(bytes: &[u8], writer: &mut impl Write) -> Result<()> {
    let mut found_marker = false;
    for line in BufReader::new(bytes).lines() {
        let line = line.context("Reading the valgrind output should succeed")?;
        if !found_marker {
            found_marker = line.contains(MARKER);
            continue;
        }
        let rest = STRIP_PREFIX_RE
            .captures(&line)
            .and_then(|caps| caps.name("rest"))
            .map_or(line.as_str(), |rest| rest.as_str());
        writeln!(writer, "{rest}")?;
    }
    Ok(())
}

fn run() -> Result<i32> {
    let args = Args::parse();
    let bin = if args.bin.is_absolute() {
        args.bin
    } else {
        std::env::current_exe()
            .context("The path to the valgrind-wrapper should be resolvable")?
            .parent()
            .ok_or_else(|| anyhow!("The valgrind-wrapper should be located in a directory"))?
            .join(args.bin)
    };

    debug!(
        "Running: valgrind --tool={} {:?} {} {:?}",
        args.tool,
        args.valgrind_args.0,
        bin.display(),
        args.bin_args.0
    );
    let output = Command::new("valgrind")
        .arg(format!("--tool={}", args.tool))
        .args(&args.valgrind_args.0)
        .arg(&bin)
        .args(&args.bin_args.0)
        .output()
        .context("Running valgrind should succeed")?;

    stdout().write_all(&output.stdout)?;
    filter_stderr(&output.stderr, &mut stderr())?;

    output
        .status
        .code()
        .ok_or_else(|| anyhow!("Valgrind was terminated by a signal"))
}

fn main() {
    // Configure the colored crate to respect CARGO_TERM_COLOR
    if let Some(var) = option_env!("CARGO_TERM_COLOR") {
        if var == "never" {
            control::set_override(false);
        } else if var == "always" {
            control::set_override(true);
        }
    }

    // Configure the env_logger crate to respect CARGO_TERM_COLOR
    env_logger::Builder::from_env(
        Env::default()
            .default_filter_or("warn")
            .write_style("CARGO_TERM_COLOR"),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "{}: {:<5}: {}",
            record
                .module_path()
                .unwrap_or(record.module_path_static().unwrap_or("???")),
            match record.level() {
                log::Level::Error => "Error".red().bold(),
                log::Level::Warn => "Warn".yellow().bold(),
                log::Level::Info => "Info".green().bold(),
                log::Level::Debug => "Debug".blue().bold(),
                log::Level::Trace => "Trace".cyan().bold(),
            },
            record.args()
        )
    })
    .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error!("{error:#}");
            std::process::exit(1);
        }
    }
}
