// spell-checker: ignore iquote constified

use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use bindgen::{builder, Bindings};
use regex::Regex;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

const INCLUDE_ENV: &str = "VALGRIND_BRIDGE_VALGRIND_INCLUDE";
const CROSS_TARGET_ENV: &str = "VALGRIND_BRIDGE_CROSS_TARGET";
const SYSTEM_INCLUDE_DIRS: [&str; 3] = [
    "/usr/include",
    "/usr/local/include",
    "/opt/homebrew/include",
];

#[derive(Debug)]
struct Target {
    arch: String,
    env: String,
    os: String,
    vendor: String,
}

#[derive(Debug, Clone, Copy, IntoStaticStr)]
enum Support {
    #[strum(serialize = "x86_64")]
    X86_64,
    #[strum(serialize = "x86")]
    X86,
    #[strum(serialize = "aarch64")]
    Aarch64,
    #[strum(serialize = "native")]
    Native,
    #[strum(serialize = "no")]
    No,
}

/// The header macros backing the named shims in `valgrind/shims.c`
#[derive(Debug, Clone, Copy, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
enum ShimMacro {
    RunningOnValgrind,
    ValgrindPrintf,
    ValgrindPrintfBacktrace,
}

impl Target {
    fn from_env() -> Self {
        Self {
            arch: std::env::var("CARGO_CFG_TARGET_ARCH").unwrap(),
            env: std::env::var("CARGO_CFG_TARGET_ENV").unwrap(),
            os: std::env::var("CARGO_CFG_TARGET_OS").unwrap(),
            vendor: std::env::var("CARGO_CFG_TARGET_VENDOR").unwrap(),
        }
    }

    fn is_x86_family_os(&self) -> bool {
        self.os == "linux"
            || self.os == "freebsd"
            || (self.vendor == "apple" && self.os == "darwin")
            || (self.os == "windows" && self.env == "gnu")
            || ((self.vendor == "sun" || self.vendor == "pc") && self.os == "solaris")
    }
}

fn print_client_requests_support(support: Support) {
    println!(
        "cargo:rustc-cfg=client_requests_support=\"{}\"",
        <&'static str>::from(support)
    );
}

fn has_valgrind_header(dir: &Path) -> bool {
    dir.join("valgrind").join("valgrind.h").is_file()
}

fn find_include_dir() -> PathBuf {
    if let Ok(env) = std::env::var(INCLUDE_ENV) {
        let path = PathBuf::from(env);
        assert!(
            has_valgrind_header(&path),
            "{INCLUDE_ENV}={}: No 'valgrind/valgrind.h' found in this directory",
            path.display()
        );
        return path;
    }

    if let Ok(env) = std::env::var(CROSS_TARGET_ENV) {
        let path = PathBuf::from("/valgrind/target/valgrind")
            .join(env)
            .join("include");
        if has_valgrind_header(&path) {
            return path;
        }
    }

    SYSTEM_INCLUDE_DIRS
        .iter()
        .map(PathBuf::from)
        .find(|dir| has_valgrind_header(dir))
        .unwrap_or_else(|| {
            panic!(
                "Unable to find the valgrind headers. Please install valgrind or point the \
                 environment variable {INCLUDE_ENV} to the directory containing \
                 'valgrind/valgrind.h'"
            )
        })
}

fn build_native(include: &Path) {
    cc::Build::new()
        .include(include)
        .include("valgrind")
        .debug(true)
        .file("valgrind/native.c")
        .file("valgrind/shims.c")
        .compile("valgrind_bridge");
}

fn build_bindings(include: &Path) -> Bindings {
    let bindings = builder()
        .clang_arg(format!("-iquote{}", include.display()))
        .clang_arg("-iquotevalgrind")
        .header("valgrind/wrapper.h")
        .allowlist_var("__VALGRIND_MAJOR__")
        .allowlist_var("__VALGRIND_MINOR__")
        .allowlist_var("VB_PLATFORM_SUPPORTED")
        .allowlist_var("VB_HAS_.*")
        .allowlist_type("VB_.*ClientRequest")
        .constified_enum_module("VB_.*ClientRequest")
        .layout_tests(false)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .generate()
        .expect("Generating bindings should succeed");

    let out_dir = std::env::var("OUT_DIR").map(PathBuf::from).unwrap();
    bindings
        .write_to_file(out_dir.join("bindings.rs"))
        .expect("Writing bindings should succeed");
    bindings
}

/// Extract the value of an integer constant `name` from the generated bindings
fn find_constant(bindings: &str, name: &str) -> Option<u32> {
    let re = Regex::new(&format!(
        r"pub const {name}\s*:\s*u32\s*=\s*(?<value>[0-9]+)\s*;"
    ))
    .expect("Regex should compile");
    let reader = BufReader::new(Cursor::new(bindings));
    reader.lines().map(Result::unwrap).find_map(|line| {
        re.captures(&line)
            .and_then(|caps| caps.name("value").unwrap().as_str().parse().ok())
    })
}

fn report_missing_macros(bindings: &str) {
    let major = find_constant(bindings, "__VALGRIND_MAJOR__").unwrap_or_default();
    let minor = find_constant(bindings, "__VALGRIND_MINOR__").unwrap_or_default();
    for shim in ShimMacro::iter() {
        let name: &'static str = shim.into();
        if find_constant(bindings, &format!("VB_HAS_{name}")) != Some(1) {
            println!(
                "cargo:warning=The valgrind.h header ({major}.{minor}) does not provide {name}. \
                 Calls to the corresponding shim fail."
            );
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=valgrind/bridge.h");
    println!("cargo:rerun-if-changed=valgrind/wrapper.h");
    println!("cargo:rerun-if-changed=valgrind/native.c");
    println!("cargo:rerun-if-changed=valgrind/shims.c");
    println!("cargo:rerun-if-env-changed={INCLUDE_ENV}");
    println!("cargo:rerun-if-env-changed={CROSS_TARGET_ENV}");

    let include = find_include_dir();
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map(PathBuf::from).unwrap();

    // Picked up by the build scripts of dependents as `DEP_VALGRIND_BRIDGE_INCLUDE` and
    // `DEP_VALGRIND_BRIDGE_ROOT`
    println!("cargo:include={}", include.display());
    println!("cargo:root={}", manifest_dir.join("valgrind").display());

    let bindings = build_bindings(&include).to_string();
    report_missing_macros(&bindings);

    let target = Target::from_env();
    let support = if target.arch == "x86_64" && target.is_x86_family_os() {
        Some(Support::X86_64)
    } else if target.arch == "x86" && target.is_x86_family_os() {
        Some(Support::X86)
    } else if target.arch == "aarch64" && target.os == "linux" && target.env == "gnu" {
        Some(Support::Aarch64)
    } else {
        match find_constant(&bindings, "VB_PLATFORM_SUPPORTED") {
            Some(0) => Some(Support::No),
            Some(1) => Some(Support::Native),
            _ => None,
        }
    };

    match support {
        Some(Support::No) => print_client_requests_support(Support::No),
        Some(support) => {
            print_client_requests_support(support);
            build_native(&include);
        }
        None => {
            eprintln!("{bindings}");
            panic!("Unable to set cfg value for client_requests_support");
        }
    }
}
