//! Compile the shims of `valgrind-bridge` a second time against crippled `valgrind.h` headers
//!
//! The symbols of the `stripped` variant have the prefix `stripped_` and are compiled against a
//! copy of `valgrind.h` without the `RUNNING_ON_VALGRIND` macro. The `nvalgrind` variant has the
//! prefix `nvalgrind_` and is compiled with `NVALGRIND` defined, so the print shims are missing.

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn dep_path(name: &str) -> PathBuf {
    let var = format!("DEP_VALGRIND_BRIDGE_{name}");
    println!("cargo:rerun-if-env-changed={var}");
    env::var_os(&var)
        .map(PathBuf::from)
        .unwrap_or_else(|| panic!("The link metadata '{var}' of valgrind-bridge should be set"))
}

fn write_stripped_header(include: &Path, dest: &Path, macros: &[&str]) {
    let dir = dest.join("valgrind");
    fs::create_dir_all(&dir).expect("Creating the stripped include directory should succeed");

    let mut header = fs::read_to_string(include.join("valgrind/valgrind.h"))
        .expect("Reading the valgrind.h header should succeed");
    header.push('\n');
    for name in macros {
        header.push_str(&format!("#undef {name}\n"));
    }

    File::create(dir.join("valgrind.h"))
        .and_then(|mut file| file.write_all(header.as_bytes()))
        .expect("Writing the stripped valgrind.h header should succeed");
}

fn build_variant(name: &str, root: &Path, includes: &[&Path], nvalgrind: bool) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap()).join(name);
    fs::create_dir_all(&out_dir).expect("Creating the build directory should succeed");

    let mut build = cc::Build::new();
    build
        .out_dir(&out_dir)
        .includes(includes)
        .include(root)
        .define("VB_SHIM_PREFIX", format!("{name}_").as_str())
        .file(root.join("shims.c"));
    if nvalgrind {
        build.define("NVALGRIND", None);
    }
    build.compile(&format!("{name}_shims"));
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let include = dep_path("INCLUDE");
    let root = dep_path("ROOT");
    println!("cargo:rerun-if-changed={}", root.join("shims.c").display());
    println!("cargo:rerun-if-changed={}", root.join("bridge.h").display());

    let stripped = PathBuf::from(env::var("OUT_DIR").unwrap()).join("stripped_include");
    write_stripped_header(&include, &stripped, &["RUNNING_ON_VALGRIND"]);

    build_variant(
        "stripped",
        &root,
        &[stripped.as_path(), include.as_path()],
        false,
    );
    build_variant("nvalgrind", &root, &[include.as_path()], true);
}
