//! Exercise the typed client requests of the tool given as first argument
//!
//! The tool defaults to `memcheck`. Requests of other tools are ignored by valgrind.

use std::ffi::CString;

use client_request_tests::{exit_code, MARKER};
use valgrind_bridge::{callgrind, dhat, memcheck, shims, valgrind, valgrind_println};

fn leak_memory() {
    let leaked = Box::leak(Box::new(vec![1u64, 2, 3]));
    println!("leaked: {}", leaked.len());
}

fn run_memcheck() {
    if shims::header_version() >= (3, 16) {
        let option = CString::new("--leak-check=summary").unwrap();
        valgrind::clo_change(&option);
    }

    let data = vec![0u8; 16];
    let addr = data.as_ptr().cast::<()>();
    println!(
        "check_mem_is_addressable: {}",
        memcheck::check_mem_is_addressable(addr, data.len())
    );
    memcheck::make_mem_undefined(addr, data.len());
    memcheck::make_mem_defined(addr, data.len());
    println!(
        "check_mem_is_defined: {}",
        memcheck::check_mem_is_defined(addr, data.len())
    );

    valgrind::disable_error_reporting();
    valgrind::enable_error_reporting();
    println!("count_errors: {}", valgrind::count_errors());

    let guarded = vec![0u8; 8];
    let guarded_addr = guarded.as_ptr().cast::<()>();
    memcheck::make_mem_noaccess(guarded_addr, guarded.len());
    println!(
        "noaccess detected: {}",
        memcheck::check_mem_is_addressable(guarded_addr, guarded.len()) != 0
    );
    memcheck::make_mem_defined(guarded_addr, guarded.len());
    drop(guarded);

    let code = leak_memory as fn();
    valgrind::discard_translations(code as *const (), 1);
    println!("discard_translations: done");

    let command = CString::new("v.info all_errors").unwrap();
    println!("monitor_command: {}", valgrind::monitor_command(&command));
    let command = CString::new("v.no.such.command").unwrap();
    println!("monitor_command unknown: {}", valgrind::monitor_command(&command));

    leak_memory();
    memcheck::do_leak_check();
    let leaks = memcheck::count_leaks();
    println!(
        "count_leaks: {}",
        leaks.leaked + leaks.dubious + leaks.reachable + leaks.suppressed > 0
    );

    memcheck::do_quick_leak_check();
    let _ = memcheck::count_leaks();
}

fn run_callgrind() {
    callgrind::start_instrumentation();
    callgrind::zero_stats();
    callgrind::toggle_collect();
    callgrind::toggle_collect();
    let reason = CString::new("client-reqs-test").unwrap();
    callgrind::dump_stats_at(&reason);
    callgrind::dump_stats();
    callgrind::stop_instrumentation();
}

fn run_dhat() {
    let data = vec![0u8; 1024];
    dhat::ad_hoc_event(10);
    dhat::histogram_memory(data.as_ptr().cast::<()>());
}

fn main() {
    valgrind_println!("{MARKER}").unwrap();

    let tool = std::env::args().nth(1).unwrap_or_else(|| "memcheck".to_owned());
    match tool.as_str() {
        "memcheck" => run_memcheck(),
        "callgrind" => run_callgrind(),
        "dhat" => run_dhat(),
        tool => panic!("Unsupported tool: {tool}"),
    }

    std::process::exit(exit_code(valgrind::running_on_valgrind()));
}
