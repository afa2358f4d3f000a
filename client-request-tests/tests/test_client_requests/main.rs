#[macro_use]
#[path = "../common/mod.rs"]
mod common;

mod client_reqs;
mod crippled_shims;
mod dispatch;
mod print_macros;
mod shims;
