//! Shop CLI - Console storefront

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shop_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
