//! # Vending Machine Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Stock the machine with the factory catalog
//! 4. Run the interactive session on stdin/stdout

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match vending_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vending: {err}");
            ExitCode::FAILURE
        }
    }
}
