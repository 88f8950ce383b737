//! # Vending Console Library
//!
//! Core library for the vending machine console application.
//! This is the main entry point that configures and runs a session.
//!
//! ## Module Organization
//! ```text
//! vending_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Environment configuration
//! ├── session.rs      ◄─── Prompts, transaction state machine, loop
//! └── error.rs        ◄─── Session error type
//! ```

pub mod config;
pub mod error;
pub mod session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vending_core::Machine;

pub use config::{ConfigError, VendingConfig};
pub use error::{SessionError, SessionResult};
pub use session::{Session, Transaction};

/// Runs the vending machine on the terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • VENDING_* environment variables over defaults                     │
/// │                                                                         │
/// │  3. Stock the Machine ────────────────────────────────────────────────► │
/// │     • Factory catalog (12 products, 3 categories)                       │
/// │                                                                         │
/// │  4. Run the Session ──────────────────────────────────────────────────► │
/// │     • stdin / stdout until the customer says goodbye                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> SessionResult<()> {
    init_tracing();

    let config = VendingConfig::from_env()?;
    info!(?config, "Starting vending machine");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(Machine::default(), config, stdin.lock(), stdout.lock());
    session.run_session()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every prompt answer
/// - `RUST_LOG=vending_cli=info` - Show sales and rejected transactions
/// - Default: WARN (quiet during normal use)
///
/// Logs go to stderr so they never mix into the menu on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
