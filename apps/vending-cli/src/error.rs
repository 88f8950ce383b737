//! # Session Error Type
//!
//! Failures that end the whole session, as opposed to a
//! [`PurchaseError`](vending_core::PurchaseError), which only ends one
//! transaction and is shown to the customer.
//!
//! ```text
//! PurchaseError ──► printed ──► loop continues
//! SessionError  ──► main()  ──► stderr, exit code 1
//! ```
//!
//! End of input is not an error: the session says goodbye and returns `Ok`.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the terminal or writing to it failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type SessionResult<T> = Result<T, SessionError>;
