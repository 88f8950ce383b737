//! # Error Types
//!
//! Domain-specific error types for vending-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vending-core errors (this file)                                       │
//! │  ├── PurchaseError    - Why a single transaction ended early           │
//! │  └── ValidationError  - Catalog construction failures                  │
//! │                                                                         │
//! │  vending-cli errors (app crate)                                        │
//! │  ├── ConfigError      - Bad environment values                         │
//! │  └── SessionError     - Console I/O failures                           │
//! │                                                                         │
//! │  Flow: PurchaseError → printed to customer → next loop iteration       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error variants (code, product name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each `PurchaseError` variant's Display IS the customer-facing message

use thiserror::Error;

use crate::money::{Amount, Money};

// =============================================================================
// Purchase Error
// =============================================================================

/// Reasons a purchase transaction stops before (or at) dispensing.
///
/// Every variant is recovered locally: the console prints the message and
/// the session loop moves on. None of them leaves the catalog modified.
///
/// ## Transaction Gates
/// ```text
/// Start ──► MenuShown ──► code known? ──── no ──► InvalidSelection
///                              │
///                              ▼
///                         in stock? ────── no ──► OutOfStock
///                              │
///                              ▼
///                       amount parses? ─── no ──► MalformedPayment
///                              │
///                              ▼
///                      paid >= price? ──── no ──► InsufficientFunds
///                              │
///                              ▼
///                        dispense() ───── false ─► DispenseFailure
///                              │
///                              ▼
///                           Success
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The selection code is not a key of the catalog.
    #[error("Invalid selection. Please try again.")]
    InvalidSelection { code: String },

    /// The product exists but its stock is zero.
    #[error("Sorry, {name} is out of stock.")]
    OutOfStock { name: String },

    /// The payment input could not be read as an amount.
    #[error("Invalid amount entered. Transaction cancelled.")]
    MalformedPayment { input: String },

    /// The tendered amount is below the product price.
    #[error("Insufficient funds. Please insert at least {required}.")]
    InsufficientFunds { required: Money, tendered: Amount },

    /// Dispensing failed even though the product was available at selection.
    ///
    /// ## When This Occurs
    /// - Stock was drained between `select` and `complete_purchase`
    #[error("Sorry, {name} could not be dispensed.")]
    DispenseFailure { name: String },
}

impl PurchaseError {
    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PurchaseError::InvalidSelection { .. } => "invalid_selection",
            PurchaseError::OutOfStock { .. } => "out_of_stock",
            PurchaseError::MalformedPayment { .. } => "malformed_payment",
            PurchaseError::InsufficientFunds { .. } => "insufficient_funds",
            PurchaseError::DispenseFailure { .. } => "dispense_failure",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog, before any transaction can run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., duplicate selection code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
