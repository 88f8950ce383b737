//! # vending-core: Pure Business Logic for the Vending Machine
//!
//! This crate is the **heart** of the vending machine. It holds the catalog,
//! the stock rules and the purchase gates as plain values and functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vending-cli (console)                        │   │
//! │  │    Menu ──► Selection prompt ──► Payment prompt ──► Continue?  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vending-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  machine  │  │   │
//! │  │   │  Product  │  │   Money   │  │  Catalog  │  │  Machine  │  │   │
//! │  │   │  Receipt  │  │  Amount   │  │  grouping │  │  gates    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONSOLE • NO ENVIRONMENT • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Receipt)
//! - [`money`] - Money and Amount types with integer arithmetic (no floating point!)
//! - [`catalog`] - Ordered selection-code → product mapping
//! - [`machine`] - Menu, change, suggestions and the purchase gates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use uuid::Uuid;
//! use vending_core::validation::parse_tendered;
//! use vending_core::Machine;
//!
//! let mut machine = Machine::default();
//! machine.select("4").unwrap();
//!
//! let paid = parse_tendered("2.00").unwrap();
//! let receipt = machine
//!     .complete_purchase(Uuid::new_v4(), "4", paid)
//!     .unwrap();
//!
//! assert_eq!(receipt.product_name, "Water");
//! assert_eq!(receipt.change.to_string(), "$1.00");
//! assert_eq!(receipt.suggestion.as_deref(), Some("Juice"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod machine;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vending_core::Money` instead of
// `use vending_core::money::Money`

pub use catalog::{Catalog, CatalogEntry, CategoryGroup};
pub use error::{PurchaseError, ValidationError};
pub use machine::{Machine, Menu};
pub use money::{Amount, Money, ParseAmountError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Marker appended to menu lines of products with no stock left.
pub const OUT_OF_STOCK_MARKER: &str = "(Out of Stock)";

/// Title line of the rendered menu.
pub const MENU_TITLE: &str = "--- Vending Machine Menu ---";
