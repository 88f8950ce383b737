//! # Machine Module
//!
//! The vending machine itself: it owns the [`Catalog`] and implements the
//! purchase gates, change calculation, cross-sell suggestion and the menu.
//!
//! ## Purchase Flow Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Console (vending-cli)               Machine (this module)             │
//! │   ─────────────────────               ─────────────────────             │
//! │                                                                         │
//! │   print menu ◄──────────────────────  menu()                            │
//! │   read code  ──────────────────────►  select(code)                      │
//! │                                        ├─ InvalidSelection              │
//! │                                        └─ OutOfStock                    │
//! │   read amount ─► parse_tendered()                                       │
//! │                   └─ MalformedPayment                                   │
//! │              ──────────────────────►  complete_purchase(id, code, paid) │
//! │                                        ├─ InsufficientFunds             │
//! │                                        ├─ DispenseFailure               │
//! │   print receipt ◄─────────────────────└─ Ok(Receipt)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `complete_purchase` mutates, and only after every check passed.

use std::fmt;

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::PurchaseError;
use crate::money::{Amount, Money};
use crate::types::{Product, Receipt};
use crate::{MENU_TITLE, OUT_OF_STOCK_MARKER};

/// A vending machine holding one catalog.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    catalog: Catalog,
}

impl Machine {
    /// Creates a machine around an existing catalog.
    pub fn new(catalog: Catalog) -> Self {
        Machine { catalog }
    }

    /// Read access to the loaded products.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The menu, grouped by category. Render it with `Display`.
    pub fn menu(&self) -> Menu<'_> {
        Menu {
            catalog: &self.catalog,
        }
    }

    /// Change owed for a payment.
    ///
    /// The caller has already checked `amount_paid >= price`. The difference
    /// is taken at full precision and rounded to the cent once, ties to even.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::{Amount, Machine, Money};
    ///
    /// let paid: Amount = "1.999".parse().unwrap();
    /// let change = Machine::compute_change(paid, Money::from_cents(150));
    /// assert_eq!(change, Money::from_cents(50));
    /// ```
    #[inline]
    pub fn compute_change(amount_paid: Amount, price: Money) -> Money {
        (amount_paid - price).round_to_cents()
    }

    /// First other product in the same category that can still be sold.
    ///
    /// "Other" means a different name. Only one suggestion is ever made.
    pub fn suggest_alternate(&self, selected: &Product) -> Option<&str> {
        self.catalog
            .products()
            .find(|candidate| {
                candidate.category() == selected.category()
                    && candidate.name() != selected.name()
                    && candidate.is_available()
            })
            .map(Product::name)
    }

    /// Selection gates: the code must exist and the product must be in stock.
    ///
    /// No side effects.
    pub fn select(&self, code: &str) -> Result<&Product, PurchaseError> {
        let product = self
            .catalog
            .get(code)
            .ok_or_else(|| PurchaseError::InvalidSelection {
                code: code.to_string(),
            })?;

        if !product.is_available() {
            return Err(PurchaseError::OutOfStock {
                name: product.name().to_string(),
            });
        }

        Ok(product)
    }

    /// Payment gate, dispense, change and suggestion.
    ///
    /// Availability is not re-checked here: a product that ran out since
    /// [`Machine::select`] fails at dispensing with
    /// [`PurchaseError::DispenseFailure`]. On any error the catalog is left
    /// untouched.
    ///
    /// `transaction_id` is stamped on the receipt so it matches the id the
    /// caller logged the transaction under.
    pub fn complete_purchase(
        &mut self,
        transaction_id: Uuid,
        code: &str,
        tendered: Amount,
    ) -> Result<Receipt, PurchaseError> {
        let product = self
            .catalog
            .get_mut(code)
            .ok_or_else(|| PurchaseError::InvalidSelection {
                code: code.to_string(),
            })?;

        let price = product.price();
        if tendered < Amount::from(price) {
            return Err(PurchaseError::InsufficientFunds {
                required: price,
                tendered,
            });
        }

        if !product.dispense() {
            return Err(PurchaseError::DispenseFailure {
                name: product.name().to_string(),
            });
        }

        // Reborrow shared: suggestions scan the whole catalog
        let product = product.clone();
        let suggestion = self.suggest_alternate(&product).map(str::to_string);

        Ok(Receipt {
            transaction_id,
            code: code.to_string(),
            product_name: product.name().to_string(),
            price,
            tendered,
            change: Self::compute_change(tendered, price),
            suggestion,
            completed_at: Utc::now(),
        })
    }
}

// =============================================================================
// Menu Rendering
// =============================================================================

/// Borrowed view of the catalog that renders as the customer menu.
///
/// ```text
///
/// --- Vending Machine Menu ---
///
/// Hot Beverages:
///  1: Coffee - $1.50
///  2: Tea - $1.20 (Out of Stock)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Menu<'a> {
    catalog: &'a Catalog,
}

impl fmt::Display for Menu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{MENU_TITLE}")?;

        for group in self.catalog.group_by_category() {
            writeln!(f)?;
            writeln!(f, "{}:", group.category)?;
            for entry in group.entries {
                let product = entry.product();
                write!(f, " {}: {} - {}", entry.code(), product.name(), product.price())?;
                if !product.is_available() {
                    write!(f, " {OUT_OF_STOCK_MARKER}")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
