//! # Domain Types
//!
//! Core domain types used throughout the vending machine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐              ┌─────────────────────┐              │
//! │  │    Product      │  dispense()  │      Receipt        │              │
//! │  │  ─────────────  │ ───────────► │  ─────────────────  │              │
//! │  │  name           │              │  transaction_id     │              │
//! │  │  category       │              │  code, product_name │              │
//! │  │  price (Money)  │              │  price, tendered    │              │
//! │  │  stock (u32)    │              │  change, suggestion │              │
//! │  └─────────────────┘              └─────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::{Amount, Money};

// =============================================================================
// Product
// =============================================================================

/// A product loaded in the machine.
///
/// ## Invariants
/// - `stock` is unsigned and only [`Product::dispense`] writes it
/// - `price` has no setter; it is fixed when the product is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    category: String,
    price: Money,
    stock: u32,
}

impl Product {
    /// Creates a product.
    ///
    /// Field checks (empty name, negative price) happen when the product is
    /// placed in a [`Catalog`](crate::Catalog).
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        Product {
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Menu category, used for grouping and suggestions.
    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Units left.
    #[inline]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// True iff at least one unit is left.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Hands out one unit.
    ///
    /// Returns `true` and decrements the stock by exactly one when a unit is
    /// available; returns `false` and leaves the stock alone otherwise.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::{Money, Product};
    ///
    /// let mut chips = Product::new("Chips", "Snacks", Money::from_cents(130), 1);
    /// assert!(chips.dispense());
    /// assert!(!chips.dispense());
    /// assert_eq!(chips.stock(), 0);
    /// ```
    pub fn dispense(&mut self) -> bool {
        match self.stock.checked_sub(1) {
            Some(remaining) => {
                self.stock = remaining;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Outcome of a successful purchase.
///
/// Mirrors what the customer sees: what was dispensed, the change, and an
/// optional cross-sell suggestion. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Identifies the transaction in logs.
    pub transaction_id: Uuid,
    /// Selection code the customer entered.
    pub code: String,
    pub product_name: String,
    pub price: Money,
    /// Amount the customer inserted, as typed.
    pub tendered: Amount,
    /// `tendered - price`, rounded to the cent.
    pub change: Money,
    /// Another available product in the same category, if any.
    pub suggestion: Option<String>,
    /// When the product was dispensed.
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn water(stock: u32) -> Product {
        Product::new("Water", "Cold Beverages", Money::from_cents(100), stock)
    }

    #[test]
    fn test_accessors() {
        let product = water(15);
        assert_eq!(product.name(), "Water");
        assert_eq!(product.category(), "Cold Beverages");
        assert_eq!(product.price(), Money::from_cents(100));
        assert_eq!(product.stock(), 15);
    }

    #[test]
    fn test_availability_follows_stock() {
        assert!(water(1).is_available());
        assert!(!water(0).is_available());
    }

    #[test]
    fn test_dispense_decrements_by_one() {
        let mut product = water(15);
        assert!(product.dispense());
        assert_eq!(product.stock(), 14);
        assert_eq!(product.price(), Money::from_cents(100));
    }

    #[test]
    fn test_dispense_on_empty_is_noop() {
        let mut product = water(0);
        assert!(!product.dispense());
        assert_eq!(product.stock(), 0);
        assert!(!product.is_available());
    }

    #[test]
    fn test_receipt_serde_round_trip() {
        let receipt = Receipt {
            transaction_id: Uuid::new_v4(),
            code: "1".to_string(),
            product_name: "Coca Cola".to_string(),
            price: Money::from_cents(150),
            tendered: "1.999".parse().unwrap(),
            change: Money::from_cents(50),
            suggestion: Some("Pepsi".to_string()),
            completed_at: Utc::now(),
        };

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["price"], 150);
        assert_eq!(json["tendered"], "1.999");
        assert_eq!(json["change"], 50);

        let back: Receipt = serde_json::from_value(json).unwrap();
        assert_eq!(back, receipt);
        assert_eq!(back.completed_at, receipt.completed_at);
    }

    proptest! {
        /// Property: a product with `n` units dispenses exactly `n` times,
        /// and availability tracks `stock > 0` around every call.
        #[test]
        fn dispenses_exactly_stock_times(stock in 0u32..200) {
            let mut product = water(stock);
            let mut successes = 0u32;

            loop {
                let before = product.stock();
                prop_assert_eq!(product.is_available(), before > 0);

                if !product.dispense() {
                    prop_assert_eq!(product.stock(), before);
                    break;
                }
                successes += 1;
                prop_assert_eq!(product.stock(), before - 1);
                prop_assert_eq!(product.is_available(), product.stock() > 0);
            }

            prop_assert_eq!(successes, stock);
            prop_assert_eq!(product.stock(), 0);
            prop_assert!(!product.dispense());
        }
    }
}
