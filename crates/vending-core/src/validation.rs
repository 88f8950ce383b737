//! # Validation Module
//!
//! Input validation utilities for the vending machine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog construction (startup)                               │
//! │  ├── codes unique and non-empty                                        │
//! │  └── names/categories present, prices non-negative                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Customer input (every transaction)                           │
//! │  ├── payment text → Amount           (parse_tendered)                  │
//! │  └── optional sign check             (validate_tendered_non_negative)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{PurchaseError, ValidationError};
use crate::money::{Amount, Money};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Field Validators
// =============================================================================

/// Validates a selection code.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Must not carry surrounding whitespace (the console matches the typed
///   line exactly, so `" 4"` would collide visually with `"4"`)
pub fn validate_selection_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() || code.trim() != code {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use vending_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Hot Chocolate").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a category label.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Reads the amount a customer typed at the payment prompt.
///
/// Fails with [`PurchaseError::MalformedPayment`] when the text is not a
/// decimal amount (see [`Amount`]'s `FromStr` for the accepted grammar).
/// Negative amounts parse; the funds gate turns them away.
///
/// ## Example
/// ```rust
/// use vending_core::validation::parse_tendered;
/// use vending_core::{Amount, Money, PurchaseError};
///
/// assert_eq!(parse_tendered("2.00"), Ok(Amount::from(Money::from_cents(200))));
/// assert!(matches!(
///     parse_tendered("two dollars"),
///     Err(PurchaseError::MalformedPayment { .. })
/// ));
/// ```
pub fn parse_tendered(input: &str) -> Result<Amount, PurchaseError> {
    input
        .parse::<Amount>()
        .map_err(|_| PurchaseError::MalformedPayment {
            input: input.trim().to_string(),
        })
}

/// Rejects a negative tendered amount as malformed.
///
/// Only applied when the machine is configured to refuse negative payments.
pub fn validate_tendered_non_negative(tendered: Amount) -> Result<Amount, PurchaseError> {
    if tendered.is_negative() {
        return Err(PurchaseError::MalformedPayment {
            input: tendered.to_string(),
        });
    }

    Ok(tendered)
}

// =============================================================================
// Unit Tests
// =============================================================================
