//! # Money Module
//!
//! Two monetary types:
//!
//! - [`Money`]: prices and change, whole cents
//! - [`Amount`]: what the customer typed at the payment prompt, kept to
//!   sub-cent precision until change is computed
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    2.00 - 1.80 = 0.19999999999999996  ❌ needs rounding to show $0.20  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    Money:  200 cents - 180 cents = 20 cents        ✅ exact             │
//! │    Amount: 10^-12 dollar units, rounded to cents once, half to even    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::money::{Amount, Money};
//!
//! let price = Money::from_cents(150);          // $1.50
//! let paid: Amount = "1.999".parse().unwrap(); // typed by the customer
//! assert_eq!((paid - price).round_to_cents().to_string(), "$0.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative change is representable, prices are checked
///   to be non-negative when a catalog is built
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serializes as the bare integer cent count
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let price = Money::from_cents(170); // Represents $1.70
    /// assert_eq!(price.cents(), 170);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(180).dollars(), 1);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Display shows money the way the machine prints it: `$1.50`, `-$0.25`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Amount Type
// =============================================================================

/// Fractional dollar digits an [`Amount`] keeps.
pub const AMOUNT_SCALE: u32 = 12;

/// Amount units in one cent: 10^(AMOUNT_SCALE - 2).
const UNITS_PER_CENT: i128 = 10_000_000_000;

/// Largest magnitude whose cents still fit in an i64.
const MAX_UNITS: i128 = i64::MAX as i128 * UNITS_PER_CENT;

/// A tendered amount, in units of 10^-12 dollars.
///
/// Customers can type more digits than a cent (`1.999`). Those digits take
/// part in the funds comparison and in the change calculation, and are
/// rounded away only when the change is turned back into [`Money`].
///
/// Serializes as its decimal text (`"1.999"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount {
    units: i128,
}

impl Amount {
    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.units < 0
    }

    /// Rounds to whole cents, ties to even.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Amount;
    ///
    /// let round = |text: &str| text.parse::<Amount>().unwrap().round_to_cents().cents();
    /// assert_eq!(round("0.499"), 50);
    /// assert_eq!(round("0.005"), 0);
    /// assert_eq!(round("0.015"), 2);
    /// ```
    pub fn round_to_cents(self) -> Money {
        let quotient = self.units.div_euclid(UNITS_PER_CENT);
        let remainder = self.units.rem_euclid(UNITS_PER_CENT);
        let half = UNITS_PER_CENT / 2;

        let cents = if remainder > half || (remainder == half && quotient % 2 != 0) {
            quotient + 1
        } else {
            quotient
        };

        let cents = cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Money::from_cents(cents as i64)
    }
}

impl From<Money> for Amount {
    fn from(money: Money) -> Self {
        Amount {
            units: i128::from(money.cents()) * UNITS_PER_CENT,
        }
    }
}

/// `amount - price`, still at full precision.
impl Sub<Money> for Amount {
    type Output = Amount;

    #[inline]
    fn sub(self, price: Money) -> Amount {
        Amount {
            units: self.units - Amount::from(price).units,
        }
    }
}

/// Plain decimal, at least two fractional digits: `2.00`, `1.999`, `-5.00`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();
        let per_dollar = 10u128.pow(AMOUNT_SCALE);

        let fraction = format!(
            "{:0width$}",
            magnitude % per_dollar,
            width = AMOUNT_SCALE as usize
        );
        let fraction = fraction.trim_end_matches('0');
        write!(f, "{}{}.{:0<2}", sign, magnitude / per_dollar, fraction)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = ParseAmountError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why a piece of text is not an amount of money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    /// Nothing but whitespace, a sign or a lone decimal point.
    #[error("no digits in amount")]
    Empty,

    /// Anything outside the decimal grammar, including `inf` and `nan`.
    #[error("invalid character in amount")]
    InvalidDigit,

    /// Does not fit in an i64 number of cents.
    #[error("amount is too large")]
    Overflow,
}

/// Parses a decimal amount such as `"1.50"`, `"2"`, `".75"`, `"1e2"` or `"-1.00"`.
///
/// ## Grammar
/// ```text
/// amount   := ws? sign? mantissa exponent? ws?
/// sign     := "+" | "-"
/// mantissa := digits? ( "." digits? )?     (at least one digit)
/// exponent := ( "e" | "E" ) sign? digits
/// digits   := digit ( "_"? digit )*
/// ```
///
/// `inf`, `nan`, thousands separators and currency symbols are rejected.
/// Digits below 10^-12 dollars are dropped.
///
/// ## Example
/// ```rust
/// use vending_core::money::{Amount, Money};
///
/// assert_eq!("1.5".parse::<Amount>().unwrap(), Amount::from(Money::from_cents(150)));
/// assert_eq!("1e2".parse::<Amount>().unwrap(), Amount::from(Money::from_cents(10_000)));
/// assert!("nan".parse::<Amount>().is_err());
/// ```
impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = split_sign(s.trim());

        let (mantissa, exponent) = match body.split_once(|c: char| c == 'e' || c == 'E') {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (body, None),
        };

        let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        let whole = digit_run(whole)?;
        let frac = digit_run(frac)?;

        let exponent = match exponent {
            Some(text) => parse_exponent(text)?,
            None => 0,
        };

        // value = digits * 10^(exponent - frac.len()), held at AMOUNT_SCALE
        let digits = format!("{whole}{frac}");
        let frac_len = i64::try_from(frac.len()).map_err(|_| ParseAmountError::Overflow)?;
        let shift = i64::from(AMOUNT_SCALE)
            .saturating_add(exponent)
            .saturating_sub(frac_len);

        let units = if shift >= 0 {
            let value = accumulate(&digits)?;
            if value == 0 {
                0
            } else {
                u32::try_from(shift)
                    .ok()
                    .and_then(|shift| 10i128.checked_pow(shift))
                    .and_then(|factor| value.checked_mul(factor))
                    .ok_or(ParseAmountError::Overflow)?
            }
        } else {
            let dropped = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
            accumulate(&digits[..digits.len().saturating_sub(dropped)])?
        };

        if units > MAX_UNITS {
            return Err(ParseAmountError::Overflow);
        }

        Ok(Amount {
            units: if negative { -units } else { units },
        })
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// ASCII digits with single underscores between them; returns the digits.
fn digit_run(part: &str) -> Result<String, ParseAmountError> {
    let bytes = part.as_bytes();
    let mut digits = String::with_capacity(bytes.len());

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => digits.push(char::from(b)),
            b'_' if i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {}
            _ => return Err(ParseAmountError::InvalidDigit),
        }
    }

    Ok(digits)
}

fn parse_exponent(text: &str) -> Result<i64, ParseAmountError> {
    let (negative, body) = split_sign(text);
    let digits = digit_run(body)?;
    if digits.is_empty() {
        return Err(ParseAmountError::InvalidDigit);
    }

    let value: i64 = digits.parse().map_err(|_| ParseAmountError::Overflow)?;
    Ok(if negative { -value } else { value })
}

fn accumulate(digits: &str) -> Result<i128, ParseAmountError> {
    digits.bytes().try_fold(0i128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(i128::from(b - b'0')))
            .ok_or(ParseAmountError::Overflow)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
