//! # Catalog Module
//!
//! The fixed, ordered mapping from selection code to [`Product`].
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  entries (Vec, insertion order)        group_by_category()              │
//! │  ───────────────────────────────       ───────────────────────────────  │
//! │   "1"  Coffee    Hot Beverages   ──►   Hot Beverages:  1, 2, 3          │
//! │   "2"  Tea       Hot Beverages         Cold Beverages: 4, 5, 6, 7, 8    │
//! │   "4"  Water     Cold Beverages        Snacks:         9, 10, 11, 12    │
//! │   ...                                                                   │
//! │                                                                         │
//! │  Categories appear in first-seen order; entries keep insertion order.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Vec` is used instead of a hash map so menu and suggestion order are
//! deterministic. Lookups are linear; a machine holds a dozen slots.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{
    validate_category, validate_price, validate_product_name, validate_selection_code,
    ValidationResult,
};

/// Factory load: (code, name, category, price in cents, stock).
const DEFAULT_STOCK: &[(&str, &str, &str, i64, u32)] = &[
    ("1", "Coffee", "Hot Beverages", 150, 10),
    ("2", "Tea", "Hot Beverages", 120, 8),
    ("3", "Hot Chocolate", "Hot Beverages", 170, 7),
    ("4", "Water", "Cold Beverages", 100, 15),
    ("5", "Juice", "Cold Beverages", 150, 10),
    ("6", "Coca Cola", "Cold Beverages", 180, 12),
    ("7", "Rootbeer", "Cold Beverages", 180, 8),
    ("8", "Sprite", "Cold Beverages", 180, 9),
    ("9", "Chips", "Snacks", 130, 5),
    ("10", "Gummies", "Snacks", 120, 6),
    ("11", "Chocolate", "Snacks", 180, 7),
    ("12", "Apple", "Snacks", 100, 10),
];

// =============================================================================
// Catalog Entry
// =============================================================================

/// One slot of the machine: a selection code and the product behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    code: String,
    product: Product,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, product: Product) -> Self {
        CatalogEntry {
            code: code.into(),
            product,
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }
}

/// Entries sharing a category, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub entries: Vec<&'a CatalogEntry>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Selection codes mapped to products, fixed for the life of the machine.
///
/// There is no insert or remove: the only mutation reachable from outside
/// is dispensing through [`Catalog::get_mut`].
///
/// Serializes as the plain list of entries. Deserializing goes through
/// [`Catalog::new`], so a loaded catalog obeys the same rules as a built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, checking every entry.
    ///
    /// ## Errors
    /// - [`ValidationError::Duplicate`] when a code appears twice
    /// - [`ValidationError::Required`] for an empty code, name or category
    /// - [`ValidationError::OutOfRange`] for a negative price
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::{Catalog, CatalogEntry, Money, Product};
    ///
    /// let tea = Product::new("Tea", "Hot Beverages", Money::from_cents(120), 8);
    /// let catalog = Catalog::new(vec![CatalogEntry::new("2", tea.clone())]).unwrap();
    /// assert_eq!(catalog.len(), 1);
    ///
    /// let twice = vec![CatalogEntry::new("2", tea.clone()), CatalogEntry::new("2", tea)];
    /// assert!(Catalog::new(twice).is_err());
    /// ```
    pub fn new(entries: Vec<CatalogEntry>) -> ValidationResult<Self> {
        for (index, entry) in entries.iter().enumerate() {
            validate_selection_code(entry.code())?;
            validate_product_name(entry.product.name())?;
            validate_category(entry.product.category())?;
            validate_price(entry.product.price())?;

            if entries[..index].iter().any(|seen| seen.code == entry.code) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: entry.code.clone(),
                });
            }
        }

        Ok(Catalog { entries })
    }

    /// The twelve-slot factory load: hot beverages, cold beverages, snacks.
    pub fn standard() -> Self {
        let entries = DEFAULT_STOCK
            .iter()
            .map(|&(code, name, category, price_cents, stock)| {
                CatalogEntry::new(
                    code,
                    Product::new(name, category, Money::from_cents(price_cents), stock),
                )
            })
            .collect();

        Catalog { entries }
    }

    /// Looks up a product by selection code.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| &entry.product)
    }

    /// Mutable lookup, used by the machine to dispense.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut Product> {
        self.entries
            .iter_mut()
            .find(|entry| entry.code == code)
            .map(|entry| &mut entry.product)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.iter().map(|entry| &entry.product)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups entries by category.
    ///
    /// Categories come out in the order they are first seen; entries inside
    /// a group keep catalog order.
    pub fn group_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

        for entry in &self.entries {
            let category = entry.product.category();
            match groups.iter_mut().find(|group| group.category == category) {
                Some(group) => group.entries.push(entry),
                None => groups.push(CategoryGroup {
                    category,
                    entries: vec![entry],
                }),
            }
        }

        groups
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl TryFrom<Vec<CatalogEntry>> for Catalog {
    type Error = ValidationError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self, Self::Error> {
        Catalog::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
