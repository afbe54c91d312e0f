//! Positive line quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one; a line with nothing in it is removed instead.
    #[error("quantity must be at least 1")]
    Zero,
}

/// The number of units of one product in a cart line.
///
/// ## Constraints
///
/// - Always at least 1. Removing a product deletes its line rather than
///   storing a zero quantity.
///
/// ## Examples
///
/// ```
/// use techstore_core::Quantity;
///
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
/// assert!(Quantity::new(0).is_err());
///
/// // Loose form-field parsing falls back to one
/// assert_eq!(Quantity::parse_or_one("2 items").get(), 2);
/// assert_eq!(Quantity::parse_or_one("").get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] if `value` is zero.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        match NonZeroU32::new(value) {
            Some(v) => Ok(Self(v)),
            None => Err(QuantityError::Zero),
        }
    }

    /// Parse the leading integer of a loosely formatted value.
    ///
    /// Leading whitespace and a `+` sign are accepted and anything after the
    /// digits is ignored. Falls back to one when no positive integer is found.
    #[must_use]
    pub fn parse_or_one(s: &str) -> Self {
        let s = s.trim_start();
        let s = s.strip_prefix('+').unwrap_or(s);
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

        s.get(..end)
            .and_then(|digits| digits.parse::<u32>().ok())
            .and_then(|n| Self::new(n).ok())
            .unwrap_or(Self::ONE)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
