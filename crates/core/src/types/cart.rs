//! Cart lines and snapshots.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::quantity::Quantity;

/// One product and how many units of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: Quantity) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// The full set of product/quantity lines of a cart at a point in time.
///
/// Lines keep insertion order, and at most one line exists per product.
/// Building a snapshot from lines that repeat a product (including
/// deserializing one) folds the repeats into the first line, summing their
/// quantities.
///
/// Serialized as a plain JSON array:
///
/// ```
/// use techstore_core::{CartSnapshot, ProductId, Quantity};
///
/// let mut cart = CartSnapshot::new();
/// cart.add(ProductId::new(42), Quantity::new(2).unwrap());
///
/// let json = serde_json::to_string(&cart).unwrap();
/// assert_eq!(json, r#"[{"product_id":42,"quantity":2}]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of the quantities of every line.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Quantity held for a product, if it is in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<Quantity> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }

    /// Add units of a product, appending a line if the product is new.
    pub fn add(&mut self, product_id: ProductId, quantity: Quantity) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine::new(product_id, quantity)),
        }
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Set a product's quantity exactly. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        let Ok(quantity) = Quantity::new(quantity) else {
            self.remove(product_id);
            return;
        };

        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine::new(product_id, quantity)),
        }
    }

    /// Consume the snapshot and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }
}

impl FromIterator<CartLine> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for line in iter {
            snapshot.add(line.product_id, line.quantity);
        }
        snapshot
    }
}

impl From<Vec<CartLine>> for CartSnapshot {
    fn from(lines: Vec<CartLine>) -> Self {
        lines.into_iter().collect()
    }
}

impl From<CartSnapshot> for Vec<CartLine> {
    fn from(snapshot: CartSnapshot) -> Self {
        snapshot.lines
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
