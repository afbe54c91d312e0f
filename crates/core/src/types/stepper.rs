//! Bounded quantity picker used next to "add to cart" controls.

use super::quantity::Quantity;

/// A quantity input with increase/decrease buttons.
///
/// The value never drops below one and never rises above `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: Quantity,
    max: Quantity,
}

impl QuantityStepper {
    /// Upper bound used when the input declares none.
    pub const DEFAULT_MAX: u32 = 999;

    /// Create a stepper. A `value` above `max` is clamped down to `max`.
    #[must_use]
    pub fn new(value: Quantity, max: Quantity) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Create a stepper with the default upper bound.
    #[must_use]
    pub fn with_default_max(value: Quantity) -> Self {
        Self::new(value, Self::default_max())
    }

    #[must_use]
    pub const fn value(&self) -> Quantity {
        self.value
    }

    #[must_use]
    pub const fn max(&self) -> Quantity {
        self.max
    }

    /// Step up by one unless already at the bound.
    pub fn increase(&mut self) -> Quantity {
        if self.value < self.max {
            self.value = self.value.saturating_add(Quantity::ONE);
        }
        self.value
    }

    /// Step down by one unless already at one.
    pub fn decrease(&mut self) -> Quantity {
        if let Ok(lower) = Quantity::new(self.value.get() - 1) {
            self.value = lower;
        }
        self.value
    }

    fn default_max() -> Quantity {
        Quantity::new(Self::DEFAULT_MAX).unwrap_or(Quantity::ONE)
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::with_default_max(Quantity::ONE)
    }
}
