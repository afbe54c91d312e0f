//! Core types for TechStore carts.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod cart;
pub mod id;
pub mod quantity;
pub mod stepper;

pub use cart::{CartLine, CartSnapshot};
pub use id::*;
pub use quantity::{Quantity, QuantityError};
pub use stepper::QuantityStepper;
