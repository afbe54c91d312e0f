//! TechStore Core - Shared cart types.
//!
//! This crate provides the types shared by every TechStore cart component:
//! - `cart` - Cart synchronization library (local store, server sync, actions)
//! - `cli` - Command-line front end for the synchronizer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, quantities, cart lines, snapshots and the quantity stepper

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
