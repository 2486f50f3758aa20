//! Shared test fixtures for AssertForge crates.
//!
//! This crate provides host objects and code samples for testing.
//!
//! - [`staff`] - Host objects with properties, attributes and a type hierarchy
//! - [`code`] - Code values that succeed, return an error or panic
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! assertforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use assertforge_test::staff::{Employee, Manager};
//! use assertforge_test::code::{panicking, returning_error};
//! ```

pub mod code;
pub mod staff;

// Re-export commonly used types at crate root for convenience
pub use code::{panicking, returning_error, succeeding, withdrawing_from_frozen, LedgerError};
pub use staff::{Employee, Manager};
