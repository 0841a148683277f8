//! Alphafolio Core - Shared types library.
//!
//! This crate provides common types used across all Alphafolio components:
//! - `engine` - Subscription selection and checkout engine
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and minor-unit money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
