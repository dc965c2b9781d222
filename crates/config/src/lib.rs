//! Configuration management for the development toolchain
//!
//! This crate parses and validates the document naming local network
//! profiles and compiler version pins, and exposes them for lookup by name.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
