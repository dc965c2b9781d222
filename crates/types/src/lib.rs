//! Shared types for the toolchain configuration system
//!
//! This crate contains the error taxonomy and the small value types shared
//! between the configuration loader and the command line front end.

pub mod error;
pub mod network;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, Result};
pub use network::NetworkId;
