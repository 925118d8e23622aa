//! # evmix-core
//!
//! Core types, traits, and error handling for evmix.
//!
//! This crate provides:
//! - Common error types
//! - The per-event values accessor ([`VariableValues`])
//! - Shared identifiers for variables and categories

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::VariableValues;
pub use types::{Category, NO_CATEGORY, VariableId, category_or_sentinel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
