//! Error types for evmix

use thiserror::Error;

use crate::types::VariableId;

/// evmix error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same variable id was configured on more than one axis.
    #[error("duplicate mixing variable: {0}")]
    DuplicateVariable(VariableId),

    /// Product of per-axis bin counts does not fit in a category index.
    #[error("category space overflow: product of bin counts over {axes} axes exceeds usize")]
    CategoryOverflow {
        /// Number of configured axes.
        axes: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
