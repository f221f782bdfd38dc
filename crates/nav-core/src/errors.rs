//! Cross-cutting error types for navup.
//!
//! Domain-specific errors (e.g. `UpgradeError`, `ConfigError`) are defined in
//! their respective crates. `nav-cli` converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any navup crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
