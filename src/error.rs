//! Error types for template rendering.
//!
//! Uses thiserror for derive macros. Malformed template markup is never an
//! error: unmatched tags are tolerated and left in place, so the only
//! failure modes are a computed binding raising under the strict policy and
//! handing non-mapping data to the bindings constructors.

use thiserror::Error;

/// Main error type for rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A computed binding failed and the strict policy was in effect.
    #[error("computed binding '{name}' failed: {source}")]
    Computed {
        /// Qualified tag name of the failing binding.
        name: String,
        /// The failure reported by the caller-supplied function.
        #[source]
        source: anyhow::Error,
    },

    /// Bindings were built from data whose top level is not a mapping.
    #[error("bindings must be a mapping at the top level, got {found}")]
    NonMappingBindings {
        /// Kind of the offending top-level value.
        found: &'static str,
    },
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
