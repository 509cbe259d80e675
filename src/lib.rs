//! Weft: an embeddable `{{tag}}` template renderer.
//!
//! Given a template string and a tree of named bindings, `weft` produces
//! output text by substituting values, conditionally including marked
//! sections, expanding repeating sections over sequences, and joining
//! sequences as natural-language lists. It is a rendering routine, not a
//! templating framework: no compilation, no caching, no partials, and no
//! output escaping.
//!
//! # Tag Syntax
//!
//! | Tag | Meaning |
//! |---|---|
//! | `{{key}}` | substitute the scalar value of `key` |
//! | `{{#key}}…{{/key}}` | include contents if `key` displays (truthy / non-empty sequence) |
//! | `{{^key}}…{{/key}}` | include contents if `key` does not display |
//! | `{{&key}}` | substitute sequence `key` as a joined list ("A, B, and C") |
//!
//! Nested contexts are addressed with dotted tag names (`{{user.name}}`);
//! inside a section revealed by its own context, the bare name works too.
//!
//! # Example
//!
//! ```
//! use weft::{render, Context, RenderOptions, Value};
//!
//! let mut user = Context::new();
//! user.insert("name", "Ada");
//! let mut bindings = Context::new();
//! bindings.insert("user", user);
//! bindings.insert("langs", Value::from(vec!["Rust", "Python", "C"]));
//!
//! let out = render(
//!     "{{#user}}Hello {{name}}! You know {{&langs}}.{{/user}}",
//!     &bindings,
//!     &RenderOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "Hello Ada! You know Rust, Python, and C.");
//! ```
//!
//! # Error Tolerance
//!
//! Malformed section markup is never an error: unmatched or mis-ordered
//! tags are left as literal text. Unresolved substitution tags stay in the
//! output unless [`RenderOptions::cleanup`] asks for their delimiters to be
//! stripped. The only fallible path is a computed binding failing under the
//! strict policy.

mod convert;
pub mod error;
mod render;
pub mod scope;
pub mod value;

use tracing::trace;

pub use error::{RenderError, Result};
pub use scope::Scope;
pub use value::{Context, Scalar, Value};

/// What to do when a computed binding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Substitute the empty string and keep rendering.
    #[default]
    Lenient,
    /// Propagate the failure to the caller.
    Strict,
}

/// Per-call rendering options.
///
/// A render call owns its options outright; there is no process-wide
/// state, so concurrent renders with different policies are independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Strip leftover tag delimiters from the final output.
    pub cleanup: bool,
    /// Failure handling for computed bindings.
    pub computed_errors: ErrorPolicy,
}

impl RenderOptions {
    /// Options with defaults: no cleanup, lenient computed failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the cleanup pass.
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Propagate computed-binding failures instead of swallowing them.
    pub fn strict(mut self) -> Self {
        self.computed_errors = ErrorPolicy::Strict;
        self
    }
}

/// Render `template` against `bindings`.
///
/// Runs one full render pass from the top-level scope, then, when
/// `options.cleanup` is set, strips any tag delimiters left by unresolved
/// tags so no raw markup reaches the final output.
///
/// # Errors
///
/// Returns [`RenderError::Computed`] when a computed binding fails and
/// `options.computed_errors` is [`ErrorPolicy::Strict`]; under the default
/// lenient policy the failing value renders as the empty string.
///
/// # Example
///
/// ```
/// use weft::{render, Context, RenderOptions};
///
/// let mut bindings = Context::new();
/// bindings.insert("count", 0);
/// let out = render(
///     "{{#count}}{{count}} items{{/count}}",
///     &bindings,
///     &RenderOptions::default(),
/// )
/// .unwrap();
/// // zero is displayed: a count of 0 is still information
/// assert_eq!(out, "0 items");
/// ```
pub fn render(template: &str, bindings: &Context, options: &RenderOptions) -> Result<String> {
    trace!(
        template_len = template.len(),
        cleanup = options.cleanup,
        "rendering template"
    );
    let scope = Scope::root(bindings);
    let mut rendered = render::render_scope(template, &scope, None, options)?;
    if options.cleanup {
        rendered = render::strip_tag_delimiters(&rendered);
    }
    Ok(rendered)
}
