//! Binding data model for template rendering.
//!
//! Bindings are a tree of [`Value`]s rooted in a [`Context`] (a named map).
//! Tags in a template resolve against this tree by key, with nesting
//! expressed through dotted tag names (`parent.child`).
//!
//! # Value kinds
//!
//! - [`Scalar`] - text, numbers, booleans, or null; substituted directly
//! - `Context` - a nested scope of further bindings
//! - `Sequence` - an ordered list driving repeating sections and list joins
//! - `Computed` - a function evaluated lazily at render time

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::scope::Scope;

/// Reserved key controlling whether a nested context's section renders.
///
/// Absent means shown; when present its display truthiness decides.
pub const DISPLAY_KEY: &str = "_display";

/// Reserved key skipped during rendering.
///
/// Older implementations injected an upward scope reference under this key
/// directly into caller data. This crate uses [`Scope`] chains instead and
/// never writes the key, but data migrated from such implementations may
/// still carry it, so it is ignored rather than rendered.
pub const PARENT_KEY: &str = "_parent";

/// A leaf value, substituted as text and classified for section display.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text, substituted verbatim.
    Text(String),
    /// Integer, substituted in decimal form.
    Int(i64),
    /// Float, substituted via its shortest round-trip form.
    Float(f64),
    /// Boolean, substituted as `true` / `false`.
    Bool(bool),
    /// Absent value, substituted as the empty string.
    Null,
}

impl Scalar {
    /// Classify this scalar for section display.
    ///
    /// Two deliberate quirks differ from conventional truthiness and are
    /// relied upon by templates:
    ///
    /// - numeric zero is displayed (a count of `0` is still information)
    /// - whitespace-only text is hidden even though it is non-empty
    pub fn display_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.trim().is_empty(),
            Scalar::Int(_) | Scalar::Float(_) => true,
            Scalar::Bool(b) => *b,
            Scalar::Null => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => Ok(()),
        }
    }
}

/// Signature of a computed binding.
///
/// Receives the enclosing scope, which can resolve ancestor names through
/// the chain, and returns a concrete scalar. Failures surface according to
/// the per-call [`ErrorPolicy`](crate::ErrorPolicy).
pub type ComputedFn = dyn Fn(&Scope<'_>) -> anyhow::Result<Scalar> + Send + Sync;

/// A bound value: the four kinds a tag can resolve to.
#[derive(Clone)]
pub enum Value {
    /// A leaf value for direct substitution.
    Scalar(Scalar),
    /// A nested scope of bindings.
    Context(Context),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// A lazily evaluated value.
    Computed(Arc<ComputedFn>),
}

impl Value {
    /// Wrap a function as a computed binding.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Scope<'_>) -> anyhow::Result<Scalar> + Send + Sync + 'static,
    {
        Value::Computed(Arc::new(f))
    }

    /// Classify this value for section display.
    ///
    /// Empty contexts and sequences are hidden; computed values are always
    /// shown (they are evaluated, not displayed, at classification time).
    /// Scalars follow [`Scalar::display_truthy`].
    pub fn display_truthy(&self) -> bool {
        match self {
            Value::Scalar(s) => s.display_truthy(),
            Value::Context(c) => !c.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Computed(_) => true,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Value::Context(c) => f.debug_tuple("Context").field(c).finish(),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Value::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A named scope of bindings.
///
/// Keys are unique; iteration is in key order, which keeps rendering
/// deterministic. Tags are matched by name, so iteration order does not
/// affect the final output.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: BTreeMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, replacing any previous binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a binding in this context only (no chain walking).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no bindings are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Context {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(b.into())
    }
}

impl From<Context> for Value {
    fn from(c: Context) -> Self {
        Value::Context(c)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text_coercion() {
        assert_eq!(Scalar::Text("hi".into()).to_string(), "hi");
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Int(0).to_string(), "0");
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Null.to_string(), "");
    }

    #[test]
    fn test_integer_zero_is_truthy() {
        assert!(Scalar::Int(0).display_truthy());
        assert!(Scalar::Int(7).display_truthy());
        assert!(Scalar::Int(-3).display_truthy());
    }

    #[test]
    fn test_float_zero_is_truthy() {
        assert!(Scalar::Float(0.0).display_truthy());
        assert!(Scalar::Float(2.5).display_truthy());
    }

    #[test]
    fn test_whitespace_only_text_is_falsy() {
        assert!(!Scalar::Text("".into()).display_truthy());
        assert!(!Scalar::Text("   ".into()).display_truthy());
        assert!(!Scalar::Text("\t\n".into()).display_truthy());
        assert!(Scalar::Text("x".into()).display_truthy());
        assert!(Scalar::Text("  x  ".into()).display_truthy());
    }

    #[test]
    fn test_bool_and_null_truthiness() {
        assert!(Scalar::Bool(true).display_truthy());
        assert!(!Scalar::Bool(false).display_truthy());
        assert!(!Scalar::Null.display_truthy());
    }

    #[test]
    fn test_container_truthiness() {
        assert!(!Value::Context(Context::new()).display_truthy());
        assert!(!Value::Sequence(vec![]).display_truthy());

        let mut ctx = Context::new();
        ctx.insert("k", "v");
        assert!(Value::Context(ctx).display_truthy());
        assert!(Value::Sequence(vec!["a".into()]).display_truthy());
    }

    #[test]
    fn test_computed_is_truthy() {
        let value = Value::computed(|_: &Scope<'_>| Ok(Scalar::Null));
        assert!(value.display_truthy());
    }

    #[test]
    fn test_context_insert_and_get() {
        let mut ctx = Context::new();
        assert!(ctx.is_empty());
        ctx.insert("name", "Ada");
        ctx.insert("count", 3);
        assert_eq!(ctx.len(), 2);
        assert!(matches!(
            ctx.get("name"),
            Some(Value::Scalar(Scalar::Text(s))) if s == "Ada"
        ));
        assert!(ctx.get("missing").is_none());
    }

    #[test]
    fn test_context_iterates_in_key_order() {
        let ctx: Context = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_sequence_from_vec() {
        let value = Value::from(vec!["x", "y"]);
        match value {
            Value::Sequence(items) => assert_eq!(items.len(), 2),
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn test_value_debug_for_computed() {
        let value = Value::computed(|_: &Scope<'_>| Ok(Scalar::Int(1)));
        assert_eq!(format!("{:?}", value), "Computed(..)");
    }
}
