//! Scope chains for nested rendering.
//!
//! A [`Scope`] pairs a borrowed [`Context`] with an optional link to the
//! enclosing scope. The renderer allocates one per nested descent and drops
//! it on the way back out, so caller-owned contexts are never written to
//! and nothing outlives the render call.

use crate::value::{Context, Value};

/// A borrowed context plus its chain of ancestors.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    context: &'a Context,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    /// The top-level scope of a render call.
    pub fn root(context: &'a Context) -> Self {
        Scope {
            context,
            parent: None,
        }
    }

    /// A child scope for descending into a nested context or sequence
    /// element.
    pub fn child(&'a self, context: &'a Context) -> Scope<'a> {
        Scope {
            context,
            parent: Some(self),
        }
    }

    /// The context this scope wraps.
    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Scope<'a>> {
        self.parent
    }

    /// Resolve `key` in this scope, then up the chain.
    ///
    /// Used by computed bindings to read ancestor values.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.context
            .get(key)
            .or_else(|| self.parent.and_then(|parent| parent.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn test_root_scope_lookup() {
        let mut ctx = Context::new();
        ctx.insert("name", "Ada");
        let scope = Scope::root(&ctx);
        assert!(scope.parent().is_none());
        assert!(matches!(
            scope.get("name"),
            Some(Value::Scalar(Scalar::Text(s))) if s == "Ada"
        ));
        assert!(scope.get("missing").is_none());
    }

    #[test]
    fn test_child_resolves_ancestor_names() {
        let mut outer = Context::new();
        outer.insert("theme", "dark");
        outer.insert("shadowed", "outer");
        let mut inner = Context::new();
        inner.insert("shadowed", "inner");

        let root = Scope::root(&outer);
        let child = root.child(&inner);

        // own binding wins, missing names fall through to the ancestor
        assert!(matches!(
            child.get("shadowed"),
            Some(Value::Scalar(Scalar::Text(s))) if s == "inner"
        ));
        assert!(matches!(
            child.get("theme"),
            Some(Value::Scalar(Scalar::Text(s))) if s == "dark"
        ));
    }

    #[test]
    fn test_chain_walks_multiple_levels() {
        let mut top = Context::new();
        top.insert("root_only", 1);
        let mid_ctx = Context::new();
        let leaf_ctx = Context::new();

        let top_scope = Scope::root(&top);
        let mid = top_scope.child(&mid_ctx);
        let leaf = mid.child(&leaf_ctx);

        assert!(leaf.get("root_only").is_some());
    }
}
