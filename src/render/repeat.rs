//! Repeating-section expansion over sequences.

use tracing::trace;

use crate::error::Result;
use crate::scope::Scope;
use crate::value::{Context, Value};
use crate::RenderOptions;

use super::render_scope;

/// Expand the first `{{#section}}…{{/section}}` block once per element.
///
/// Context elements are rendered against the captured inner block as a
/// fresh child scope, parented to `scope` so computed bindings can still
/// reach ancestor values; scalar elements repeat the block verbatim. The
/// concatenation replaces the matched block. If the section is absent or
/// mis-ordered the text comes back unchanged; further occurrences of the
/// same section are left for later passes.
pub(crate) fn expand_repeating(
    html: &str,
    section: &str,
    items: &[Value],
    scope: &Scope<'_>,
    options: &RenderOptions,
) -> Result<String> {
    let start_tag = format!("{{{{#{section}}}}}");
    let end_tag = format!("{{{{/{section}}}}}");

    let Some(i_start) = html.find(&start_tag) else {
        return Ok(html.to_string());
    };
    let content_at = i_start + start_tag.len();
    let Some(i_end) = html[content_at..].find(&end_tag).map(|i| i + content_at) else {
        return Ok(html.to_string());
    };

    trace!(section, items = items.len(), "expanding repeating section");

    let block = &html[content_at..i_end];
    let empty = Context::new();
    let mut expanded = String::new();
    for item in items {
        let child = match item {
            Value::Context(child) => child,
            _ => &empty,
        };
        let child_scope = scope.child(child);
        expanded.push_str(&render_scope(block, &child_scope, Some(section), options)?);
    }

    let mut out = String::with_capacity(i_start + expanded.len() + html.len() - i_end);
    out.push_str(&html[..i_start]);
    out.push_str(&expanded);
    out.push_str(&html[i_end + end_tag.len()..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<Value> {
        names
            .iter()
            .map(|n| {
                let mut ctx = Context::new();
                ctx.insert("n", *n);
                Value::Context(ctx)
            })
            .collect()
    }

    #[test]
    fn test_expands_once_per_element() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "{{#items}}{{n}};{{/items}}",
            "items",
            &items(&["x", "y", "z"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "x;y;z;");
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "before {{#items}}[{{n}}]{{/items}} after",
            "items",
            &items(&["a", "b"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "before [a][b] after");
    }

    #[test]
    fn test_qualified_names_also_resolve() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "{{#items}}{{items.n}}{{/items}}",
            "items",
            &items(&["x"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn test_missing_section_unchanged() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let html = "no section here {{items}}";
        let out = expand_repeating(
            html,
            "items",
            &items(&["x"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn test_mis_ordered_tags_unchanged() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let html = "{{/items}}...{{#items}}";
        let out = expand_repeating(
            html,
            "items",
            &items(&["x"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn test_only_first_occurrence_expanded() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "{{#items}}{{n}}{{/items}}|{{#items}}{{n}}{{/items}}",
            "items",
            &items(&["x", "y"]),
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "xy|{{#items}}{{n}}{{/items}}");
    }

    #[test]
    fn test_scalar_elements_repeat_block_verbatim() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "{{#items}}*{{/items}}",
            "items",
            &["a".into(), "b".into(), "c".into()],
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "***");
    }

    #[test]
    fn test_empty_sequence_removes_block_content() {
        let root = Context::new();
        let scope = Scope::root(&root);
        let out = expand_repeating(
            "a{{#items}}X{{/items}}b",
            "items",
            &[],
            &scope,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "ab");
    }
}
