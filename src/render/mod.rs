//! The rendering core.
//!
//! [`render_scope`] walks one binding context, resolving each key against
//! the (possibly already partially rendered) template text and recursing
//! into nested contexts and sequence elements with dotted tag prefixes.
//! The cooperating pieces live alongside it: conditional section splicing
//! in [`section`], repeating-section expansion in [`repeat`], and list
//! joins in [`list`].
//!
//! Later substitutions operate on the output of earlier ones, so key order
//! decides which literal tag occurrences a later step still sees; the final
//! output is order-independent as long as tag names are unique per scope.

mod list;
mod repeat;
mod section;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RenderError, Result};
use crate::scope::Scope;
use crate::value::{DISPLAY_KEY, PARENT_KEY, Scalar, Value};
use crate::{ErrorPolicy, RenderOptions};

use list::substitute_join;
use repeat::expand_repeating;
use section::splice_sections;

/// Render `template` against one scope.
///
/// `prefix` is the dotted path naming this context; `None` marks the
/// top-level call. Nested calls first resolve the context's own section
/// display from its `_display` binding (default shown), then process every
/// non-reserved key under its qualified `prefix.key` tag name.
pub(crate) fn render_scope(
    template: &str,
    scope: &Scope<'_>,
    prefix: Option<&str>,
    options: &RenderOptions,
) -> Result<String> {
    if template.is_empty() {
        return Ok(String::new());
    }
    let mut html = template.to_string();

    if let Some(prefix) = prefix {
        let display = scope
            .context()
            .get(DISPLAY_KEY)
            .map(Value::display_truthy)
            .unwrap_or(true);
        html = splice_sections(&html, prefix, display);
    }

    for (key, value) in scope.context().iter() {
        if key == DISPLAY_KEY || key == PARENT_KEY {
            continue;
        }
        let tkey = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.to_string(),
        };
        match value {
            Value::Context(child) => {
                if child.is_empty() {
                    html = splice_sections(&html, &tkey, false);
                } else {
                    let child_scope = scope.child(child);
                    html = render_scope(&html, &child_scope, Some(&tkey), options)?;
                }
            }
            Value::Sequence(items) => {
                html = substitute_join(&html, &tkey, items);
                if items.is_empty() {
                    html = splice_sections(&html, &tkey, false);
                } else {
                    html = expand_repeating(&html, &tkey, items, scope, options)?;
                    // clears {{^name}} blocks and flattens any further
                    // same-named inclusive sections
                    html = splice_sections(&html, &tkey, true);
                }
            }
            Value::Computed(f) => {
                let scalar = match f(scope) {
                    Ok(scalar) => scalar,
                    Err(source) => match options.computed_errors {
                        ErrorPolicy::Strict => {
                            return Err(RenderError::Computed { name: tkey, source });
                        }
                        ErrorPolicy::Lenient => Scalar::Text(String::new()),
                    },
                };
                html = substitute_scalar(&html, &tkey, key, &scalar);
            }
            Value::Scalar(scalar) => {
                html = substitute_scalar(&html, &tkey, key, scalar);
            }
        }
    }
    Ok(html)
}

/// Splice `tkey` sections by the scalar's display truthiness, then replace
/// its substitution tags with the coerced text.
///
/// Inside a nested scope the bare `{{key}}` form is replaced as well as the
/// qualified `{{prefix.key}}` form, so blocks revealed by an enclosing
/// section can use unqualified names.
fn substitute_scalar(html: &str, tkey: &str, key: &str, scalar: &Scalar) -> String {
    let mut html = splice_sections(html, tkey, scalar.display_truthy());
    let text = scalar.to_string();
    html = html.replace(&format!("{{{{{tkey}}}}}"), &text);
    if tkey != key {
        html = html.replace(&format!("{{{{{key}}}}}"), &text);
    }
    html
}

static UNRESOLVED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("invalid cleanup regex"));

/// Strip tag delimiters left over from unresolved tags.
///
/// Every remaining `{{...}}` loses its delimiters (inner content is kept
/// as-is), repeating until settled so nested leftovers resolve too; any
/// stray unpaired `{{` is then removed outright.
pub(crate) fn strip_tag_delimiters(rendered: &str) -> String {
    let mut out = rendered.to_string();
    loop {
        let stripped = UNRESOLVED_TAG.replace_all(&out, "$1").into_owned();
        if stripped == out {
            break;
        }
        out = stripped;
    }
    while let Some(i) = out.find("{{") {
        out.replace_range(i..i + 2, "");
    }
    out
}
