//! Natural-language list joins for `{{&name}}` tags.

use crate::value::Value;

/// Join a sequence's scalar elements into a natural-language list.
///
/// Zero items give the empty string, one gives the item itself, two give
/// `"A and B"`, and three or more a serial-comma list: `"A, B, and C"`.
/// Non-scalar elements have no sensible text form and are skipped.
pub(crate) fn join_list(items: &[Value]) -> String {
    let texts: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::Scalar(s) => Some(s.to_string()),
            _ => None,
        })
        .collect();
    match texts.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [a, b] => format!("{a} and {b}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}

/// Replace every `{{&section}}` tag with the joined list text.
pub(crate) fn substitute_join(html: &str, section: &str, items: &[Value]) -> String {
    let tag = format!("{{{{&{section}}}}}");
    if !html.contains(&tag) {
        return html.to_string();
    }
    html.replace(&tag, &join_list(items))
}
