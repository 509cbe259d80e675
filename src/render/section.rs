//! Conditional section splicing.
//!
//! A section is a block delimited by `{{#name}}…{{/name}}` (inclusive,
//! shown when the value displays) or `{{^name}}…{{/name}}` (exclusive,
//! shown when it does not). Splicing either strips the tags and keeps the
//! content, or removes the whole block.
//!
//! Known limitation: nesting depth is not tracked, so a section nested
//! inside another section of the same name pairs the outer start tag with
//! the inner end tag. Same-named nesting is unsupported; differently named
//! nesting works because each name is spliced independently.

/// Resolve every `name` section in `html` against a display decision.
///
/// Scans left to right for the earliest `{{#name}}` or `{{^name}}`, pairs
/// it with the next `{{/name}}`, and either keeps the inner content (tags
/// stripped) or removes the block. Keeping content re-scans from the same
/// position, since the splice may reveal a following pair; removing a
/// block advances the search position past the removal point so the
/// remainder is not reprocessed. Unmatched or mis-ordered tags are left
/// untouched.
pub(crate) fn splice_sections(html: &str, section: &str, display: bool) -> String {
    let include_start = format!("{{{{#{section}}}}}");
    let exclude_start = format!("{{{{^{section}}}}}");
    let end_tag = format!("{{{{/{section}}}}}");
    // all three tag forms have the same length
    let tag_len = end_tag.len();
    let min_len = 2 * tag_len;

    let mut html = html.to_string();
    let mut search_from = 0;
    loop {
        if html.len() < min_len || (search_from > 0 && search_from + 1 >= html.len()) {
            break;
        }
        let i_include = html[search_from..]
            .find(&include_start)
            .map(|i| i + search_from);
        let i_exclude = html[search_from..]
            .find(&exclude_start)
            .map(|i| i + search_from);
        let (i_start, inclusive) = match (i_include, i_exclude) {
            (Some(inc), Some(exc)) if inc < exc => (inc, true),
            (Some(_), Some(exc)) => (exc, false),
            (Some(inc), None) => (inc, true),
            (None, Some(exc)) => (exc, false),
            (None, None) => break,
        };
        let Some(i_end) = html[i_start..].find(&end_tag).map(|i| i + i_start) else {
            break;
        };

        if display == inclusive {
            // show: strip the tags, keep the content
            let mut next = String::with_capacity(html.len() - min_len);
            next.push_str(&html[..i_start]);
            next.push_str(&html[i_start + tag_len..i_end]);
            next.push_str(&html[i_end + tag_len..]);
            html = next;
        } else {
            // hide: splice out the whole block
            let mut next = String::with_capacity(html.len() - (i_end - i_start) - tag_len);
            next.push_str(&html[..i_start]);
            next.push_str(&html[i_end + tag_len..]);
            html = next;
            search_from = i_start;
        }
    }
    html
}
