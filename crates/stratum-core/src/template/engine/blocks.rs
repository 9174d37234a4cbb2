//! Block matching utilities (finding the end of a loop body)

use super::helpers::count_backslashes_before;

/// Find matching {{/each}} considering nested loops and escape sequences
///
/// Returns (position, length) of the closing tag relative to `text`.
/// `\{{/each}}` is literal text and never closes a loop.
pub(crate) fn find_each_end(text: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find("{{") {
        let start = pos + offset;
        let close = text[start + 2..].find("}}")?;
        let end = start + 2 + close + 2;

        let escaped = count_backslashes_before(text, start) % 2 == 1;
        let expr = text[start + 2..start + 2 + close].trim();

        if !escaped {
            if expr.starts_with("each ") {
                depth += 1;
            } else if expr == "/each" {
                if depth == 0 {
                    return Some((start, end - start));
                }
                depth -= 1;
            }
        }

        pos = end;
    }

    None
}
