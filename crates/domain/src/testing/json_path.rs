//! Minimal JSONPath-style lookup.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]` and
//! `$.array[*]` (which yields the whole array).

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Looks up `path` in `json`.
///
/// Returns `Ok(None)` when the path is well-formed but absent.
///
/// # Errors
///
/// Returns [`DomainError::InvalidJsonPath`] for a malformed expression.
pub fn query<'a>(json: &'a Value, path: &str) -> DomainResult<Option<&'a Value>> {
    let invalid = |reason: &str| DomainError::InvalidJsonPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err(invalid("must start with '$'"));
    };
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    // Parse the whole expression first so a malformed path is rejected
    // whatever the document holds.
    let mut steps = Vec::new();
    for segment in split_segments(rest) {
        let (name, index) = match segment.find('[') {
            Some(open) if segment.ends_with(']') => {
                (&segment[..open], Some(&segment[open + 1..segment.len() - 1]))
            }
            Some(_) => return Err(invalid("unterminated '['")),
            None => (segment, None),
        };
        let index = match index {
            None => Index::None,
            Some("*") => Index::All,
            Some(idx) => Index::At(
                idx.parse()
                    .map_err(|_| invalid(&format!("invalid array index '{idx}'")))?,
            ),
        };
        steps.push((name, index));
    }

    let mut current = json;
    for (name, index) in steps {
        if !name.is_empty() {
            match current.get(name) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }

        match index {
            Index::None => {}
            Index::All => return Ok(Some(current)),
            Index::At(idx) => match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            },
        }
    }

    Ok(Some(current))
}

enum Index {
    None,
    All,
    At(usize),
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}
