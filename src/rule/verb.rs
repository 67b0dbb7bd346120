//! Custom-method verb handling.
//!
//! `/v1/{name=operations/*}:cancel` carries the verb `cancel`. The path
//! template grammar does not cover verbs, so they are split off here before
//! the path reaches the parser.

/// Split a trailing `:verb` off a rule path.
///
/// The verb is the text after the last `:` that follows the final `/` or `}`.
/// Colons inside a variable's braces are never treated as a verb separator.
///
/// ```
/// use http_path_template::rule::split_verb;
///
/// assert_eq!(split_verb("/v1/{name=operations/*}:cancel"), ("/v1/{name=operations/*}", Some("cancel")));
/// assert_eq!(split_verb("/v1/messages"), ("/v1/messages", None));
/// ```
pub fn split_verb(path: &str) -> (&str, Option<&str>) {
    let tail_start = path.rfind(['/', '}']).map_or(0, |i| i + 1);

    match path[tail_start..].rfind(':') {
        Some(i) if tail_start + i + 1 < path.len() => {
            let colon = tail_start + i;
            (&path[..colon], Some(&path[colon + 1..]))
        }
        _ => (path, None),
    }
}
