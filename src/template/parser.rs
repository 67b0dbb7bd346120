//! Path template parsing.
//!
//! # Responsibilities
//! - Turn a pattern such as `/v1/{name=messages/*}` into a [`PathTemplate`]
//! - Split variable bindings into field paths and value templates
//! - Report malformed input as a [`ParseError`], never a panic
//!
//! # Design Decisions
//! - Hand-written scanner, no regex
//! - Ordered dispatch: `**`, then `*`, then `{`, then literal
//! - One recursive routine parses both the top level and value templates
//! - Permissive: `**` position and segment content are not validated
//!
//! The verb suffix (`:customMethod`) is not part of this grammar; see
//! [`crate::rule::split_verb`].

use thiserror::Error;

use super::segment::{PathTemplate, Segment, Variable};

/// Why a pattern was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// `{` with no `}` after it.
    #[error("unterminated variable")]
    UnterminatedVariable,

    /// `{}`.
    #[error("empty variable")]
    EmptyVariable,

    /// A field path with an empty identifier, e.g. `{a..b}` or `{=x}`.
    #[error("empty field path element")]
    EmptyFieldPathElement,

    /// A `/` where a segment must start, e.g. `//`.
    #[error("empty segment")]
    EmptySegment,
}

/// Malformed path template syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid path template syntax: {kind} at byte {offset} (`{remainder}`) in `{template}`")]
pub struct ParseError {
    /// Reason for the failure.
    pub kind: ParseErrorKind,
    /// The full input handed to [`parse`].
    pub template: String,
    /// Unparsed input at the point of failure.
    pub remainder: String,
    /// Byte offset of `remainder` within `template`.
    pub offset: usize,
}

/// Parse a path template.
///
/// A single leading `/` is optional and the empty pattern yields an empty
/// template.
///
/// # Examples
///
/// ```
/// use http_path_template::template::{parse, SegmentKind};
///
/// let template = parse("/v1/{name=messages/*}").unwrap();
/// assert_eq!(template.len(), 2);
/// assert_eq!(template.segments()[0].kind(), &SegmentKind::Literal);
///
/// let name = template.segments()[1].as_variable().unwrap();
/// assert_eq!(name.field_path(), ["name"]);
/// assert_eq!(name.value_template().len(), 2);
/// ```
pub fn parse(pattern: &str) -> Result<PathTemplate, ParseError> {
    let scanner = Scanner { source: pattern };
    let segments = scanner.segments(0, pattern.len())?;
    Ok(PathTemplate::new(segments))
}

/// Cursor over the input being parsed.
///
/// Positions are byte offsets into `source`. Every delimiter is ASCII, so
/// any offset produced by the scanner is a char boundary.
struct Scanner<'a> {
    source: &'a str,
}

impl<'a> Scanner<'a> {
    /// Parse `source[start..end]` as a slash-separated segment sequence.
    fn segments(&self, start: usize, end: usize) -> Result<Vec<Segment>, ParseError> {
        let mut segments = Vec::new();
        let mut pos = self.skip_slash(start, end);

        while pos < end {
            let (segment, next) = self.segment(pos, end)?;
            segments.push(segment);
            pos = self.skip_slash(next, end);
        }

        Ok(segments)
    }

    /// Parse one segment at `pos`, returning it and the position after it.
    fn segment(&self, pos: usize, end: usize) -> Result<(Segment, usize), ParseError> {
        let rest = &self.source[pos..end];

        if rest.starts_with("**") {
            return Ok((Segment::double_wildcard(), pos + 2));
        }
        if rest.starts_with('*') {
            return Ok((Segment::single_wildcard(), pos + 1));
        }
        if rest.starts_with('{') {
            return self.variable(pos, end);
        }

        let len = rest.find(['/', '{']).unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(ParseErrorKind::EmptySegment, pos, end));
        }
        Ok((Segment::literal(&rest[..len]), pos + len))
    }

    /// Parse `{field.path=value}` starting at the `{` at `pos`.
    fn variable(&self, pos: usize, end: usize) -> Result<(Segment, usize), ParseError> {
        let rest = &self.source[pos..end];
        let close = rest
            .find('}')
            .ok_or_else(|| self.error(ParseErrorKind::UnterminatedVariable, pos, end))?;

        let body = &rest[1..close];
        if body.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyVariable, pos, end));
        }

        let body_start = pos + 1;
        let (path_source, value_template) = match body.split_once('=') {
            Some((path, _)) => {
                let value_start = body_start + path.len() + 1;
                (path, self.segments(value_start, pos + close)?)
            }
            None => (body, vec![Segment::single_wildcard()]),
        };

        let field_path: Vec<String> = path_source.split('.').map(str::to_string).collect();
        if field_path.iter().any(String::is_empty) {
            return Err(self.error(ParseErrorKind::EmptyFieldPathElement, body_start, pos + close));
        }

        let raw = &rest[..=close];
        let segment = Segment::variable(raw, Variable::new(field_path, value_template));
        Ok((segment, pos + close + 1))
    }

    fn skip_slash(&self, pos: usize, end: usize) -> usize {
        if self.source[pos..end].starts_with('/') {
            pos + 1
        } else {
            pos
        }
    }

    fn error(&self, kind: ParseErrorKind, pos: usize, end: usize) -> ParseError {
        ParseError {
            kind,
            template: self.source.to_string(),
            remainder: self.source[pos..end].to_string(),
            offset: pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::SegmentKind;

    fn var(raw: &str, path: &[&str], value: Vec<Segment>) -> Segment {
        Segment::variable(
            raw,
            Variable::new(path.iter().map(|s| s.to_string()).collect(), value),
        )
    }

    #[test]
    fn test_parse_empty() {
        let template = parse("").unwrap();
        assert!(template.is_empty());

        let template = parse("/").unwrap();
        assert!(template.is_empty());
    }

    #[test]
    fn test_parse_named_collection() {
        let template = parse("/v1/{name=messages/*}").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("v1"),
                var(
                    "{name=messages/*}",
                    &["name"],
                    vec![Segment::literal("messages"), Segment::single_wildcard()],
                ),
            ]
        );
    }

    #[test]
    fn test_parse_default_value_template() {
        let template = parse("/v1/messages/{message_id}").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("v1"),
                Segment::literal("messages"),
                var("{message_id}", &["message_id"], vec![Segment::single_wildcard()]),
            ]
        );
    }

    #[test]
    fn test_parse_dotted_field_path() {
        let template = parse("/v1/messages/{message_id}/{sub.subfield}").unwrap();
        assert_eq!(template.len(), 4);
        assert_eq!(
            template.segments()[3],
            var("{sub.subfield}", &["sub", "subfield"], vec![Segment::single_wildcard()])
        );
    }

    #[test]
    fn test_parse_nested_double_wildcard() {
        let template = parse("/v1/messages/{message_id}/subs/{sub.subfield=/sub/**}").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("v1"),
                Segment::literal("messages"),
                var("{message_id}", &["message_id"], vec![Segment::single_wildcard()]),
                Segment::literal("subs"),
                var(
                    "{sub.subfield=/sub/**}",
                    &["sub", "subfield"],
                    vec![Segment::literal("sub"), Segment::double_wildcard()],
                ),
            ]
        );
    }

    #[test]
    fn test_parse_wildcards_before_literals() {
        let template = parse("/a/**").unwrap();
        assert_eq!(template.segments()[1].kind(), &SegmentKind::DoubleWildcard);

        let template = parse("/a/*/b").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("a"),
                Segment::single_wildcard(),
                Segment::literal("b"),
            ]
        );
    }

    #[test]
    fn test_parse_double_wildcard_not_last_is_accepted() {
        let template = parse("/**/tail").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::double_wildcard(), Segment::literal("tail")]
        );
    }

    #[test]
    fn test_parse_without_leading_slash() {
        assert_eq!(parse("v1/items").unwrap(), parse("/v1/items").unwrap());
    }

    #[test]
    fn test_parse_trailing_slash() {
        let template = parse("/v1/").unwrap();
        assert_eq!(template.segments(), &[Segment::literal("v1")]);
    }

    #[test]
    fn test_parse_empty_value_template() {
        let template = parse("/{name=}").unwrap();
        let variable = template.segments()[0].as_variable().unwrap();
        assert!(variable.value_template().is_empty());
    }

    #[test]
    fn test_parse_unterminated_variable() {
        let err = parse("/v1/{name").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedVariable);
        assert_eq!(err.template, "/v1/{name");
        assert_eq!(err.remainder, "{name");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_parse_nested_braces_fail() {
        // The first `}` closes the outer variable, leaving `{b` unterminated.
        let err = parse("/{a={b}}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedVariable);
        assert_eq!(err.remainder, "{b");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_parse_empty_variable() {
        let err = parse("/v1/{}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyVariable);
    }

    #[test]
    fn test_parse_empty_field_path_element() {
        for pattern in ["/{a..b}", "/{=x}", "/{a.}", "/{.a=*}"] {
            let err = parse(pattern).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::EmptyFieldPathElement, "{pattern}");
        }
    }

    #[test]
    fn test_parse_double_slash() {
        let err = parse("/v1//items").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptySegment);
        assert_eq!(err.remainder, "/items");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse("/v1/{name").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unterminated variable"));
        assert!(message.contains("/v1/{name"));
    }

    #[test]
    fn test_round_trip() {
        let patterns = [
            "/v1/{name=messages/*}",
            "/v1/messages/{message_id}",
            "/v1/messages/{message_id}/{sub.subfield}",
            "/v1/messages/{message_id}/subs/{sub.subfield=/sub/**}",
            "/v1/{parent=projects/*/locations/*}/datasets",
            "/**",
        ];
        for pattern in patterns {
            let template = parse(pattern).unwrap();
            let rendered = template.to_string();
            assert_eq!(rendered, pattern);
            assert_eq!(parse(&rendered).unwrap(), template);
        }
    }
}
