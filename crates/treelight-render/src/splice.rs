//! The linear splicing pass.
//!
//! Walks the match stream once, keeping a `last_end` cursor into the source.
//! Each match contributes at most one span (from its first capture). A match
//! that starts before `last_end` overlaps something already emitted and is
//! dropped; untouched source between spans is kept as gap text. Concatenating
//! the text of every returned segment reproduces the source exactly.

use crate::capture::{Capture, Match, class_token};
use crate::error::{Error, Result};

/// Order in which matches are fed to the overlap pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchOrder {
    /// Keep the order the engine produced. The first non-overlapping match
    /// wins a contested region, even if a later one starts earlier.
    #[default]
    Engine,
    /// Stable-sort matches by the start offset of their first capture.
    Start,
}

/// A piece of spliced output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Source text not covered by any emitted capture.
    Gap(&'a str),
    /// A highlighted span.
    Span {
        /// Class token (capture name with `.` replaced by `-`).
        class: String,
        /// Text covered by the span.
        text: &'a str,
        /// Start byte offset in the source.
        start: usize,
        /// End byte offset in the source.
        end: usize,
    },
}

impl<'a> Segment<'a> {
    /// Source text this segment covers.
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Gap(text) | Segment::Span { text, .. } => text,
        }
    }

    /// Whether this segment is a highlighted span.
    pub fn is_span(&self) -> bool {
        matches!(self, Segment::Span { .. })
    }
}

/// Splice `matches` over `source` into gap and span segments.
///
/// # Errors
///
/// Returns [`Error::InvalidSpan`] if a first capture has `end < start`, lies
/// outside the source, splits a UTF-8 character, or carries text that differs
/// from the source it claims to cover.
pub fn splice<'a>(
    source: &'a str,
    matches: &[Match],
    order: MatchOrder,
) -> Result<Vec<Segment<'a>>> {
    let mut primaries: Vec<&Capture> = matches.iter().filter_map(Match::primary).collect();
    if order == MatchOrder::Start {
        primaries.sort_by_key(|capture| capture.start);
    }

    let mut segments = Vec::with_capacity(primaries.len() * 2 + 1);
    let mut last_end = 0;

    for capture in primaries {
        let text = checked_slice(source, capture)?;

        if capture.start < last_end {
            tracing::trace!(
                start = capture.start,
                end = capture.end,
                last_end,
                capture = %capture.name,
                "Dropping overlapping match"
            );
            continue;
        }

        if capture.start > last_end {
            segments.push(Segment::Gap(&source[last_end..capture.start]));
        }

        segments.push(Segment::Span {
            class: class_token(&capture.name),
            text,
            start: capture.start,
            end: capture.end,
        });
        last_end = capture.end;
    }

    if last_end < source.len() {
        segments.push(Segment::Gap(&source[last_end..]));
    }

    Ok(segments)
}

fn checked_slice<'a>(source: &'a str, capture: &Capture) -> Result<&'a str> {
    let invalid = |reason| Error::InvalidSpan {
        start: capture.start,
        end: capture.end,
        len: source.len(),
        reason,
    };

    if capture.end < capture.start {
        return Err(invalid("end precedes start"));
    }
    if capture.end > source.len() {
        return Err(invalid("span exceeds source"));
    }
    let text = source
        .get(capture.start..capture.end)
        .ok_or_else(|| invalid("span splits a UTF-8 character"))?;
    if text != capture.text {
        return Err(invalid("capture text differs from source"));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str, source: &str, start: usize, end: usize) -> Match {
        Match::single(Capture::from_source(name, source, start, end).unwrap())
    }

    #[test]
    fn test_no_matches_yields_single_gap() {
        let segments = splice("let x = 1;", &[], MatchOrder::Engine).unwrap();
        assert_eq!(segments, vec![Segment::Gap("let x = 1;")]);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert!(splice("", &[], MatchOrder::Engine).unwrap().is_empty());
    }

    #[test]
    fn test_gap_before_and_after_span() {
        let source = "a fn b";
        let segments = splice(source, &[m("keyword", source, 2, 4)], MatchOrder::Engine).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Gap("a "));
        assert_eq!(segments[1].text(), "fn");
        assert_eq!(segments[2], Segment::Gap(" b"));
    }

    #[test]
    fn test_engine_order_first_match_wins() {
        // The second match starts earlier but arrives after the first was emitted.
        let source = "abcdef";
        let matches = vec![m("type", source, 2, 4), m("keyword", source, 0, 3)];

        let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
        let spans: Vec<_> = segments.iter().filter(|s| s.is_span()).collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "cd");
    }

    #[test]
    fn test_start_order_sorts_before_overlap_pass() {
        let source = "abcdef";
        let matches = vec![m("type", source, 2, 4), m("keyword", source, 0, 3)];

        let segments = splice(source, &matches, MatchOrder::Start).unwrap();
        let spans: Vec<_> = segments.iter().filter(|s| s.is_span()).collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "abc");
    }

    #[test]
    fn test_match_without_captures_is_skipped() {
        let source = "fn";
        let matches = vec![Match::default(), m("keyword", source, 0, 2)];
        let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_span());
    }

    #[test]
    fn test_only_first_capture_is_used() {
        let source = "foo bar";
        let matches = vec![Match::new(vec![
            Capture::from_source("function", source, 0, 3).unwrap(),
            Capture::from_source("variable", source, 4, 7).unwrap(),
        ])];
        let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
        assert_eq!(segments.iter().filter(|s| s.is_span()).count(), 1);
        assert_eq!(segments[1], Segment::Gap(" bar"));
    }

    #[test]
    fn test_rejects_reversed_span() {
        let capture = Capture {
            name: "keyword".to_string(),
            text: String::new(),
            start: 3,
            end: 1,
        };
        let err = splice("abcdef", &[Match::single(capture)], MatchOrder::Engine).unwrap_err();
        assert!(matches!(err, Error::InvalidSpan { reason: "end precedes start", .. }));
    }

    #[test]
    fn test_rejects_span_past_end() {
        let capture = Capture {
            name: "keyword".to_string(),
            text: "abc".to_string(),
            start: 4,
            end: 7,
        };
        let err = splice("abcde", &[Match::single(capture)], MatchOrder::Engine).unwrap_err();
        assert!(matches!(err, Error::InvalidSpan { len: 5, .. }));
    }

    #[test]
    fn test_rejects_span_inside_multibyte_char() {
        let capture = Capture {
            name: "string".to_string(),
            text: String::new(),
            start: 1,
            end: 2,
        };
        let err = splice("é!", &[Match::single(capture)], MatchOrder::Engine).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSpan { reason: "span splits a UTF-8 character", .. }
        ));
    }

    #[test]
    fn test_rejects_mismatched_text() {
        let capture = Capture {
            name: "keyword".to_string(),
            text: "xx".to_string(),
            start: 0,
            end: 2,
        };
        assert!(splice("fn", &[Match::single(capture)], MatchOrder::Engine).is_err());
    }

    #[test]
    fn test_multibyte_offsets() {
        let source = "let é = \"ü\";";
        let start = source.find('"').unwrap();
        let end = source.rfind('"').unwrap() + 1;
        let segments =
            splice(source, &[m("string", source, start, end)], MatchOrder::Engine).unwrap();
        let rebuilt: String = segments.iter().map(Segment::text).collect();
        assert_eq!(rebuilt, source);
        assert_eq!(segments[1].text(), "\"ü\"");
    }
}
