//! Engine-neutral match and capture records.
//!
//! Engines translate their native query results into these types so the
//! splicing pass never depends on a particular parsing library.

use std::ops::Range;

/// A single named span within a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Capture name as written in the query (e.g. `keyword.control`).
    pub name: String,
    /// Text of the captured node.
    pub text: String,
    /// Byte offset where the node starts (inclusive).
    pub start: usize,
    /// Byte offset where the node ends (exclusive).
    pub end: usize,
}

impl Capture {
    /// Create a capture whose text is taken from `source[start..end]`.
    ///
    /// Returns `None` when the range is not a valid slice of `source`.
    pub fn from_source(
        name: impl Into<String>,
        source: &str,
        start: usize,
        end: usize,
    ) -> Option<Self> {
        let text = source.get(start..end)?;
        Some(Self {
            name: name.into(),
            text: text.to_string(),
            start,
            end,
        })
    }

    /// The byte range covered by this capture.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The class token this capture renders with.
    pub fn class_token(&self) -> String {
        class_token(&self.name)
    }
}

/// One result of running a query against a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    /// Captures in the order the engine reported them.
    pub captures: Vec<Capture>,
}

impl Match {
    /// Create a match from its captures.
    pub fn new(captures: Vec<Capture>) -> Self {
        Self { captures }
    }

    /// Create a match holding exactly one capture.
    pub fn single(capture: Capture) -> Self {
        Self {
            captures: vec![capture],
        }
    }

    /// The capture that decides how this match renders.
    ///
    /// Only the first capture is consulted; later captures are ignored.
    pub fn primary(&self) -> Option<&Capture> {
        self.captures.first()
    }
}

/// Convert a capture name into a class token.
///
/// Every `.` becomes `-`, so `keyword.control` renders as `keyword-control`.
pub fn class_token(name: &str) -> String {
    name.replace('.', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("keyword", "keyword")]
    #[case::dotted("keyword.control", "keyword-control")]
    #[case::nested("punctuation.bracket.round", "punctuation-bracket-round")]
    #[case::already_dashed("string-special", "string-special")]
    fn test_class_token(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(class_token(name), expected);
    }

    #[test]
    fn test_from_source_slices_text() {
        let capture = Capture::from_source("keyword", "fn main", 0, 2).unwrap();
        assert_eq!(capture.text, "fn");
        assert_eq!(capture.range(), 0..2);
    }

    #[test]
    fn test_from_source_rejects_out_of_bounds() {
        assert!(Capture::from_source("keyword", "fn", 0, 5).is_none());
        assert!(Capture::from_source("keyword", "é", 0, 1).is_none());
    }

    #[test]
    fn test_primary_is_first_capture() {
        let m = Match::new(vec![
            Capture::from_source("function", "foo bar", 0, 3).unwrap(),
            Capture::from_source("variable", "foo bar", 4, 7).unwrap(),
        ]);
        assert_eq!(m.primary().unwrap().name, "function");
        assert!(Match::default().primary().is_none());
    }
}
