//! Integration tests for the splicing invariants.
//!
//! Coverage: concatenating gap text and span text in emission order
//! reproduces the source. Non-overlap: emitted spans never intersect and the
//! cursor only moves forward.

use proptest::prelude::*;
use rstest::rstest;
use treelight_render::{
    Capture, Escape, Match, MatchOrder, RenderOptions, Segment, render, splice,
};

fn capture(name: &str, source: &str, start: usize, end: usize) -> Match {
    Match::single(Capture::from_source(name, source, start, end).expect("valid test span"))
}

/// Build matches from arbitrary seeds, snapping offsets to char boundaries.
fn matches_from_seeds(source: &str, seeds: &[(usize, usize, bool)]) -> Vec<Match> {
    let boundaries: Vec<usize> = source
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(source.len()))
        .collect();

    seeds
        .iter()
        .map(|&(a, b, dotted)| {
            let a = boundaries[a % boundaries.len()];
            let b = boundaries[b % boundaries.len()];
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let name = if dotted { "keyword.control" } else { "string" };
            capture(name, source, start, end)
        })
        .collect()
}

fn assert_invariants(source: &str, segments: &[Segment<'_>]) {
    let rebuilt: String = segments.iter().map(Segment::text).collect();
    assert_eq!(rebuilt, source, "segments must reproduce the source");

    let mut last_end = 0;
    for segment in segments {
        if let Segment::Span { start, end, .. } = segment {
            assert!(*start >= last_end, "span {start}..{end} overlaps cursor {last_end}");
            assert!(end >= start);
            last_end = *end;
        }
    }
}

proptest! {
    #[test]
    fn coverage_and_non_overlap_in_engine_order(
        source in "[a-z é<&\"\n]{0,48}",
        seeds in prop::collection::vec((0usize..64, 0usize..64, any::<bool>()), 0..12),
    ) {
        let matches = matches_from_seeds(&source, &seeds);
        let segments = splice(&source, &matches, MatchOrder::Engine).unwrap();
        assert_invariants(&source, &segments);
    }

    #[test]
    fn coverage_and_non_overlap_in_start_order(
        source in "[a-z é\n]{0,48}",
        seeds in prop::collection::vec((0usize..64, 0usize..64, any::<bool>()), 0..12),
    ) {
        let matches = matches_from_seeds(&source, &seeds);
        let segments = splice(&source, &matches, MatchOrder::Start).unwrap();
        assert_invariants(&source, &segments);
    }

    #[test]
    fn verbatim_markup_strips_back_to_source(
        source in "[a-z \n]{0,48}",
        seeds in prop::collection::vec((0usize..64, 0usize..64, any::<bool>()), 0..12),
    ) {
        let matches = matches_from_seeds(&source, &seeds);
        let options = RenderOptions { escape: Escape::Verbatim, ..RenderOptions::default() };
        let html = render(&source, &matches, &options).unwrap();
        let stripped = html
            .replace("<span class=\"keyword-control\">", "")
            .replace("<span class=\"string\">", "")
            .replace("</span>", "");
        prop_assert_eq!(stripped, source);
    }
}

#[test]
fn empty_match_list_returns_input_unchanged() {
    let source = "fn main() {}";
    let options = RenderOptions {
        escape: Escape::Verbatim,
        ..RenderOptions::default()
    };
    assert_eq!(render(source, &[], &options).unwrap(), source);
}

#[test]
fn full_overlap_is_suppressed() {
    let source = "abcdefgh";
    let matches = vec![capture("type", source, 0, 5), capture("keyword", source, 2, 4)];

    let html = render(source, &matches, &RenderOptions::default()).unwrap();
    assert_eq!(html, "<span class=\"type\">abcde</span>fgh");
    assert!(!html.contains("keyword"));
}

#[test]
fn adjacent_matches_have_no_gap() {
    let source = "abcdef";
    let matches = vec![capture("keyword", source, 0, 3), capture("string", source, 3, 6)];

    let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(Segment::is_span));

    let html = render(source, &matches, &RenderOptions::default()).unwrap();
    assert_eq!(
        html,
        "<span class=\"keyword\">abc</span><span class=\"string\">def</span>"
    );
}

#[rstest]
#[case::same_start(0, 2)]
#[case::inside(1, 3)]
#[case::straddles_end(3, 6)]
fn later_match_starting_before_cursor_is_dropped(#[case] start: usize, #[case] end: usize) {
    let source = "abcdefgh";
    let matches = vec![capture("first", source, 0, 4), capture("second", source, start, end)];
    let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
    let classes: Vec<&str> = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Span { class, .. } => Some(class.as_str()),
            Segment::Gap(_) => None,
        })
        .collect();
    assert_eq!(classes, vec!["first"]);
}

#[test]
fn match_starting_at_cursor_is_kept() {
    let source = "abcdefgh";
    let matches = vec![capture("first", source, 0, 4), capture("second", source, 4, 8)];
    let segments = splice(source, &matches, MatchOrder::Engine).unwrap();
    assert_eq!(segments.iter().filter(|s| s.is_span()).count(), 2);
}
