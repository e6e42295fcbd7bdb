//! HTML output for spliced segments.

use crate::capture::Match;
use crate::error::Result;
use crate::splice::{MatchOrder, Segment, splice};

/// How source text is embedded in the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escape {
    /// Escape `& < > " '` in gap and span text.
    #[default]
    Html,
    /// Embed text as-is. Only safe for trusted input.
    Verbatim,
}

/// Options controlling [`render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escaping applied to source text.
    pub escape: Escape,
    /// Order in which matches enter the overlap pass.
    pub order: MatchOrder,
    /// Prefix prepended to every class token (e.g. `hl-`).
    pub class_prefix: String,
}

/// Splice `matches` over `source` and render the result as HTML.
///
/// With no matches the output is the source text itself (escaped according
/// to [`RenderOptions::escape`]).
///
/// # Errors
///
/// Propagates [`crate::Error::InvalidSpan`] from the splicing pass; no
/// partial output is produced.
pub fn render(source: &str, matches: &[Match], options: &RenderOptions) -> Result<String> {
    let segments = splice(source, matches, options.order)?;
    Ok(render_segments(&segments, options))
}

/// Render already-spliced segments as HTML.
pub fn render_segments(segments: &[Segment<'_>], options: &RenderOptions) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.text().len() + 32).sum());
    for segment in segments {
        match segment {
            Segment::Gap(text) => push_text(&mut out, text, options.escape),
            Segment::Span { class, text, .. } => {
                out.push_str("<span class=\"");
                push_text(&mut out, &options.class_prefix, Escape::Html);
                push_text(&mut out, class, Escape::Html);
                out.push_str("\">");
                push_text(&mut out, text, options.escape);
                out.push_str("</span>");
            }
        }
    }
    out
}

fn push_text(out: &mut String, text: &str, escape: Escape) {
    match escape {
        Escape::Html => escape_html(text, out),
        Escape::Verbatim => out.push_str(text),
    }
}

/// Append `text` to `out` with HTML special characters escaped.
pub fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
