//! Splices syntax-highlight captures into class-tagged markup.
//!
//! This crate owns the one piece of highlighting logic that does not belong
//! to a parsing engine: turning an ordered stream of query matches into
//! output where each highlighted region is wrapped in a
//! `<span class="...">` element.
//!
//! # Example
//!
//! ```
//! use treelight_render::{Capture, Match, RenderOptions, render};
//!
//! let source = "fn main() {}";
//! let matches = vec![
//!     Match::single(Capture::from_source("keyword", source, 0, 2).unwrap()),
//!     Match::single(Capture::from_source("function", source, 3, 7).unwrap()),
//! ];
//!
//! let html = render(source, &matches, &RenderOptions::default()).unwrap();
//! assert_eq!(
//!     html,
//!     "<span class=\"keyword\">fn</span> <span class=\"function\">main</span>() {}"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capture;
pub mod error;
pub mod html;
pub mod splice;

pub use capture::{Capture, Match, class_token};
pub use error::{Error, Result};
pub use html::{Escape, RenderOptions, escape_html, render, render_segments};
pub use splice::{MatchOrder, Segment, splice};
