//! Treelight - tree-sitter highlight sessions for code snippets.
//!
//! A [`Session`] loads a grammar and its highlight query from a
//! [`provider::GrammarProvider`], parses text with the grammar, runs the
//! query and renders the captures as `<span class="...">` markup through
//! [`treelight_render`].
//!
//! The crate also ships the `treelight` binary, which highlights files from
//! the command line and generates matching stylesheets from Base24 color
//! schemes.

#![forbid(unsafe_code)]

pub mod bundled;
pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod session;
pub mod theme;

// Public CLI module (needed by binary)
pub mod cli;

pub(crate) mod output;

pub use error::{Error, Result};
pub use session::{Session, SessionHandle};
