//! Parsing engine abstraction.
//!
//! The session never talks to a parsing library directly. It drives an
//! [`Engine`], which owns the parser and knows how to turn artifacts into
//! grammars, query sources into compiled queries, and query results into
//! engine-neutral [`Match`] values.
//!
//! Two implementations exist:
//!
//! - [`TreeSitterEngine`]: the real engine, backed by tree-sitter
//! - [`MockEngine`]: a word-table engine for tests (`cfg(test)` or the
//!   `test-util` feature)

#[cfg(any(test, feature = "test-util"))]
mod mock;
mod treesitter;

#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockEngine, MockGrammar, MockQuery, MockTree};
pub use treesitter::TreeSitterEngine;

use crate::error::Result;
use treelight_render::Match;

/// A grammar artifact as delivered by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarArtifact {
    /// Use the grammar compiled into the binary under the language's name.
    Bundled,
    /// A compiled grammar module (the bytes of `grammar.wasm`).
    Module(Vec<u8>),
}

impl GrammarArtifact {
    /// Short description used in log output.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled".to_string(),
            Self::Module(bytes) => format!("module ({} bytes)", bytes.len()),
        }
    }
}

/// Capability interface over a parsing engine.
///
/// An engine holds one parser. [`activate`](Engine::activate) points the
/// parser at a grammar; [`parse`](Engine::parse) always uses the most recently
/// activated one. A query is only valid against trees produced by the grammar
/// it was compiled for; the session upholds that pairing.
pub trait Engine: Sized {
    /// Compiled language definition.
    type Grammar;
    /// Compiled highlight query.
    type Query;
    /// Parsed syntax tree.
    type Tree;

    /// Construct the engine. Called once per session, on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying library cannot be initialized.
    fn init() -> Result<Self>;

    /// Load a grammar from its artifact.
    ///
    /// # Errors
    ///
    /// Returns `Error::GrammarLoad`, `Error::UnknownLanguage` or
    /// `Error::WasmUnsupported` if the artifact cannot be turned into a grammar.
    fn load_grammar(&mut self, language: &str, artifact: &GrammarArtifact) -> Result<Self::Grammar>;

    /// Compile highlight query source against a grammar.
    ///
    /// # Errors
    ///
    /// Returns `Error::QueryCompile` if the source is invalid for this grammar.
    fn compile_query(
        &self,
        language: &str,
        grammar: &Self::Grammar,
        source: &str,
    ) -> Result<Self::Query>;

    /// Make `grammar` the one used by subsequent [`parse`](Engine::parse) calls.
    ///
    /// # Errors
    ///
    /// Returns `Error::GrammarLoad` if the parser rejects the grammar.
    fn activate(&mut self, language: &str, grammar: &Self::Grammar) -> Result<()>;

    /// Parse text with the active grammar. Returns `None` if no tree was produced.
    fn parse(&mut self, text: &str) -> Option<Self::Tree>;

    /// Run a query over the whole tree, in engine order.
    fn matches(&self, query: &Self::Query, tree: &Self::Tree, text: &str) -> Vec<Match>;
}
