//! Tree-sitter backed [`Engine`].
//!
//! Bundled grammars come from the grammar crates linked into the binary.
//! Grammar modules (`grammar.wasm`) are loaded through tree-sitter's wasm
//! store, which is only available with the `wasm` feature.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor, Tree};
use treelight_render::{Capture, Match};

use super::{Engine, GrammarArtifact};
use crate::bundled;
use crate::error::{Error, Result};

/// A tree-sitter parser plus, with the `wasm` feature, the wasmtime engine
/// that grammar modules are instantiated in.
pub struct TreeSitterEngine {
    parser: Parser,
    #[cfg(feature = "wasm")]
    wasm_engine: tree_sitter::wasmtime::Engine,
}

impl std::fmt::Debug for TreeSitterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterEngine")
            .field("parser", &"<tree_sitter::Parser>")
            .finish()
    }
}

impl TreeSitterEngine {
    #[cfg(feature = "wasm")]
    fn load_module(&mut self, language: &str, bytes: &[u8]) -> Result<Language> {
        use tree_sitter::WasmStore;

        let load_error = |message: String| Error::GrammarLoad {
            language: language.to_string(),
            message,
        };

        // Languages must be loaded into the same store the parser runs with.
        let mut store = match self.parser.take_wasm_store() {
            Some(store) => store,
            None => WasmStore::new(&self.wasm_engine).map_err(|e| load_error(format!("{e:?}")))?,
        };
        let loaded = store.load_language(language, bytes);
        self.parser
            .set_wasm_store(store)
            .map_err(|e| load_error(e.to_string()))?;
        loaded.map_err(|e| load_error(format!("{e:?}")))
    }

    #[cfg(not(feature = "wasm"))]
    #[allow(clippy::unused_self)]
    fn load_module(&mut self, language: &str, _bytes: &[u8]) -> Result<Language> {
        Err(Error::WasmUnsupported {
            language: language.to_string(),
        })
    }
}

impl Engine for TreeSitterEngine {
    type Grammar = Language;
    type Query = Query;
    type Tree = Tree;

    fn init() -> Result<Self> {
        tracing::debug!("Initializing tree-sitter parser");
        Ok(Self {
            parser: Parser::new(),
            #[cfg(feature = "wasm")]
            wasm_engine: tree_sitter::wasmtime::Engine::default(),
        })
    }

    fn load_grammar(&mut self, language: &str, artifact: &GrammarArtifact) -> Result<Language> {
        match artifact {
            GrammarArtifact::Bundled => bundled::language(language)
                .ok_or_else(|| Error::UnknownLanguage(language.to_string())),
            GrammarArtifact::Module(bytes) => self.load_module(language, bytes),
        }
    }

    fn compile_query(&self, language: &str, grammar: &Language, source: &str) -> Result<Query> {
        Query::new(grammar, source).map_err(|e| Error::QueryCompile {
            language: language.to_string(),
            message: e.to_string(),
        })
    }

    fn activate(&mut self, language: &str, grammar: &Language) -> Result<()> {
        self.parser
            .set_language(grammar)
            .map_err(|e| Error::GrammarLoad {
                language: language.to_string(),
                message: e.to_string(),
            })
    }

    fn parse(&mut self, text: &str) -> Option<Tree> {
        self.parser.parse(text, None)
    }

    fn matches(&self, query: &Query, tree: &Tree, text: &str) -> Vec<Match> {
        let names = query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut found = Vec::new();

        let mut matches = cursor.matches(query, tree.root_node(), text.as_bytes());
        while let Some(query_match) = matches.next() {
            let captures = query_match
                .captures
                .iter()
                .map(|capture| {
                    let range = capture.node.byte_range();
                    Capture {
                        name: names[capture.index as usize].to_string(),
                        // Out-of-range or split-char spans are rejected when spliced.
                        text: text.get(range.clone()).unwrap_or_default().to_string(),
                        start: range.start,
                        end: range.end,
                    }
                })
                .collect();
            found.push(Match::new(captures));
        }

        found
    }
}
