//! Word-table engine for tests.
//!
//! A mock grammar module is UTF-8 text with one `word capture` pair per line,
//! e.g. `fn keyword`. Lines starting with `;` are comments. A module whose
//! first line is `!invalid` fails to load. Like tree-sitter's wasm store,
//! loading any module detaches the parser's active grammar, successful or
//! not.
//!
//! A mock query lists capture names, one per line, optionally prefixed with
//! `@`. Every name must be defined by the grammar the query is compiled
//! against, which models a query being bound to one grammar.
//!
//! Parsing splits the text into runs of alphanumerics and `_`; every run the
//! active grammar knows becomes a token. Matching yields one single-capture
//! match per token whose capture the query selects, in text order.

use std::sync::atomic::{AtomicUsize, Ordering};

use treelight_render::{Capture, Match};

use super::{Engine, GrammarArtifact};
use crate::error::{Error, Result};

static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(1);

/// A word table bound to a language name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGrammar {
    language: String,
    words: Vec<(String, String)>,
}

impl MockGrammar {
    fn capture_for(&self, word: &str) -> Option<&str> {
        self.words
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, capture)| capture.as_str())
    }
}

/// Capture names selected by a query, bound to a language name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockQuery {
    language: String,
    captures: Vec<String>,
}

/// Tokens found by [`MockEngine::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTree {
    language: String,
    tokens: Vec<(usize, usize, String)>,
}

/// Test double for [`Engine`].
#[derive(Debug)]
pub struct MockEngine {
    instance: usize,
    active: Option<MockGrammar>,
}

impl MockEngine {
    /// Unique id of this engine instance. Distinct across `init` calls.
    #[must_use]
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// Build a grammar module from `(word, capture)` pairs.
    #[must_use]
    pub fn module(words: &[(&str, &str)]) -> GrammarArtifact {
        let text: String = words
            .iter()
            .map(|(word, capture)| format!("{word} {capture}\n"))
            .collect();
        GrammarArtifact::Module(text.into_bytes())
    }
}

impl Engine for MockEngine {
    type Grammar = MockGrammar;
    type Query = MockQuery;
    type Tree = MockTree;

    fn init() -> Result<Self> {
        Ok(Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            active: None,
        })
    }

    fn load_grammar(&mut self, language: &str, artifact: &GrammarArtifact) -> Result<MockGrammar> {
        let load_error = |message: &str| Error::GrammarLoad {
            language: language.to_string(),
            message: message.to_string(),
        };

        let GrammarArtifact::Module(bytes) = artifact else {
            return Err(Error::UnknownLanguage(language.to_string()));
        };
        self.active = None;
        let text = std::str::from_utf8(bytes).map_err(|_| load_error("module is not UTF-8"))?;
        if text.lines().next() == Some("!invalid") {
            return Err(load_error("module marked invalid"));
        }

        let mut words = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let (word, capture) = line
                .split_once(' ')
                .ok_or_else(|| load_error("expected `word capture`"))?;
            words.push((word.to_string(), capture.trim().to_string()));
        }

        Ok(MockGrammar {
            language: language.to_string(),
            words,
        })
    }

    fn compile_query(
        &self,
        language: &str,
        grammar: &MockGrammar,
        source: &str,
    ) -> Result<MockQuery> {
        let mut captures = Vec::new();
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let name = line.trim_start_matches('@');
            if !grammar.words.iter().any(|(_, capture)| capture == name) {
                return Err(Error::QueryCompile {
                    language: language.to_string(),
                    message: format!("capture '{name}' is not defined by the grammar"),
                });
            }
            captures.push(name.to_string());
        }

        Ok(MockQuery {
            language: grammar.language.clone(),
            captures,
        })
    }

    fn activate(&mut self, _language: &str, grammar: &MockGrammar) -> Result<()> {
        self.active = Some(grammar.clone());
        Ok(())
    }

    fn parse(&mut self, text: &str) -> Option<MockTree> {
        let grammar = self.active.as_ref()?;
        let mut tokens = Vec::new();
        let mut word_start = None;

        let boundary = text.len();
        for (i, c) in text.char_indices().chain(std::iter::once((boundary, ' '))) {
            let is_word = i < boundary && (c.is_alphanumeric() || c == '_');
            match (word_start, is_word) {
                (None, true) => word_start = Some(i),
                (Some(start), false) => {
                    if let Some(capture) = grammar.capture_for(&text[start..i]) {
                        tokens.push((start, i, capture.to_string()));
                    }
                    word_start = None;
                }
                _ => {}
            }
        }

        Some(MockTree {
            language: grammar.language.clone(),
            tokens,
        })
    }

    fn matches(&self, query: &MockQuery, tree: &MockTree, text: &str) -> Vec<Match> {
        if query.language != tree.language {
            return Vec::new();
        }
        tree.tokens
            .iter()
            .filter(|(_, _, capture)| query.captures.contains(capture))
            .filter_map(|(start, end, capture)| {
                Capture::from_source(capture.as_str(), text, *start, *end)
            })
            .map(Match::single)
            .collect()
    }
}
