//! Highlight sessions.
//!
//! A [`Session`] owns one lazily constructed [`Engine`], the provider it
//! pulls artifacts from, and the active `{grammar, query}` pair. Switching
//! languages and highlighting both take `&mut self`, so a single owner can
//! never observe a half-installed language. [`SessionHandle`] is the shared
//! form: a cloneable handle that serializes access behind an async mutex.
//!
//! # Example
//!
//! ```no_run
//! use treelight::provider::BundledProvider;
//! use treelight::session::Session;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session: Session = Session::new(Box::new(BundledProvider));
//!     session.set_language("rust").await?;
//!     println!("{}", session.highlight("fn main() {}")?);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use treelight_render::{Match, RenderOptions};

use crate::engine::{Engine, TreeSitterEngine};
use crate::error::{Error, Result};
use crate::provider::{GrammarProvider, LanguageArtifacts};

/// The installed language: a grammar and the query compiled against it.
struct ActiveLanguage<E: Engine> {
    name: String,
    grammar: E::Grammar,
    query: E::Query,
}

/// A parser session with at most one active language.
pub struct Session<E: Engine = TreeSitterEngine> {
    engine: Option<E>,
    provider: Box<dyn GrammarProvider>,
    active: Option<ActiveLanguage<E>>,
    options: RenderOptions,
}

impl<E: Engine> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("initialized", &self.engine.is_some())
            .field("provider", &self.provider.describe())
            .field("active", &self.active_language())
            .field("options", &self.options)
            .finish()
    }
}

impl<E: Engine> Session<E> {
    /// Create a session. The engine is not constructed until first use.
    pub fn new(provider: Box<dyn GrammarProvider>) -> Self {
        Self {
            engine: None,
            provider,
            active: None,
            options: RenderOptions::default(),
        }
    }

    /// Set the render options used by [`Session::highlight`].
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace the render options.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// The provider artifacts are loaded from.
    pub fn provider(&self) -> &dyn GrammarProvider {
        self.provider.as_ref()
    }

    /// Construct the engine if it does not exist yet.
    ///
    /// Safe to call any number of times; only the first call constructs.
    ///
    /// # Errors
    ///
    /// Propagates the engine's initialization error.
    pub fn initialize(&mut self) -> Result<&mut E> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => E::init()?,
        };
        Ok(self.engine.insert(engine))
    }

    /// Whether the engine has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// The engine, if constructed.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Name of the active language.
    pub fn active_language(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.name.as_str())
    }

    /// Fetch, compile and install a language.
    ///
    /// Loads the grammar and highlight query from the provider, loads the
    /// grammar into the engine, compiles the query against it and points the
    /// parser at the grammar. The session state is swapped only after every
    /// step succeeded; on failure the previously active language stays
    /// installed.
    ///
    /// # Errors
    ///
    /// Propagates provider errors (fetch, IO, unknown or invalid name) and
    /// engine errors (grammar load, query compile).
    pub async fn set_language(&mut self, language: &str) -> Result<()> {
        self.initialize()?;

        let artifacts = self.provider.load(language).await?;
        tracing::debug!(
            language,
            grammar = %artifacts.grammar.describe(),
            query_bytes = artifacts.highlights.len(),
            "Loaded language artifacts"
        );

        let engine = self.initialize()?;
        let installed = install(engine, language, &artifacts);
        let (grammar, query) = match installed {
            Ok(pair) => pair,
            Err(e) => {
                // Loading a grammar module may detach the parser's language.
                if let (Some(engine), Some(active)) = (self.engine.as_mut(), &self.active)
                    && let Err(restore) = engine.activate(&active.name, &active.grammar)
                {
                    tracing::warn!(
                        language = %active.name,
                        error = %restore,
                        "Failed to restore previous language"
                    );
                }
                return Err(e);
            }
        };

        let previous = self.active.replace(ActiveLanguage {
            name: language.to_string(),
            grammar,
            query,
        });
        tracing::debug!(
            language,
            previous = previous.as_ref().map(|p| p.name.as_str()),
            "Switched active language"
        );
        Ok(())
    }

    /// Parse `text` and run the active query, returning matches in engine order.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveLanguage` before a successful
    /// [`set_language`](Session::set_language), or `Error::Parse` if the
    /// engine produced no tree.
    pub fn matches(&mut self, text: &str) -> Result<Vec<Match>> {
        let active = self.active.as_ref().ok_or(Error::NoActiveLanguage)?;
        let engine = self.engine.as_mut().ok_or(Error::NoActiveLanguage)?;

        let tree = engine.parse(text).ok_or_else(|| Error::Parse {
            language: active.name.clone(),
        })?;
        let matches = engine.matches(&active.query, &tree, text);
        tracing::trace!(
            language = %active.name,
            bytes = text.len(),
            matches = matches.len(),
            "Ran highlight query"
        );
        Ok(matches)
    }

    /// Highlight `text` with the active language.
    ///
    /// # Errors
    ///
    /// Same as [`Session::matches`], plus `Error::Render` if the engine
    /// reported a capture that does not fit the text. No partial output is
    /// returned.
    pub fn highlight(&mut self, text: &str) -> Result<String> {
        let matches = self.matches(text)?;
        Ok(treelight_render::render(text, &matches, &self.options)?)
    }
}

/// Load, compile and activate a language without touching session state.
fn install<E: Engine>(
    engine: &mut E,
    language: &str,
    artifacts: &LanguageArtifacts,
) -> Result<(E::Grammar, E::Query)> {
    let grammar = engine.load_grammar(language, &artifacts.grammar)?;
    let query = engine.compile_query(language, &grammar, &artifacts.highlights)?;
    engine.activate(language, &grammar)?;
    Ok((grammar, query))
}

/// Shared, cloneable access to one [`Session`].
///
/// Every operation takes the session lock for its whole duration, so a
/// language switch and a highlight never interleave. Concurrent switches
/// complete one after the other; the last to finish wins.
pub struct SessionHandle<E: Engine = TreeSitterEngine> {
    inner: Arc<Mutex<Session<E>>>,
}

impl<E: Engine> Clone for SessionHandle<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Engine> SessionHandle<E> {
    /// Wrap a session for shared use.
    pub fn new(session: Session<E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// See [`Session::set_language`].
    ///
    /// # Errors
    ///
    /// Same as [`Session::set_language`].
    pub async fn set_language(&self, language: &str) -> Result<()> {
        self.inner.lock().await.set_language(language).await
    }

    /// See [`Session::highlight`].
    ///
    /// # Errors
    ///
    /// Same as [`Session::highlight`].
    pub async fn highlight(&self, text: &str) -> Result<String> {
        self.inner.lock().await.highlight(text)
    }

    /// Name of the active language.
    pub async fn active_language(&self) -> Option<String> {
        self.inner.lock().await.active_language().map(ToString::to_string)
    }
}
