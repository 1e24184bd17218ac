// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server-driven options for the typeahead controller
//!
//! [`AsyncTypeahead`] wraps a [`Typeahead`] and turns keystrokes into
//! debounced search requests. Results are cached by exact query, and the
//! menu's empty-state text tracks whether the user has typed anything and
//! whether a search is in flight.
//!
//! The host drives it like this:
//!
//! ```no_run
//! # use ta_async::{AsyncConfig, AsyncTypeahead, SearchDispatch};
//! # use ta_core::{Typeahead, TypeaheadConfig};
//! # async fn run() {
//! let typeahead = Typeahead::builder(TypeaheadConfig::default()).build();
//! let mut search = AsyncTypeahead::new(typeahead, AsyncConfig::default(), |query: &str| {
//!     println!("fetching {query}");
//! });
//! search.update_input_text("rus");
//! if let Some(SearchDispatch::Dispatched(query)) = search.next_search().await {
//!     search.receive_results(&query, vec!["rust".into()]);
//! }
//! # }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use ta_core::{Item, Typeahead};

pub const DEFAULT_DELAY_MS: u64 = 200;
pub const DEFAULT_PROMPT_TEXT: &str = "Type to search...";
pub const DEFAULT_SEARCH_TEXT: &str = "Searching...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AsyncConfig {
    /// Quiet period after the last keystroke before searching
    pub delay_ms: u64,
    /// Reuse results for queries already searched
    pub use_cache: bool,
    /// Empty-state text while nothing has been typed
    pub prompt_text: String,
    /// Empty-state text while a search is running
    pub search_text: String,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            use_cache: true,
            prompt_text: DEFAULT_PROMPT_TEXT.to_string(),
            search_text: DEFAULT_SEARCH_TEXT.to_string(),
        }
    }
}

impl AsyncConfig {
    pub fn from_toml_str(source: &str) -> ta_core::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Receiver of search requests. Results come back through
/// [`AsyncTypeahead::receive_results`].
pub trait SearchHandler: Send {
    fn on_search(&mut self, query: &str);
}

impl<F> SearchHandler for F
where
    F: FnMut(&str) + Send,
{
    fn on_search(&mut self, query: &str) {
        self(query)
    }
}

/// What happened to a debounced query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDispatch {
    /// Empty or shorter than `min-length`.
    Skipped,
    /// Served from the cache; the handler was not called.
    Cached,
    /// The handler was called with this query.
    Dispatched(String),
}

pub struct AsyncTypeahead<H: SearchHandler> {
    typeahead: Typeahead,
    config: AsyncConfig,
    handler: H,
    cache: HashMap<String, Vec<Item>>,
    query: String,
    is_loading: bool,
    empty_label: String,
    debounce: Option<JoinHandle<()>>,
    query_tx: mpsc::UnboundedSender<String>,
    query_rx: mpsc::UnboundedReceiver<String>,
}

impl<H: SearchHandler> AsyncTypeahead<H> {
    pub fn new(typeahead: Typeahead, config: AsyncConfig, handler: H) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let query = typeahead.text().to_string();
        let empty_label = typeahead.config().empty_label.clone();
        let mut adapter = Self {
            typeahead,
            config,
            handler,
            cache: HashMap::new(),
            query,
            is_loading: false,
            empty_label,
            debounce: None,
            query_tx,
            query_rx,
        };
        adapter.sync_empty_label();
        adapter
    }

    pub fn typeahead(&self) -> &Typeahead {
        &self.typeahead
    }

    /// Direct access for selection, focus and keyboard handling. None of
    /// these start a search.
    pub fn typeahead_mut(&mut self) -> &mut Typeahead {
        &mut self.typeahead
    }

    pub fn config(&self) -> &AsyncConfig {
        &self.config
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn cached(&self, query: &str) -> Option<&[Item]> {
        self.cache.get(query).map(Vec::as_slice)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Text typed by the user. Restarts the debounce timer.
    pub fn update_input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.typeahead.update_input_text(text.clone());
        self.query = text.clone();

        if self.config.use_cache {
            if let Some(cached) = self.cache.get(&text) {
                self.typeahead.set_options(cached.clone());
                self.set_loading(false);
            }
        }
        self.sync_empty_label();
        self.schedule(text);
    }

    /// Clear the selection and text, drop any pending search and show the
    /// prompt again.
    pub fn clear(&mut self) {
        if let Some(pending) = self.debounce.take() {
            pending.abort();
        }
        self.typeahead.clear();
        self.query.clear();
        self.set_loading(false);
    }

    fn schedule(&mut self, query: String) {
        if let Some(pending) = self.debounce.take() {
            pending.abort();
        }
        match Handle::try_current() {
            Ok(handle) => {
                let tx = self.query_tx.clone();
                let delay = self.config.delay();
                debug!(query = %query, delay_ms = self.config.delay_ms, "Scheduling typeahead search");
                self.debounce = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(query);
                }));
            }
            Err(_) => {
                let _ = self.query_tx.send(query);
            }
        }
    }

    /// Wait for the debounce to elapse and dispatch the query.
    ///
    /// Queries superseded by later keystrokes are dropped.
    pub async fn next_search(&mut self) -> Option<SearchDispatch> {
        loop {
            let query = self.query_rx.recv().await?;
            if query != self.query {
                debug!(query = %query, current = %self.query, "Dropping superseded search");
                continue;
            }
            return Some(self.dispatch(query));
        }
    }

    fn dispatch(&mut self, query: String) -> SearchDispatch {
        let min_length = self.typeahead.config().min_length;
        if query.is_empty() || query.chars().count() < min_length {
            self.set_loading(false);
            return SearchDispatch::Skipped;
        }

        if self.config.use_cache {
            if let Some(cached) = self.cache.get(&query) {
                self.typeahead.set_options(cached.clone());
                self.set_loading(false);
                return SearchDispatch::Cached;
            }
        }

        self.handler.on_search(&query);
        self.set_loading(true);
        SearchDispatch::Dispatched(query)
    }

    /// Results for `query`. Cached regardless; applied only while `query`
    /// is still the current one.
    pub fn receive_results(&mut self, query: &str, options: Vec<Item>) {
        if self.config.use_cache {
            self.cache.insert(query.to_string(), options.clone());
        }
        if query != self.query {
            debug!(query = %query, current = %self.query, "Ignoring stale search results");
            return;
        }
        self.typeahead.set_options(options);
        self.set_loading(false);
    }

    /// The search for `query` failed; stop showing it as in flight.
    pub fn search_failed(&mut self, query: &str) {
        if query == self.query {
            self.set_loading(false);
        }
    }

    fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
        self.typeahead.set_loading(is_loading);
        self.sync_empty_label();
    }

    fn sync_empty_label(&mut self) {
        let label = if self.typeahead.text().is_empty() {
            &self.config.prompt_text
        } else if self.is_loading {
            &self.config.search_text
        } else {
            &self.empty_label
        };
        if self.typeahead.config().empty_label != *label {
            let label = label.clone();
            self.typeahead.set_empty_label(label);
        }
    }
}

impl<H: SearchHandler> Drop for AsyncTypeahead<H> {
    fn drop(&mut self) {
        if let Some(pending) = self.debounce.take() {
            pending.abort();
        }
    }
}
