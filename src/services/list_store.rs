use std::future::Future;
use tracing::debug;

use super::error_handling::BoardError;

/// Client-side cache of one entity list.
///
/// A refresh replaces the whole collection on success and leaves it untouched
/// on failure. The loading flag always ends `false`, whatever the outcome.
#[derive(Debug, Clone)]
pub struct ListStore<T> {
    items: Vec<T>,
    is_loading: bool,
    loaded: bool,
    last_error: Option<BoardError>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            loaded: false,
            last_error: None,
        }
    }
}

impl<T> ListStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether any refresh has ever succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&BoardError> {
        self.last_error.as_ref()
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn begin_refresh(&mut self) {
        self.is_loading = true;
    }

    /// Apply the outcome of a fetch started with [`begin_refresh`](Self::begin_refresh).
    pub fn finish_refresh(&mut self, result: Result<Vec<T>, BoardError>) -> Result<(), BoardError> {
        self.is_loading = false;
        match result {
            Ok(items) => {
                debug!(count = items.len(), "List store replaced");
                self.items = items;
                self.loaded = true;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, kept = self.items.len(), "List store kept stale contents");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Run `fetch` and replace the cached list with its result.
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> Result<&[T], BoardError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, BoardError>>,
    {
        self.begin_refresh();
        let result = fetch().await;
        self.finish_refresh(result)?;
        Ok(&self.items)
    }
}
