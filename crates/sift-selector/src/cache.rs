//! Parsed-selector cache.
//!
//! Stylesheets and scraping scripts repeat the same selectors many times.
//! [`SelectorCache`] parses each distinct source string once and hands out
//! shared references to the result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::SelectorParser;
use crate::selector::SelectorGroup;

/// Thread-safe map from selector source to its parsed [`SelectorGroup`].
///
/// Parsing happens under the lock, so each key is parsed at most once even
/// when several threads ask for it together. Failed parses are not stored.
#[derive(Debug, Default)]
pub struct SelectorCache {
    parser: SelectorParser,
    entries: Mutex<HashMap<String, Arc<SelectorGroup>>>,
}

impl SelectorCache {
    /// Empty cache using default parser limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache whose entries are parsed with `config`.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: SelectorParser::new(config),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The cached group for `source`, parsing and storing it on first use.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `source` is malformed. Nothing is cached
    /// in that case, so a later call reports the error again.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<SelectorGroup>> {
        let mut entries = self.lock();
        if let Some(group) = entries.get(source) {
            return Ok(Arc::clone(group));
        }
        let group = Arc::new(self.parser.parse_group(source)?);
        let _ = entries.insert(source.to_owned(), Arc::clone(&group));
        Ok(group)
    }

    /// Whether `source` has a cached entry.
    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.lock().contains_key(source)
    }

    /// Number of cached selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry. Groups already handed out stay valid.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<SelectorGroup>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
