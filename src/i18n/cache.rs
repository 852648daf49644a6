//! Translation cache: per-language tables loaded lazily from locale files.
//!
//! Each locale file lives at `base_path + language` and holds a flat JSON
//! object of translation keys to strings. Tables are loaded on first use and
//! reloaded whenever the file's modification time moves past the one
//! recorded at load time. Staleness is only checked on access.
//!
//! # Concurrency
//!
//! One `RwLock` guards the map from language to `Entry`, and an entry holds
//! both the table and its freshness timestamp, so the pair is always
//! installed together. Tables are immutable `Arc` snapshots replaced
//! wholesale. No lock is held across file I/O; two readers that observe the
//! same stale entry may both reload it (at-least-once reload per staleness
//! event, last writer wins).

use crate::config::CacheConfig;
use crate::i18n::error::{LocaleError, Result};
use crate::i18n::{CacheMetrics, FileStore, FsStore, LanguageId};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Translation table for one language: key -> localized string.
pub type Table = HashMap<String, String>;

/// Display name used when none is supplied
pub const DEFAULT_NAME: &str = "locale-cache";

/// Locale directory used when none is supplied (trailing separator included)
pub const DEFAULT_LOCALE_PATH: &str = "./locale/";

/// Default language used when none is supplied
pub const DEFAULT_LANGUAGE: &str = "zh-cn";

/// Result of a successful `LocaleCache::reload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The cached entry is up to date; nothing was read
    Fresh,

    /// The locale file was read and its table installed
    Loaded,

    /// The locale file is unreadable, but the default language is loaded
    /// and serves in its place
    Degraded,
}

#[derive(Debug, Clone)]
struct Entry {
    table: Arc<Table>,
    /// Modification time of the file this table was loaded from
    modified: i64,
}

/// Where a lookup found its table.
enum Lookup {
    Own(Arc<Table>),
    Fallback(Option<Arc<Table>>),
}

/// In-memory cache of translation tables backed by a `FileStore`.
#[derive(Debug)]
pub struct LocaleCache<S = FsStore> {
    name: String,
    base_path: String,
    default_language: LanguageId,
    store: S,
    entries: RwLock<HashMap<LanguageId, Entry>>,
    metrics: CacheMetrics,
}

impl LocaleCache<FsStore> {
    /// Create a cache reading locale files from the local filesystem.
    ///
    /// Empty arguments are replaced by `DEFAULT_NAME`, `DEFAULT_LOCALE_PATH`
    /// and `DEFAULT_LANGUAGE`. No file is touched until the first lookup.
    ///
    /// # Example
    /// ```no_run
    /// use locale_cache::i18n::LocaleCache;
    ///
    /// let cache = LocaleCache::new("app", "./locale/", "en");
    /// let greeting = cache.translate("fr", "hello");
    /// ```
    pub fn new(name: &str, base_path: &str, default_language: &str) -> Self {
        Self::with_store(name, base_path, default_language, FsStore)
    }

    /// Create a filesystem-backed cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            &config.name,
            &config.locale_path,
            &config.default_language,
        )
    }
}

impl<S: FileStore> LocaleCache<S> {
    /// Create a cache over a custom file store.
    pub fn with_store(name: &str, base_path: &str, default_language: &str, store: S) -> Self {
        let name = if name.is_empty() { DEFAULT_NAME } else { name };
        let base_path = if base_path.is_empty() {
            DEFAULT_LOCALE_PATH
        } else {
            base_path
        };
        let mut default_language = LanguageId::new(default_language);
        if default_language.is_empty() {
            default_language = LanguageId::new(DEFAULT_LANGUAGE);
        }

        Self {
            name: name.to_string(),
            base_path: base_path.to_string(),
            default_language,
            store,
            entries: RwLock::new(HashMap::new()),
            metrics: CacheMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn default_language(&self) -> &LanguageId {
        &self.default_language
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Languages that currently have a loaded table, sorted.
    pub fn loaded_languages(&self) -> Vec<LanguageId> {
        let mut languages: Vec<_> = self.read_entries().keys().cloned().collect();
        languages.sort();
        languages
    }

    /// Modification time recorded when `lang` was last loaded.
    pub fn freshness(&self, lang: &str) -> Option<i64> {
        self.cached(&self.resolve(LanguageId::new(lang)))
            .map(|entry| entry.modified)
    }

    /// Get the full translation table for a language.
    ///
    /// Reloads the table first if it is missing or its file changed. When the
    /// reload fails, returns the default language's table, or an empty table
    /// if the default was never loaded. A language whose file merely became
    /// unreadable keeps its cached table. Never fails.
    pub fn language_table(&self, lang: &str) -> Arc<Table> {
        match self.lookup(&LanguageId::new(lang)) {
            Lookup::Own(table) => table,
            Lookup::Fallback(table) => table.unwrap_or_default(),
        }
    }

    /// Translate `key` into `lang`.
    ///
    /// A key missing from the language's table translates to itself. When the
    /// language's table cannot be (re)loaded, the default language's
    /// translation is used, and failing that the key itself. Never fails.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        let translated = match self.lookup(&LanguageId::new(lang)) {
            Lookup::Own(table) => table.get(key).cloned(),
            Lookup::Fallback(table) => table.and_then(|table| table.get(key).cloned()),
        };

        translated.unwrap_or_else(|| {
            self.metrics.record_missing_key();
            key.to_string()
        })
    }

    /// Load `lang`'s locale file unless its cached table is fresh.
    ///
    /// An empty `lang` means the default language. A table is fresh when the
    /// file's modification time is not newer than the recorded one; a
    /// language with no table is always read.
    ///
    /// # Errors
    /// * `FileUnavailable` if the file cannot be read and the default
    ///   language has no table to fall back on
    /// * `Decode` if the file is not a flat JSON object of strings; the
    ///   previously cached table is kept
    pub fn reload(&self, lang: &str) -> Result<ReloadOutcome> {
        let lang = self.resolve(LanguageId::new(lang));
        self.reload_language(&lang)
    }

    /// Load the default language and each of `languages`.
    ///
    /// Failures are logged and returned; none of them stop the remaining
    /// languages from loading.
    pub fn preload(&self, languages: &[&str]) -> Vec<(LanguageId, LocaleError)> {
        let mut failures = Vec::new();
        let default = self.default_language.clone();

        let requested = languages
            .iter()
            .map(|lang| LanguageId::from(*lang))
            .filter(|lang| !lang.is_empty() && *lang != default);

        for lang in std::iter::once(default.clone()).chain(requested) {
            match self.reload_language(&lang) {
                Ok(outcome) => debug!("Preloaded {} ({:?})", lang, outcome),
                Err(e) => {
                    warn!("Failed to preload language {}: {}", lang, e);
                    failures.push((lang, e));
                }
            }
        }

        failures
    }

    fn lookup(&self, lang: &LanguageId) -> Lookup {
        self.metrics.record_lookup();
        let lang = self.resolve(lang.clone());
        let path = self.path_for(&lang);
        let modified = self.store.modified(&path);
        let cached = self.cached(&lang);

        if let Some(entry) = &cached {
            if !is_stale(entry, &modified) {
                self.metrics.record_cache_hit();
                return Lookup::Own(Arc::clone(&entry.table));
            }
        }

        match self.reload_with(&lang, path, modified) {
            Ok(ReloadOutcome::Fresh | ReloadOutcome::Loaded) => {
                if let Some(entry) = self.cached(&lang) {
                    return Lookup::Own(entry.table);
                }
            }
            // Unreadable file: the cached table, if any, is still the latest
            Ok(ReloadOutcome::Degraded) => {
                if let Some(entry) = cached {
                    return Lookup::Own(entry.table);
                }
            }
            Err(e) => {
                warn!("Serving fallback for language {}: {}", lang, e);
                // The default language has nothing else to fall back to
                if lang == self.default_language {
                    if let Some(entry) = cached {
                        return Lookup::Own(entry.table);
                    }
                }
            }
        }

        self.metrics.record_fallback();
        debug!(
            "Falling back from {} to default language {}",
            lang, self.default_language
        );
        Lookup::Fallback(self.cached(&self.default_language).map(|entry| entry.table))
    }

    fn reload_language(&self, lang: &LanguageId) -> Result<ReloadOutcome> {
        let path = self.path_for(lang);
        if path.is_empty() {
            return Err(LocaleError::EmptyPath);
        }

        let modified = self.store.modified(&path);
        self.reload_with(lang, path, modified)
    }

    /// Reload `lang` from `path` given an already taken stat of the file.
    fn reload_with(
        &self,
        lang: &LanguageId,
        path: String,
        modified: io::Result<i64>,
    ) -> Result<ReloadOutcome> {
        if let (Ok(mtime), Some(entry)) = (&modified, self.cached(lang)) {
            if *mtime <= entry.modified {
                debug!("Language {} is fresh (mtime {})", lang, mtime);
                return Ok(ReloadOutcome::Fresh);
            }
        }

        let data = match self.store.read(&path) {
            Ok(data) => data,
            Err(source) => {
                self.metrics.record_reload_failure();
                if self.cached(&self.default_language).is_some() {
                    warn!(
                        "Language file {} unavailable ({}), using default language {}",
                        path, source, self.default_language
                    );
                    return Ok(ReloadOutcome::Degraded);
                }
                return Err(LocaleError::FileUnavailable { path, source });
            }
        };

        let table: Table = serde_json::from_slice(&data).map_err(|source| {
            self.metrics.record_reload_failure();
            LocaleError::Decode {
                path: path.clone(),
                source,
            }
        })?;

        // Unknown mtime: the next successful stat marks the entry stale
        let modified = modified.unwrap_or_default();
        let keys = table.len();
        self.write_entries().insert(
            lang.clone(),
            Entry {
                table: Arc::new(table),
                modified,
            },
        );
        self.metrics.record_reload();

        info!(
            "Loaded {} translations for {} from {} (mtime {})",
            keys, lang, path, modified
        );
        Ok(ReloadOutcome::Loaded)
    }

    fn resolve(&self, lang: LanguageId) -> LanguageId {
        if lang.is_empty() {
            self.default_language.clone()
        } else {
            lang
        }
    }

    fn path_for(&self, lang: &LanguageId) -> String {
        format!("{}{}", self.base_path, lang)
    }

    fn cached(&self, lang: &LanguageId) -> Option<Entry> {
        self.read_entries().get(lang).cloned()
    }

    // Entries are immutable snapshots, so a panic elsewhere cannot leave the
    // map half-written and a poisoned lock is safe to reuse.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<LanguageId, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<LanguageId, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A cached entry is stale only when its file is known to be newer.
fn is_stale(entry: &Entry, modified: &io::Result<i64>) -> bool {
    match modified {
        Ok(mtime) => *mtime > entry.modified,
        Err(_) => false,
    }
}
