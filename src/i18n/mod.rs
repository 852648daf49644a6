//! Internationalization (i18n) module: cached per-language translation tables.
//!
//! # Architecture
//!
//! - `cache`: `LocaleCache`, the lazily loaded, self-refreshing table cache
//! - `language`: `LanguageId`, the normalized language identifier
//! - `store`: `FileStore`, the filesystem capability the cache polls
//! - `error`: `LocaleError`, failures while loading locale files
//! - `metrics`: per-cache lookup and reload counters
//!
//! # Example
//!
//! ```no_run
//! use locale_cache::i18n::LocaleCache;
//!
//! // Locale files live at ./locale/en, ./locale/fr, ...
//! let cache = LocaleCache::new("app", "./locale/", "en");
//!
//! // Missing keys render as the key itself
//! let title = cache.translate("FR", "menu.title");
//! let table = cache.language_table("fr");
//! ```

mod cache;
mod error;
mod language;
mod metrics;
mod store;

pub use cache::{
    LocaleCache, ReloadOutcome, Table, DEFAULT_LANGUAGE, DEFAULT_LOCALE_PATH, DEFAULT_NAME,
};
pub use error::{LocaleError, Result};
pub use language::LanguageId;
pub use metrics::{CacheMetrics, MetricsReport};
pub use store::{FileStore, FsStore};
