//! Locale cache: translation tables loaded lazily from per-language JSON
//! files and refreshed when those files change on disk.

pub mod config;
pub mod i18n;

pub use config::CacheConfig;
pub use i18n::{LocaleCache, LocaleError};
