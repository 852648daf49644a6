//! Language identifier: normalized, case-insensitive language codes.
//!
//! Every cache operation goes through `LanguageId` so that "EN", " en " and
//! "en" resolve to the same entry and the same locale file. Surrounding
//! whitespace is trimmed before the identifier is appended to the locale
//! path, so " en" reads `base_path + "en"` rather than `base_path + " en"`.

use std::fmt;

/// A normalized language identifier (e.g. "en", "zh-cn").
///
/// The identifier is always trimmed and lowercased. An empty identifier is
/// valid and stands for "the default language" when reloading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LanguageId(String);

impl LanguageId {
    /// Create a language identifier from a raw, caller-supplied code.
    ///
    /// # Example
    /// ```
    /// use locale_cache::i18n::LanguageId;
    ///
    /// assert_eq!(LanguageId::new(" ZH-CN ").as_str(), "zh-cn");
    /// ```
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
