//! Errors raised while loading locale files.
//!
//! None of these reach callers of `translate` or `language_table`; they only
//! surface from `LocaleCache::reload` and `LocaleCache::preload`.

use std::io;
use thiserror::Error;

/// Result alias for locale loading operations.
pub type Result<T> = std::result::Result<T, LocaleError>;

#[derive(Debug, Error)]
pub enum LocaleError {
    /// The locale file path resolved to an empty string
    #[error("locale file path is empty")]
    EmptyPath,

    /// The locale file could not be read and no default language is loaded
    #[error("error loading language file {path}")]
    FileUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The locale file is not a flat JSON object of strings
    #[error("failed to decode language file {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LocaleError {
    /// Path of the locale file involved, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            LocaleError::EmptyPath => None,
            LocaleError::FileUnavailable { path, .. } | LocaleError::Decode { path, .. } => {
                Some(path.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_empty_path_message() {
        let err = LocaleError::EmptyPath;
        assert_eq!(err.to_string(), "locale file path is empty");
        assert!(err.path().is_none());
    }

    #[test]
    fn test_file_unavailable_keeps_source() {
        let err = LocaleError::FileUnavailable {
            path: "./locale/fr".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };

        assert!(err.to_string().contains("./locale/fr"));
        assert_eq!(err.path(), Some("./locale/fr"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_decode_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LocaleError::Decode {
            path: "./locale/en".to_string(),
            source,
        };

        assert!(err.to_string().contains("decode"));
        assert_eq!(err.path(), Some("./locale/en"));
    }
}
