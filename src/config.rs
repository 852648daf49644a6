use anyhow::{Context, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Display name of the cache
    pub name: String,

    /// Directory prefix for locale files, trailing separator included
    pub locale_path: String,

    /// Language served when a requested language cannot be loaded
    pub default_language: String,
}

impl CacheConfig {
    /// Read configuration from the environment.
    ///
    /// Unset variables stay empty; `LocaleCache` substitutes its defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            name: optional_var("LOCALE_CACHE_NAME")?,
            locale_path: optional_var("LOCALE_PATH")?,
            default_language: optional_var("LOCALE_DEFAULT_LANGUAGE")?,
        })
    }
}

fn optional_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) => Ok(value.trim().to_string()),
        Err(std::env::VarError::NotPresent) => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", key)),
    }
}
