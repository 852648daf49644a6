//! Preview binary - prints translations straight from the locale files
//!
//! Usage:
//!   cargo run --bin preview -- --lang fr hello goodbye   # Translate keys
//!   cargo run --bin preview -- --lang fr                 # Dump the whole table
//!
//! Optional environment variables:
//! - LOCALE_PATH (defaults to ./locale/)
//! - LOCALE_DEFAULT_LANGUAGE (defaults to zh-cn)
//! - LOCALE_CACHE_NAME

use anyhow::{bail, Context, Result};
use locale_cache::{CacheConfig, LocaleCache};
use std::collections::BTreeMap;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_cache=info".parse()?),
        )
        .init();

    let (lang, keys) = parse_args(std::env::args().skip(1))?;

    let config = CacheConfig::from_env()?;
    let cache = LocaleCache::from_config(&config);
    info!(
        "Previewing {} from {} (default language {})",
        cache.name(),
        cache.base_path(),
        cache.default_language()
    );

    for (failed, e) in cache.preload(&[lang.as_str()]) {
        info!("Could not load {}: {}", failed, e);
    }
    // Report only the lookups below
    cache.metrics().reset();

    if keys.is_empty() {
        let table = cache.language_table(&lang);
        let sorted: BTreeMap<_, _> = table.iter().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&sorted).context("Failed to render table")?
        );
    } else {
        for key in &keys {
            println!("{} = {}", key, cache.translate(&lang, key));
        }
    }

    let report = cache.metrics().report();
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render metrics")?
    );

    Ok(())
}

/// Split `--lang LANG KEY...` into the language and keys to translate.
fn parse_args(args: impl Iterator<Item = String>) -> Result<(String, Vec<String>)> {
    let mut lang = String::new();
    let mut keys = Vec::new();
    let mut args = args;

    while let Some(arg) = args.next() {
        if arg == "--lang" || arg == "-l" {
            lang = args.next().context("--lang requires a language")?;
        } else if arg.starts_with('-') {
            bail!("Unknown flag: {}", arg);
        } else {
            keys.push(arg);
        }
    }

    Ok((lang, keys))
}
