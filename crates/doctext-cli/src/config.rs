use std::path::Path;

use doctext_core::DEFAULT_MIN_TEXT_CHARS;
use doctext_core::config_file::{self, ConfigFile};

/// Environment variable overriding the minimum text length.
pub const MIN_TEXT_CHARS_ENV: &str = "DOCTEXT_MIN_TEXT_CHARS";

/// Load the config file: an explicit `--config` path must be readable, the
/// default cascade silently falls back to an empty config.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    match explicit {
        Some(path) => Ok(config_file::read_config(path)?),
        None => Ok(config_file::load_config()),
    }
}

/// Resolve the minimum text length: CLI flag > env var > config file > default.
/// An unparseable env value is ignored.
pub fn resolve_min_text_chars(
    flag: Option<usize>,
    env: Option<String>,
    file: &ConfigFile,
) -> usize {
    flag.or_else(|| env.and_then(|v| v.trim().parse().ok()))
        .or_else(|| file.min_text_chars())
        .unwrap_or(DEFAULT_MIN_TEXT_CHARS)
}
