//! `KEY=VALUE` env-file parsing.
//!
//! The format is deliberately small: one assignment per line, `#` comments,
//! blank lines ignored, value split on the first `=`. Values of keys ending in
//! [`SERVICE_KEY_SUFFIX`] are sanitized before they are trusted.

use crate::error::{ConfigError, ConfigResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Keys with this suffix carry service credentials and are sanitized.
pub const SERVICE_KEY_SUFFIX: &str = "SERVICE_KEY";

/// Returns true if `c` may appear in a sanitized service key.
fn is_service_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '=' | '-')
}

/// Strip every character outside `[A-Za-z0-9._=-]` from a service key.
///
/// Pasted keys often pick up quotes, stray whitespace or zero-width characters;
/// none of those are valid in a JWT.
pub fn sanitize_service_key(value: &str) -> String {
    value.chars().filter(|c| is_service_key_char(*c)).collect()
}

/// Apply key-specific normalization to a raw value.
pub(crate) fn normalize_value(key: &str, value: &str) -> String {
    if key.ends_with(SERVICE_KEY_SUFFIX) {
        sanitize_service_key(value)
    } else {
        value.to_string()
    }
}

/// Parsed contents of an env file. Later assignments override earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse env-file contents.
pub fn parse_env_file(contents: &str) -> EnvFile {
    let mut entries = BTreeMap::new();

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = normalize_value(key, value.trim());
        entries.insert(key.to_string(), value);
    }

    EnvFile { entries }
}

/// Load an env file from disk.
///
/// A missing file is not an error: it means "no overrides" and yields `None`.
pub fn load_env_file(path: &Path) -> ConfigResult<Option<EnvFile>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_env_file(&contents))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}
