//! Job configuration.
//!
//! Configuration is assembled once, up front, from an [`EnvLayer`]: a figment
//! of the process environment overlaid with the env file. The jobs never read the environment
//! themselves; they receive the typed structs below.

use crate::credential::ServiceKey;
use crate::env_file::{EnvFile, normalize_value};
use crate::error::{ConfigError, ConfigResult};
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub const PROD_URL_KEY: &str = "PROD_SUPABASE_URL";
pub const PROD_SERVICE_KEY_KEY: &str = "PROD_SUPABASE_SERVICE_KEY";
pub const DEV_URL_KEY: &str = "DEV_SUPABASE_URL";
pub const DEV_SERVICE_KEY_KEY: &str = "DEV_SUPABASE_SERVICE_KEY";
pub const BUCKET_KEY: &str = "SUPABASE_BUCKET";
pub const MEMORIES_LIMIT_KEY: &str = "MEMORIES_LIMIT";
pub const COPY_LIMIT_KEY: &str = "COPY_LIMIT";
pub const COPY_CONCURRENCY_KEY: &str = "COPY_CONCURRENCY";
pub const COPY_LOG_EVERY_KEY: &str = "COPY_LOG_EVERY";

/// Keys required by every job, checked in this order.
pub const REQUIRED_KEYS: [&str; 4] = [
    PROD_URL_KEY,
    PROD_SERVICE_KEY_KEY,
    DEV_URL_KEY,
    DEV_SERVICE_KEY_KEY,
];

/// Every key the jobs read from the process environment.
pub const KNOWN_KEYS: [&str; 9] = [
    PROD_URL_KEY,
    PROD_SERVICE_KEY_KEY,
    DEV_URL_KEY,
    DEV_SERVICE_KEY_KEY,
    BUCKET_KEY,
    MEMORIES_LIMIT_KEY,
    COPY_LIMIT_KEY,
    COPY_CONCURRENCY_KEY,
    COPY_LOG_EVERY_KEY,
];

pub const DEFAULT_MEMORIES_LIMIT: usize = 500;
pub const DEFAULT_COPY_LIMIT: usize = 1000;
pub const DEFAULT_COPY_CONCURRENCY: usize = 3;
pub const DEFAULT_COPY_LOG_EVERY: usize = 25;

/// Resolved view over the process environment and the env file.
///
/// Env-file values take precedence over the process environment. Each field is
/// one of [`KNOWN_KEYS`], lowercased the way figment's `Env` provider names
/// them. Values are kept as text; numbers are parsed when a config struct
/// reads them, so a bad value is reported against its key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EnvLayer {
    #[serde(default, deserialize_with = "text")]
    prod_supabase_url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    prod_supabase_service_key: Option<String>,
    #[serde(default, deserialize_with = "text")]
    dev_supabase_url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    dev_supabase_service_key: Option<String>,
    #[serde(default, deserialize_with = "text")]
    supabase_bucket: Option<String>,
    #[serde(default, deserialize_with = "text")]
    memories_limit: Option<String>,
    #[serde(default, deserialize_with = "text")]
    copy_limit: Option<String>,
    #[serde(default, deserialize_with = "text")]
    copy_concurrency: Option<String>,
    #[serde(default, deserialize_with = "text")]
    copy_log_every: Option<String>,
}

/// Accept any scalar as text. The `Env` provider parses `3` into a number and
/// `true` into a bool; both are turned back into their literal form.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(|value| match value {
        Value::String(text) => text,
        other => other.to_string(),
    }))
}

/// Known keys from `pairs`, lowercased into figment dictionary keys.
fn known_entries<'a, I, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .filter(|(key, _)| KNOWN_KEYS.contains(key))
        .map(|(key, value)| (key.to_ascii_lowercase(), value.as_ref().to_string()))
        .collect()
}

impl EnvLayer {
    /// Build the layer from the known process environment keys plus an
    /// optional env file.
    pub fn from_process(env_file: Option<&EnvFile>) -> ConfigResult<Self> {
        let figment = Figment::new().merge(Env::raw().only(&KNOWN_KEYS));
        Self::extract(figment, env_file)
    }

    /// Build the layer from explicit base pairs plus an optional env file.
    pub fn from_pairs<'a, I, V>(base: I, env_file: Option<&EnvFile>) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: AsRef<str>,
    {
        let figment = Figment::from(Serialized::globals(known_entries(base)));
        Self::extract(figment, env_file)
    }

    fn extract(mut figment: Figment, env_file: Option<&EnvFile>) -> ConfigResult<Self> {
        if let Some(file) = env_file {
            figment = figment.merge(Serialized::globals(known_entries(file.iter())));
        }

        let mut layer: Self = figment.extract().map_err(Box::new)?;
        for (key, slot) in [
            (PROD_SERVICE_KEY_KEY, &mut layer.prod_supabase_service_key),
            (DEV_SERVICE_KEY_KEY, &mut layer.dev_supabase_service_key),
        ] {
            if let Some(value) = slot.as_mut() {
                *value = normalize_value(key, value);
            }
        }
        Ok(layer)
    }

    fn slot(&self, key: &str) -> Option<&String> {
        match key {
            PROD_URL_KEY => self.prod_supabase_url.as_ref(),
            PROD_SERVICE_KEY_KEY => self.prod_supabase_service_key.as_ref(),
            DEV_URL_KEY => self.dev_supabase_url.as_ref(),
            DEV_SERVICE_KEY_KEY => self.dev_supabase_service_key.as_ref(),
            BUCKET_KEY => self.supabase_bucket.as_ref(),
            MEMORIES_LIMIT_KEY => self.memories_limit.as_ref(),
            COPY_LIMIT_KEY => self.copy_limit.as_ref(),
            COPY_CONCURRENCY_KEY => self.copy_concurrency.as_ref(),
            COPY_LOG_EVERY_KEY => self.copy_log_every.as_ref(),
            _ => None,
        }
    }

    /// Look up a key, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slot(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn require(&self, key: &'static str) -> ConfigResult<&str> {
        self.get(key).ok_or(ConfigError::MissingKey(key))
    }

    fn number_or(&self, key: &'static str, default: usize) -> ConfigResult<usize> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key,
                    value: raw.to_string(),
                }),
        }
    }
}

/// Connection settings for one backend project.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    /// Project base URL. Not validated here; a malformed URL fails on first use.
    pub url: String,
    pub service_key: ServiceKey,
}

/// Source (production) and target (development) projects.
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    pub source: ProjectConfig,
    pub target: ProjectConfig,
}

impl MigrationConfig {
    /// Validate the required keys and build the project pair.
    pub fn from_layer(layer: &EnvLayer) -> ConfigResult<Self> {
        for key in REQUIRED_KEYS {
            layer.require(key)?;
        }

        Ok(Self {
            source: ProjectConfig {
                url: layer.require(PROD_URL_KEY)?.to_string(),
                service_key: ServiceKey::new(layer.require(PROD_SERVICE_KEY_KEY)?),
            },
            target: ProjectConfig {
                url: layer.require(DEV_URL_KEY)?.to_string(),
                service_key: ServiceKey::new(layer.require(DEV_SERVICE_KEY_KEY)?),
            },
        })
    }
}

/// Command-line overrides for the tunables. `None` keeps the layered value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TunableOverrides {
    pub limit: Option<usize>,
    pub concurrency: Option<usize>,
    pub log_every: Option<usize>,
}

/// Settings for `copy-memories`.
#[derive(Clone, Debug)]
pub struct RowCopyConfig {
    pub migration: MigrationConfig,
    /// Maximum number of most recent rows to copy.
    pub limit: usize,
}

impl RowCopyConfig {
    pub fn from_layer(layer: &EnvLayer, overrides: TunableOverrides) -> ConfigResult<Self> {
        let migration = MigrationConfig::from_layer(layer)?;
        let limit = match overrides.limit {
            Some(limit) => limit,
            None => layer.number_or(MEMORIES_LIMIT_KEY, DEFAULT_MEMORIES_LIMIT)?,
        };
        Ok(Self { migration, limit })
    }
}

/// Settings for `copy-storage`.
#[derive(Clone, Debug)]
pub struct ObjectCopyConfig {
    pub migration: MigrationConfig,
    pub bucket: String,
    /// Maximum number of objects to enumerate.
    pub limit: usize,
    /// Maximum transfers in flight.
    pub concurrency: usize,
    /// Successful transfers between progress lines.
    pub log_every: usize,
}

impl ObjectCopyConfig {
    pub fn from_layer(layer: &EnvLayer, overrides: TunableOverrides) -> ConfigResult<Self> {
        let migration = MigrationConfig::from_layer(layer)?;
        let bucket = layer.require(BUCKET_KEY)?.to_string();

        let limit = match overrides.limit {
            Some(limit) => limit,
            None => layer.number_or(COPY_LIMIT_KEY, DEFAULT_COPY_LIMIT)?,
        };
        let concurrency = match overrides.concurrency {
            Some(concurrency) => concurrency,
            None => layer.number_or(COPY_CONCURRENCY_KEY, DEFAULT_COPY_CONCURRENCY)?,
        };
        let log_every = match overrides.log_every {
            Some(log_every) => log_every,
            None => layer.number_or(COPY_LOG_EVERY_KEY, DEFAULT_COPY_LOG_EVERY)?,
        };

        Ok(Self {
            migration,
            bucket,
            limit,
            concurrency: concurrency.max(1),
            log_every: log_every.max(1),
        })
    }
}
