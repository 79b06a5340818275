//! Core types shared by the Groupix sync jobs.
//!
//! This crate defines:
//! - Env-file parsing and service-key sanitization
//! - Typed job configuration assembled from the env layer
//! - Service-key claim inspection
//! - Row and storage-object domain types

pub mod config;
pub mod credential;
pub mod env_file;
pub mod error;
pub mod object;
pub mod row;

pub use config::{
    EnvLayer, MigrationConfig, ObjectCopyConfig, ProjectConfig, RowCopyConfig,
    TunableOverrides,
};
pub use credential::{KeyClaims, ServiceKey};
pub use env_file::{EnvFile, load_env_file, parse_env_file, sanitize_service_key};
pub use error::{ConfigError, ConfigResult};
pub use object::{DEFAULT_CONTENT_TYPE, ObjectEntry, resolve_content_type};
pub use row::{IDENTITY_FIELD, Row, strip_identity};

/// Default location of the env file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = "scripts/.env.copy";

/// Table copied by `copy-memories`.
pub const MEMORIES_TABLE: &str = "memories";

/// Column used to select the most recent rows.
pub const CREATED_AT_COLUMN: &str = "created_at";
