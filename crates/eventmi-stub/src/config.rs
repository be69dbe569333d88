// crates/eventmi-stub/src/config.rs
// ============================================================================
// Module: Stub Configuration
// Description: TOML configuration loading and validation for the stub.
// Purpose: Fail closed on bad binds, datastore settings, or seed rows.
// Dependencies: eventmi-core, eventmi-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! The stub reads an optional TOML file:
//!
//! ```toml
//! bind = "127.0.0.1:7236"
//! seed_demo = true
//!
//! [database]
//! path = "eventmi.sqlite3"
//! busy_timeout_ms = 5000
//!
//! [audit]
//! enabled = true
//! log_path = "stub-audit.jsonl"
//!
//! [[seed]]
//! name = "CSKA Conf"
//! place = "Klub Burgas"
//! start = "12/12/2024 12:00 PM"
//! end = "12/12/2024 02:00 PM"
//! ```
//!
//! Non-loopback binds are rejected unless `allow_non_loopback` is set.
//! Seed rows go through the same validation as posted forms.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use eventmi_core::FormSubmission;
use eventmi_core::NewEvent;
use eventmi_core::validate_submission;
use eventmi_store_sqlite::SqliteStoreConfig;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bind address, matching the development port of the web app.
pub const DEFAULT_BIND: &str = "127.0.0.1:7236";
/// Default datastore file.
pub const DEFAULT_DATABASE_PATH: &str = "eventmi.sqlite3";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Maximum number of configured seed rows.
const MAX_SEED_EVENTS: usize = 1024;
/// Maximum busy timeout in milliseconds.
const MAX_BUSY_TIMEOUT_MS: u64 = 60_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Stub configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StubConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Permit binding to non-loopback interfaces.
    #[serde(default)]
    pub allow_non_loopback: bool,
    /// Datastore settings.
    #[serde(default = "default_database")]
    pub database: SqliteStoreConfig,
    /// Request audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Insert the demo rows when the datastore is empty.
    #[serde(default)]
    pub seed_demo: bool,
    /// Rows inserted when the datastore is empty.
    #[serde(default)]
    pub seed: Vec<SeedEvent>,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allow_non_loopback: false,
            database: default_database(),
            audit: AuditConfig::default(),
            seed_demo: false,
            seed: Vec::new(),
        }
    }
}

/// Request audit settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Emit one JSON line per request.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Append to this file instead of stderr.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: None,
        }
    }
}

/// Seed row in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEvent {
    /// Display name.
    pub name: String,
    /// Venue.
    pub place: String,
    /// Start in wire date format.
    pub start: String,
    /// End in wire date format.
    pub end: String,
}

impl SeedEvent {
    /// Validates the row as if it had been posted through the Add form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any field fails validation.
    pub fn to_new_event(&self) -> Result<NewEvent, ConfigError> {
        let submission = FormSubmission {
            id: None,
            name: Some(self.name.clone()),
            place: Some(self.place.clone()),
            start: Some(self.start.clone()),
            end: Some(self.end.clone()),
        };
        validate_submission(&submission)
            .map_err(|err| ConfigError::Invalid(format!("seed '{}': {err}", self.name)))
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl StubConfig {
    /// Loads configuration from a TOML file, or defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let addr = self.bind_addr()?;
        if !addr.ip().is_loopback() && !self.allow_non_loopback {
            return Err(ConfigError::Invalid(format!(
                "bind {addr} is not loopback; set allow_non_loopback to expose the stub"
            )));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must be set".to_string()));
        }
        if self.database.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "database.busy_timeout_ms must be at most {MAX_BUSY_TIMEOUT_MS}"
            )));
        }
        if let Some(log_path) = &self.audit.log_path
            && log_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("audit.log_path must not be empty".to_string()));
        }
        if self.seed.len() > MAX_SEED_EVENTS {
            return Err(ConfigError::Invalid(format!(
                "at most {MAX_SEED_EVENTS} seed rows are allowed"
            )));
        }
        for seed in &self.seed {
            seed.to_new_event()?;
        }
        Ok(())
    }

    /// Parses the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("invalid bind address {}: {err}", self.bind)))
    }

    /// Returns every configured seed row, demo rows first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a seed row fails validation.
    pub fn seed_events(&self) -> Result<Vec<NewEvent>, ConfigError> {
        let mut events = if self.seed_demo { crate::seed::demo_events() } else { Vec::new() };
        for seed in &self.seed {
            events.push(seed.to_new_event()?);
        }
        Ok(events)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default datastore settings.
fn default_database() -> SqliteStoreConfig {
    SqliteStoreConfig::new(DEFAULT_DATABASE_PATH)
}

/// Serde default helper.
const fn default_true() -> bool {
    true
}
