// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. An external base URL without
//! a datastore path is rejected: the suites cannot check persisted state
//! without an oracle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional external application root (e.g. `https://localhost:7236`).
    BaseUrl,
    /// `SQLite` datastore behind the external application.
    DbPath,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional run root override.
    RunRoot,
    /// Accept self-signed certificates (`true`/`false` or `1`/`0`).
    AcceptInvalidCerts,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "EVENTMI_SYSTEM_TEST_BASE_URL",
            Self::DbPath => "EVENTMI_SYSTEM_TEST_DB_PATH",
            Self::TimeoutSeconds => "EVENTMI_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "EVENTMI_SYSTEM_TEST_RUN_ROOT",
            Self::AcceptInvalidCerts => "EVENTMI_SYSTEM_TEST_ACCEPT_INVALID_CERTS",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Application the suites run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemTestTarget {
    /// Spawn the reference application per test with a fresh datastore.
    InProcessStub,
    /// Use an already running application and its datastore.
    External {
        /// Application root.
        base_url: String,
        /// Datastore file opened read-only as the oracle.
        db_path: PathBuf,
    },
}

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional external application root.
    pub base_url: Option<String>,
    /// Optional datastore path for the external application.
    pub db_path: Option<PathBuf>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Accept self-signed certificates from the external application.
    pub accept_invalid_certs: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value,
    /// or a base URL without a datastore path).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?;
        let db_path = read_env_nonempty(SystemTestEnv::DbPath.as_str())?.map(PathBuf::from);
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let accept_invalid_certs = parse_bool_env(
            SystemTestEnv::AcceptInvalidCerts.as_str(),
            read_env_nonempty(SystemTestEnv::AcceptInvalidCerts.as_str())?,
        )?;
        if base_url.is_some() && db_path.is_none() {
            return Err(format!(
                "{} requires {} for datastore checks",
                SystemTestEnv::BaseUrl.as_str(),
                SystemTestEnv::DbPath.as_str()
            ));
        }
        Ok(Self {
            base_url,
            db_path,
            timeout,
            run_root,
            accept_invalid_certs,
        })
    }

    /// Returns the application the suites should target.
    #[must_use]
    pub fn target(&self) -> SystemTestTarget {
        match (&self.base_url, &self.db_path) {
            (Some(base_url), Some(db_path)) => SystemTestTarget::External {
                base_url: base_url.trim().to_string(),
                db_path: db_path.clone(),
            },
            _ => SystemTestTarget::InProcessStub,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to `false` when unset.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
