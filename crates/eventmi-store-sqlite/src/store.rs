// crates/eventmi-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Event Store
// Description: Event rows persisted in a SQLite `Events` table.
// Purpose: Back the reference application and serve oracle lookups.
// Dependencies: eventmi-core, rusqlite, serde, thiserror, time
// ============================================================================

//! ## Overview
//! Rows live in an `Events` table whose columns mirror the application's
//! entity (`Id`, `Name`, `Place`, `Start`, `End`). Timestamps are stored as
//! `YYYY-MM-DD HH:MM:SS` text, the layout ORM-backed SQLite providers write.
//! A single connection is shared behind a mutex; callers issue one statement
//! at a time, so no pooling is needed.
//! Invariants:
//! - `Id` is assigned by `SQLite` on insert and never rewritten.
//! - Read-only handles never create tables or write schema metadata.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use eventmi_core::EventId;
use eventmi_core::EventOracle;
use eventmi_core::EventRecord;
use eventmi_core::NewEvent;
use eventmi_core::OracleError;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for stores this crate creates.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Column list shared by every row query.
const EVENT_SELECT_SQL: &str = r#"SELECT "Id", "Name", "Place", "Start", "End" FROM "Events""#;
/// Storage layout for timestamps.
const SQL_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Storage layout with fractional seconds, as some writers emit.
const SQL_TIMESTAMP_FRACTION_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` event store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode (ignored for read-only handles).
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode (ignored for read-only handles).
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a configuration with defaults for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by the `SQLite` event store.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data or configuration.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<rusqlite::Error> for SqliteStoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<SqliteStoreError> for OracleError {
    fn from(err: SqliteStoreError) -> Self {
        match err {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::Db(message) | SqliteStoreError::VersionMismatch(message) => {
                Self::Store(message)
            }
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed Event datastore.
pub struct SqliteEventStore {
    /// Shared connection; statements are issued one at a time.
    connection: Mutex<Connection>,
    /// Whether this handle may write.
    writable: bool,
}

impl SqliteEventStore {
    /// Opens (creating if needed) a writable store and initializes its schema.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid, the database
    /// cannot be opened, or an existing schema version is incompatible.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let mut connection = Connection::open_with_flags(&config.path, flags)?;
        apply_pragmas(&connection, config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            writable: true,
        })
    }

    /// Opens an existing store for oracle reads only.
    ///
    /// The `Events` table must already exist; no schema is created.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the file is missing, cannot be opened,
    /// or has no `Events` table.
    pub fn open_read_only(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        if !config.path.is_file() {
            return Err(SqliteStoreError::Io(format!(
                "datastore not found: {}",
                config.path.display()
            )));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let connection = Connection::open_with_flags(&config.path, flags)?;
        connection.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        let has_table: Option<i64> = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'Events'",
                params![],
                |row| row.get(0),
            )
            .optional()?;
        if has_table.is_none() {
            return Err(SqliteStoreError::Invalid("datastore has no Events table".to_string()));
        }
        Ok(Self {
            connection: Mutex::new(connection),
            writable: false,
        })
    }

    /// Inserts a row and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the handle is read-only or the insert fails.
    pub fn insert(&self, event: &NewEvent) -> Result<EventRecord, SqliteStoreError> {
        self.ensure_writable()?;
        let guard = self.lock()?;
        guard.execute(
            r#"INSERT INTO "Events" ("Name", "Place", "Start", "End") VALUES (?1, ?2, ?3, ?4)"#,
            params![
                event.name,
                event.place,
                format_sql_timestamp(event.start)?,
                format_sql_timestamp(event.end)?
            ],
        )?;
        let raw_id = guard.last_insert_rowid();
        let id = EventId::from_raw(raw_id)
            .ok_or_else(|| SqliteStoreError::Invalid(format!("non-positive row id {raw_id}")))?;
        Ok(event.clone().with_id(id))
    }

    /// Replaces the contents of an existing row.
    ///
    /// Returns `false` when no row has the record's identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the handle is read-only or the update fails.
    pub fn update(&self, record: &EventRecord) -> Result<bool, SqliteStoreError> {
        self.ensure_writable()?;
        let id = sql_id(record.id)?;
        let changed = self.lock()?.execute(
            r#"UPDATE "Events" SET "Name" = ?1, "Place" = ?2, "Start" = ?3, "End" = ?4
               WHERE "Id" = ?5"#,
            params![
                record.name,
                record.place,
                format_sql_timestamp(record.start)?,
                format_sql_timestamp(record.end)?,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a row.
    ///
    /// Returns `false` when no row has the identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the handle is read-only or the delete fails.
    pub fn delete(&self, id: EventId) -> Result<bool, SqliteStoreError> {
        self.ensure_writable()?;
        let id = sql_id(id)?;
        let changed =
            self.lock()?.execute(r#"DELETE FROM "Events" WHERE "Id" = ?1"#, params![id])?;
        Ok(changed > 0)
    }

    /// Returns all rows ordered by identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails or a row is malformed.
    pub fn list(&self) -> Result<Vec<EventRecord>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut statement = guard.prepare(&format!(r#"{EVENT_SELECT_SQL} ORDER BY "Id""#))?;
        let rows = statement.query_map(params![], RawEventRow::from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }

    /// Returns the number of rows.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails.
    pub fn count(&self) -> Result<u64, SqliteStoreError> {
        let count: i64 =
            self.lock()?.query_row(r#"SELECT COUNT(*) FROM "Events""#, params![], |row| {
                row.get(0)
            })?;
        u64::try_from(count).map_err(|_| SqliteStoreError::Invalid("negative row count".into()))
    }

    /// Returns the row with the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails or the row is malformed.
    pub fn get(&self, id: EventId) -> Result<Option<EventRecord>, SqliteStoreError> {
        let id = sql_id(id)?;
        let raw = self
            .lock()?
            .query_row(
                &format!(r#"{EVENT_SELECT_SQL} WHERE "Id" = ?1"#),
                params![id],
                RawEventRow::from_row,
            )
            .optional()?;
        raw.map(RawEventRow::into_record).transpose()
    }

    /// Returns the first row with the given name by ascending identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails or the row is malformed.
    pub fn get_by_name(&self, name: &str) -> Result<Option<EventRecord>, SqliteStoreError> {
        let raw = self
            .lock()?
            .query_row(
                &format!(r#"{EVENT_SELECT_SQL} WHERE "Name" = ?1 ORDER BY "Id" LIMIT 1"#),
                params![name],
                RawEventRow::from_row,
            )
            .optional()?;
        raw.map(RawEventRow::into_record).transpose()
    }

    /// Fails when this handle was opened read-only.
    fn ensure_writable(&self) -> Result<(), SqliteStoreError> {
        if self.writable {
            Ok(())
        } else {
            Err(SqliteStoreError::Invalid("store opened read-only".to_string()))
        }
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("sqlite connection mutex poisoned".to_string()))
    }
}

impl EventOracle for SqliteEventStore {
    fn find_by_name(&self, name: &str) -> Result<Option<EventRecord>, OracleError> {
        Ok(self.get_by_name(name)?)
    }

    fn find_by_id(&self, id: EventId) -> Result<Option<EventRecord>, OracleError> {
        Ok(self.get(id)?)
    }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Row as read from `SQLite`, before domain validation.
struct RawEventRow {
    /// Identity column.
    id: i64,
    /// Name column.
    name: String,
    /// Place column.
    place: String,
    /// Start column text.
    start: String,
    /// End column text.
    end: String,
}

impl RawEventRow {
    /// Reads the five entity columns.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            place: row.get(2)?,
            start: row.get(3)?,
            end: row.get(4)?,
        })
    }

    /// Converts the raw columns into a domain record.
    fn into_record(self) -> Result<EventRecord, SqliteStoreError> {
        let id = EventId::from_raw(self.id)
            .ok_or_else(|| SqliteStoreError::Invalid(format!("invalid event id {}", self.id)))?;
        Ok(EventRecord {
            id,
            name: self.name,
            place: self.place,
            start: parse_sql_timestamp(&self.start)?,
            end: parse_sql_timestamp(&self.end)?,
        })
    }
}

/// Converts an identity to the `SQLite` integer domain.
fn sql_id(id: EventId) -> Result<i64, SqliteStoreError> {
    id.to_sql().ok_or_else(|| SqliteStoreError::Invalid(format!("event id out of range: {id}")))
}

/// Formats a timestamp for storage.
fn format_sql_timestamp(value: PrimitiveDateTime) -> Result<String, SqliteStoreError> {
    value.format(SQL_TIMESTAMP_FORMAT).map_err(|err| SqliteStoreError::Invalid(err.to_string()))
}

/// Parses a stored timestamp, accepting an optional fractional part.
fn parse_sql_timestamp(raw: &str) -> Result<PrimitiveDateTime, SqliteStoreError> {
    let normalized = raw.trim().replacen('T', " ", 1);
    PrimitiveDateTime::parse(&normalized, SQL_TIMESTAMP_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(&normalized, SQL_TIMESTAMP_FRACTION_FORMAT))
        .map_err(|err| SqliteStoreError::Invalid(format!("invalid timestamp '{raw}': {err}")))
}

// ============================================================================
// SECTION: Connection Setup
// ============================================================================

/// Ensures the parent directory for the database exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Applies `SQLite` pragmas for writable handles.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))?;
    connection.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction()?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])?;
            tx.execute_batch(
                r#"CREATE TABLE IF NOT EXISTS "Events" (
                    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
                    "Name" TEXT NOT NULL,
                    "Place" TEXT NOT NULL,
                    "Start" TEXT NOT NULL,
                    "End" TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS "IX_Events_Name" ON "Events" ("Name");"#,
            )?;
        }
        Some(SCHEMA_VERSION) => {}
        Some(other) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "expected schema version {SCHEMA_VERSION}, found {other}"
            )));
        }
    }
    tx.commit()?;
    Ok(())
}
