// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Event Target Harness
// Description: Target selection and teardown for Event system-tests.
// Purpose: Give each test a client plus a read-only datastore oracle.
// Dependencies: eventmi-client, eventmi-store-sqlite, eventmi-stub, tempfile
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use eventmi_client::ClientConfig;
use eventmi_client::EventmiHttpClient;
use eventmi_client::FileAuditSink;
use eventmi_client::HttpExchange;
use eventmi_core::EventOracle;
use eventmi_core::EventRecord;
use eventmi_store_sqlite::SqliteEventStore;
use eventmi_store_sqlite::SqliteStoreConfig;
use eventmi_stub::FileStubAuditSink;
use eventmi_stub::StubServerHandle;
use eventmi_stub::demo_events;
use eventmi_stub::spawn_stub;
use system_tests::config::SystemTestTarget;
use tempfile::TempDir;

use super::artifacts::TestReporter;
use super::readiness::wait_for_app_ready;
use super::scenarios::conference_form;
use super::scenarios::unique_name;
use super::timeouts::READY_TIMEOUT;
use super::timeouts::REQUEST_TIMEOUT;
use super::timeouts::resolve_timeout;

/// Client-side request log written under the test's artifact root.
pub const CLIENT_AUDIT_LOG: &str = "client_audit.jsonl";
/// Stub request log written under the test's artifact root.
pub const STUB_AUDIT_LOG: &str = "stub_audit.jsonl";
/// HTTP transcript artifact.
pub const TRANSCRIPT_ARTIFACT: &str = "http_transcript.json";

/// Application under test, its client, and its datastore oracle.
pub struct EventTarget {
    client: EventmiHttpClient,
    oracle: SqliteEventStore,
    stub: Option<StubServerHandle>,
    _temp: Option<TempDir>,
}

impl EventTarget {
    /// Starts (or connects to) the configured target and waits for readiness.
    pub async fn start(reporter: &TestReporter) -> Result<Self, String> {
        let config = reporter.config();
        let artifacts = reporter.artifacts();
        let (base_url, db_path, stub, temp) = match config.target() {
            SystemTestTarget::External {
                base_url,
                db_path,
            } => (base_url, db_path, None, None),
            SystemTestTarget::InProcessStub => {
                let temp = TempDir::new().map_err(|err| format!("temp dir failed: {err}"))?;
                let store_config = SqliteStoreConfig::new(temp.path().join("events.sqlite3"));
                let audit = FileStubAuditSink::new(&artifacts.path(STUB_AUDIT_LOG))
                    .map_err(|err| format!("stub audit log failed: {err}"))?;
                let stub = spawn_stub(&store_config, &demo_events(), Arc::new(audit))
                    .map_err(|err| err.to_string())?;
                (stub.base_url().to_string(), store_config.path, Some(stub), Some(temp))
            }
        };

        let client_config = ClientConfig {
            base_url,
            timeout: resolve_timeout(config, REQUEST_TIMEOUT),
            accept_invalid_certs: config.accept_invalid_certs,
        };
        wait_for_app_ready(&client_config, resolve_timeout(config, READY_TIMEOUT)).await?;

        let audit = FileAuditSink::new(&artifacts.path(CLIENT_AUDIT_LOG))
            .map_err(|err| format!("client audit log failed: {err}"))?;
        let client = EventmiHttpClient::new(&client_config)
            .map_err(|err| err.to_string())?
            .with_audit_sink(Arc::new(audit));
        let oracle = open_oracle(db_path)?;
        Ok(Self {
            client,
            oracle,
            stub,
            _temp: temp,
        })
    }

    /// Returns the HTTP client.
    pub fn client(&self) -> &EventmiHttpClient {
        &self.client
    }

    /// Returns the read-only datastore oracle.
    pub fn oracle(&self) -> &SqliteEventStore {
        &self.oracle
    }

    /// Returns true when the target is the in-process stub.
    pub fn is_in_process(&self) -> bool {
        self.stub.is_some()
    }

    /// Adds a uniquely named conference row and returns it as persisted.
    ///
    /// Scenarios that write to a row create their own so repeated or
    /// parallel runs against one datastore never touch shared rows.
    pub async fn add_scenario_event(&self, prefix: &str) -> Result<EventRecord, String> {
        let name = unique_name(prefix);
        let exchange =
            self.client.add_event(&conference_form(&name)).await.map_err(|err| err.to_string())?;
        expect_status(&exchange, 200)?;
        self.oracle
            .find_by_name(&name)
            .map_err(|err| format!("oracle lookup failed: {err}"))?
            .ok_or_else(|| format!("event '{name}' missing from datastore after add"))
    }

    /// Writes the transcript and returns the artifact names to report.
    pub fn write_artifacts(&self, reporter: &TestReporter) -> Result<Vec<String>, String> {
        reporter
            .artifacts()
            .write_json(TRANSCRIPT_ARTIFACT, &self.client.transcript())
            .map_err(|err| format!("transcript write failed: {err}"))?;
        let mut names = vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            TRANSCRIPT_ARTIFACT.to_string(),
            CLIENT_AUDIT_LOG.to_string(),
        ];
        if self.is_in_process() {
            names.push(STUB_AUDIT_LOG.to_string());
        }
        Ok(names)
    }
}

/// Opens the datastore read-only for oracle checks.
fn open_oracle(db_path: PathBuf) -> Result<SqliteEventStore, String> {
    SqliteEventStore::open_read_only(&SqliteStoreConfig::new(db_path))
        .map_err(|err| format!("oracle open failed: {err}"))
}

/// Fails with route context when the observed status differs from `expected`.
pub fn expect_status(exchange: &HttpExchange, expected: u16) -> Result<(), String> {
    if exchange.status == expected {
        return Ok(());
    }
    Err(format!(
        "{} {}: expected status {expected}, got {}",
        exchange.route.method(),
        exchange.path,
        exchange.status
    ))
}
