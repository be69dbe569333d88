// crates/eventmi-stub/src/server.rs
// ============================================================================
// Module: Stub Server
// Description: Background and foreground launchers for the stub application.
// Purpose: Bind a listener, seed the store, and serve until shutdown.
// Dependencies: axum, eventmi-store-sqlite, tokio
// ============================================================================

//! ## Overview
//! [`spawn_stub`] binds `127.0.0.1:0`, then serves on a dedicated thread with
//! its own current-thread runtime so callers need not share their executor.
//! Dropping the returned [`StubServerHandle`] stops the server and joins the
//! thread. Startup failures on the server thread are returned by
//! [`spawn_stub`]; serve errors after startup go to the audit sink.
//! [`serve`] runs in the caller's runtime until Ctrl-C.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use eventmi_core::NewEvent;
use eventmi_store_sqlite::SqliteEventStore;
use eventmi_store_sqlite::SqliteStoreConfig;
use eventmi_store_sqlite::SqliteStoreError;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

use crate::app::StubState;
use crate::app::build_router;
use crate::audit::FileStubAuditSink;
use crate::audit::NoopStubAuditSink;
use crate::audit::StderrStubAuditSink;
use crate::audit::StubAuditEvent;
use crate::audit::StubAuditSink;
use crate::config::AuditConfig;
use crate::config::ConfigError;
use crate::config::StubConfig;
use crate::seed::seed_if_empty;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while starting or running the stub.
#[derive(Debug, Error)]
pub enum StubError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Datastore failed to open or seed.
    #[error(transparent)]
    Store(#[from] SqliteStoreError),
    /// Listener or log file I/O failed.
    #[error("stub io error: {0}")]
    Io(String),
    /// Server loop failed.
    #[error("stub server error: {0}")]
    Server(String),
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for a stub running on a background thread.
pub struct StubServerHandle {
    /// Application root, e.g. `http://127.0.0.1:54321`.
    base_url: String,
    /// Store shared with the handlers.
    store: Arc<SqliteEventStore>,
    /// Store configuration used to open the datastore.
    store_config: SqliteStoreConfig,
    /// Graceful shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
}

impl StubServerHandle {
    /// Returns the application root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the datastore file path.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.store_config.path
    }

    /// Returns the datastore configuration.
    #[must_use]
    pub const fn store_config(&self) -> &SqliteStoreConfig {
        &self.store_config
    }

    /// Returns the store the handlers write to.
    #[must_use]
    pub fn store(&self) -> &SqliteEventStore {
        &self.store
    }
}

impl Drop for StubServerHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Launchers
// ============================================================================

/// Opens the store, seeds it when empty, and serves on an ephemeral port.
///
/// # Errors
///
/// Returns [`StubError`] when the store cannot be opened or seeded, or the
/// listener cannot be bound.
pub fn spawn_stub(
    store_config: &SqliteStoreConfig,
    seed: &[NewEvent],
    audit: Arc<dyn StubAuditSink>,
) -> Result<StubServerHandle, StubError> {
    let store = Arc::new(SqliteEventStore::open(store_config)?);
    seed_if_empty(&store, seed)?;

    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| StubError::Io(format!("stub bind failed: {err}")))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| StubError::Io(format!("stub listener nonblocking failed: {err}")))?;
    let addr = listener
        .local_addr()
        .map_err(|err| StubError::Io(format!("stub local addr failed: {err}")))?;
    let base_url = format!("http://{addr}");

    let server_audit = Arc::clone(&audit);
    let app = build_router(StubState::new(Arc::clone(&store), audit));
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let (startup_tx, startup_rx) = mpsc::sync_channel(1);
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = startup_tx.send(Err(StubError::Server(format!(
                    "stub runtime build failed: {err}"
                ))));
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(err) => {
                    let _ = startup_tx
                        .send(Err(StubError::Io(format!("stub listener register failed: {err}"))));
                    return;
                }
            };
            let _ = startup_tx.send(Ok(()));
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                server_audit.record(&StubAuditEvent::server_error(err.to_string()));
            }
        });
    });
    if let Err(err) = await_startup(&startup_rx) {
        let _ = join.join();
        return Err(err);
    }

    Ok(StubServerHandle {
        base_url,
        store,
        store_config: store_config.clone(),
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

/// Waits for the server thread to report that its listener is registered.
///
/// # Errors
///
/// Returns the thread's startup error, or [`StubError::Server`] when the
/// thread exits without reporting.
pub(crate) fn await_startup(
    startup: &mpsc::Receiver<Result<(), StubError>>,
) -> Result<(), StubError> {
    startup.recv().map_err(|_| {
        StubError::Server("stub thread exited before reporting startup".to_string())
    })?
}

/// Serves the configured stub in the current runtime until Ctrl-C.
///
/// `on_ready` receives the bound address once the listener is up.
///
/// # Errors
///
/// Returns [`StubError`] when startup fails or the server loop errors.
pub async fn serve(
    config: &StubConfig,
    on_ready: impl FnOnce(SocketAddr) + Send,
) -> Result<(), StubError> {
    config.validate()?;
    let addr = config.bind_addr()?;
    let audit = build_audit_sink(&config.audit)?;
    let store = Arc::new(SqliteEventStore::open(&config.database)?);
    seed_if_empty(&store, &config.seed_events()?)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| StubError::Io(format!("bind {addr} failed: {err}")))?;
    let local = listener
        .local_addr()
        .map_err(|err| StubError::Io(format!("stub local addr failed: {err}")))?;
    on_ready(local);

    let app = build_router(StubState::new(store, audit));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|err| StubError::Server(err.to_string()))
}

/// Builds the audit sink described by configuration.
///
/// # Errors
///
/// Returns [`StubError::Io`] when the log file cannot be opened.
pub fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn StubAuditSink>, StubError> {
    if !config.enabled {
        return Ok(Arc::new(NoopStubAuditSink));
    }
    match &config.log_path {
        Some(path) => {
            let sink = FileStubAuditSink::new(path).map_err(|err| {
                StubError::Io(format!("audit log {} open failed: {err}", path.display()))
            })?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrStubAuditSink)),
    }
}
