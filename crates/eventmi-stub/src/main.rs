// crates/eventmi-stub/src/main.rs
// ============================================================================
// Module: Eventmi Stub Entry Point
// Description: Command-line launcher for the reference Event application.
// Purpose: Serve the stub standalone for manual runs and external targets.
// Dependencies: clap, eventmi-stub, tokio
// ============================================================================

//! ## Overview
//! Loads an optional TOML config, applies flag overrides, and serves until
//! Ctrl-C. Flags win over file values.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use eventmi_stub::StubConfig;
use eventmi_stub::serve;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "eventmi-stub", version, about = "Reference Event web application")]
struct Cli {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Socket address to listen on (overrides `bind`).
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
    /// Datastore file (overrides `database.path`).
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Insert demo rows when the datastore is empty.
    #[arg(long, action = ArgAction::SetTrue)]
    seed_demo: bool,
    /// Allow binding to non-loopback addresses.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_non_loopback: bool,
    /// Append request audit lines to this file instead of stderr.
    #[arg(long, value_name = "PATH", conflicts_with = "no_audit")]
    audit_log: Option<PathBuf>,
    /// Disable request audit lines.
    #[arg(long, action = ArgAction::SetTrue)]
    no_audit: bool,
}

impl Cli {
    /// Applies flag overrides to a loaded configuration.
    fn apply(&self, mut config: StubConfig) -> StubConfig {
        if let Some(bind) = &self.bind {
            config.bind.clone_from(bind);
        }
        if let Some(db) = &self.db {
            config.database.path.clone_from(db);
        }
        if self.seed_demo {
            config.seed_demo = true;
        }
        if self.allow_non_loopback {
            config.allow_non_loopback = true;
        }
        if let Some(path) = &self.audit_log {
            config.audit.enabled = true;
            config.audit.log_path = Some(path.clone());
        }
        if self.no_audit {
            config.audit.enabled = false;
        }
        config
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => emit_error(&message),
    }
}

/// Loads configuration and serves until shutdown.
async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = StubConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    let config = cli.apply(config);
    let database = config.database.path.display().to_string();
    serve(&config, |addr| {
        let _ =
            write_stderr_line(&format!("eventmi-stub listening on http://{addr} (db {database})"));
    })
    .await
    .map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
