// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for the Event application.
// Purpose: Ensure the target answers before scenarios run, without fixed sleeps.
// Dependencies: eventmi-client, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use eventmi_client::ClientConfig;
use eventmi_client::EventmiHttpClient;
use eventmi_core::EventRoute;
use tokio::time::sleep;

/// Polls `/Event/All` until any HTTP response arrives or the timeout expires.
///
/// Uses a dedicated client so probe attempts stay out of the scenario transcript.
pub async fn wait_for_app_ready(config: &ClientConfig, timeout: Duration) -> Result<(), String> {
    let probe = EventmiHttpClient::new(config).map_err(|err| err.to_string())?;
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match probe.send(EventRoute::All, None).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "application readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(50)).await;
            }
        }
    }
}
