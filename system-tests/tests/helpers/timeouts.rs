// system-tests/tests/helpers/timeouts.rs
// ============================================================================
// Module: System Test Timeouts
// Description: Centralized timeout configuration with env overrides.
// Purpose: Keep system-test timeouts consistent and configurable across suites.
// ============================================================================

use std::cmp::max;
use std::time::Duration;

use system_tests::config::SystemTestConfig;

/// Default per-request timeout for suites.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Default readiness timeout for suites.
pub const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns the effective timeout, honoring `EVENTMI_SYSTEM_TEST_TIMEOUT_SEC` when set.
/// The override acts as a minimum so explicitly longer timeouts are kept.
pub fn resolve_timeout(config: &SystemTestConfig, requested: Duration) -> Duration {
    config.timeout.map_or(requested, |override_timeout| max(requested, override_timeout))
}
