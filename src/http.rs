//! Shared HTTP agent construction.

use std::time::Duration;

/// Timeout applied to every outbound request.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the blocking agent used for all API and notification calls.
pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(API_TIMEOUT))
        .build()
        .into()
}
