//! Trend store preflight check.

use super::CheckResult;
use crate::models::config::TallySettings;
use crate::services::tally::AppwriteBackend;

/// Check if the trend store is reachable.
///
/// The store is optional: when it is not configured, the trending panel is
/// disabled but everything else works, so that case still passes.
pub async fn check(settings: &TallySettings) -> CheckResult {
    match AppwriteBackend::new(settings) {
        Ok(backend) => match backend.health_check().await {
            Ok(true) => CheckResult::ok("Trend store", "connected"),
            Ok(false) | Err(_) => CheckResult::fail(
                "Trend store",
                "unreachable",
                "Check your APPWRITE_ENDPOINT and network connection",
            ),
        },
        Err(_) => CheckResult::ok("Trend store", "not configured, trending panel disabled"),
    }
}
