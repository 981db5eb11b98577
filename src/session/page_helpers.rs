//! Helper functions for consistent chromiumoxide Page error handling
//!
//! These functions provide standardized error handling for common Page operations
//! that may fail (browser communication errors) or return None (value not yet available).

use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::{SessionError, SessionResult};
use crate::utils::constants::SELECTOR_POLL_INTERVAL;

/// Get page URL with diagnostic fallback
///
/// Handles two failure modes:
/// 1. `Err(e)` - Browser communication failure (logs at trace level)
/// 2. `Ok(None)` - Page has no URL yet (treated as empty)
///
/// Returns `"about:blank"` on any failure for clear diagnostics.
pub(crate) async fn get_page_url_with_fallback(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        Ok(None) => {
            trace!("Page URL is None (page not yet navigated)");
            "about:blank".to_string()
        }
        Err(e) => {
            trace!("Failed to get page URL (browser communication error): {}", e);
            "about:blank".to_string()
        }
    }
}

/// Poll the DOM until `selector` matches, bounded by `timeout`.
///
/// `page.wait_for_navigation()` returns when the HTTP response arrives, but
/// the site renders its content with JavaScript afterwards, so readiness is
/// judged by the DOM itself.
pub(crate) async fn wait_for_selector(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> SessionResult<()> {
    let start = Instant::now();

    loop {
        match page.find_elements(selector).await {
            Ok(found) if !found.is_empty() => {
                debug!("'{}' appeared after {:?}", selector, start.elapsed());
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => trace!("Polling '{}' failed: {}", selector, e),
        }

        if start.elapsed() >= timeout {
            return Err(SessionError::timeout(format!("wait for '{selector}'"), timeout));
        }

        tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
    }
}

/// Evaluate a script and deserialize its return value
pub(crate) async fn evaluate_value<T: DeserializeOwned>(
    page: &Page,
    script: &str,
) -> SessionResult<T> {
    page.evaluate(script)
        .await?
        .into_value::<T>()
        .map_err(|e| SessionError::Browser(format!("unexpected script result: {e}")))
}
