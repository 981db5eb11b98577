//! Per-candidate profile extraction
//!
//! Each candidate is read in its own tab. The tab is closed in exactly one
//! place, after `read_profile` has finished one way or another, so every
//! outcome (record, filter skip, timeout, browser fault) releases it.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

use super::contact::reveal_contacts;
use super::crawl_types::{ExtractFailure, ExtractOutcome, SkipReason};
use super::page_timeout::with_page_timeout;
use super::records::ProfileRecord;
use crate::asset_fetcher::ImageSource;
use crate::config::Timings;
use crate::session::{ProfileTab, ResultsPage, SessionResult};
use crate::utils::constants::{
    ANONYMOUS_MEMBER, PROFILE_HEADLINE_SELECTOR, PROFILE_NAME_SELECTOR, PROFILE_PHOTO_SELECTOR,
    WAIT_DEADLINE_MARGIN,
};
use crate::utils::string_utils::clean_text;

/// Run one bounded browser step, tagging any failure with the step name
async fn step<T, F>(name: &'static str, timeout: Duration, operation: F) -> Result<T, ExtractFailure>
where
    F: Future<Output = SessionResult<T>>,
{
    with_page_timeout(operation, timeout, name)
        .await
        .map_err(|e| ExtractFailure::new(name, e))
}

/// Name filter: returns the skip reason for names that must not produce a record
#[must_use]
pub fn reject_name(name: &str) -> Option<SkipReason> {
    if name.is_empty() {
        Some(SkipReason::MissingName)
    } else if name.contains(ANONYMOUS_MEMBER) {
        Some(SkipReason::AnonymousMember)
    } else {
        None
    }
}

/// Open `href` in a new tab, extract the profile there, and close the tab.
///
/// Never propagates: faults come back as `ExtractOutcome::Failed`.
pub async fn extract_profile<P, I>(
    results: &P,
    href: &str,
    images: &I,
    timings: &Timings,
) -> ExtractOutcome
where
    P: ResultsPage,
    I: ImageSource + ?Sized,
{
    let tab = match step("open tab", timings.step, results.open_tab(href)).await {
        Ok(tab) => tab,
        Err(failure) => return ExtractOutcome::Failed(failure),
    };

    let outcome = match read_profile(&tab, images, timings).await {
        Ok(outcome) => outcome,
        Err(failure) => ExtractOutcome::Failed(failure),
    };

    if let Err(e) = with_page_timeout(tab.close(), timings.step, "close tab").await {
        debug!("Closing profile tab failed: {}", e);
    }

    if matches!(outcome, ExtractOutcome::Extracted(_)) && !timings.profile_cooldown.is_zero() {
        tokio::time::sleep(timings.profile_cooldown).await;
    }

    outcome
}

async fn read_profile<T, I>(
    tab: &T,
    images: &I,
    timings: &Timings,
) -> Result<ExtractOutcome, ExtractFailure>
where
    T: ProfileTab,
    I: ImageSource + ?Sized,
{
    step(
        "profile ready",
        timings.profile_ready + WAIT_DEADLINE_MARGIN,
        tab.wait_for(PROFILE_PHOTO_SELECTOR, timings.profile_ready),
    )
    .await?;

    let name = clean_text(step("read name", timings.step, tab.text(PROFILE_NAME_SELECTOR)).await?);
    if let Some(reason) = reject_name(&name) {
        return Ok(ExtractOutcome::Skipped(reason));
    }

    let headline = clean_text(
        step(
            "read headline",
            timings.step,
            tab.text(PROFILE_HEADLINE_SELECTOR),
        )
        .await?,
    );

    let profile_url = step("read url", timings.step, tab.current_url()).await?;

    let photo_src = step(
        "read photo",
        timings.step,
        tab.attribute(PROFILE_PHOTO_SELECTOR, "src"),
    )
    .await?
    .filter(|src| !src.trim().is_empty());

    let photo = match photo_src {
        Some(src) => images.fetch(src.trim()).await,
        None => None,
    };

    let contacts = reveal_contacts(tab, timings).await;

    Ok(ExtractOutcome::Extracted(ProfileRecord::new(
        name,
        headline,
        profile_url,
        photo,
        &contacts,
    )))
}
