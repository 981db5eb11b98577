//! Pagination driver
//!
//! Walks result pages in order. For each page it visits every candidate in
//! DOM order, hands the linkable ones to the profile extractor, and then
//! decides from the page cap and the "next" control whether to advance.

use std::fmt;
use tracing::{debug, info, warn};

use super::crawl_types::{
    CrawlReport, ExtractFailure, ExtractOutcome, PageCursor, ScrapeError, ScrapeResult, SkipReason,
};
use super::page_timeout::with_page_timeout;
use super::profile::extract_profile;
use super::records::RecordAggregator;
use crate::asset_fetcher::ImageSource;
use crate::config::Timings;
use crate::session::{CandidateEntry, NextControl, ResultsPage, SessionError};
use crate::utils::constants::HEADLESS_MARKER;

/// Why the crawl stopped advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    PageCapReached,
    NoNextControl,
    NextDisabled,
    /// The results page could not be read or advanced
    NavigationFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PageCapReached => "page cap reached",
            Self::NoNextControl => "no next button",
            Self::NextDisabled => "next button disabled",
            Self::NavigationFailed => "results page navigation failed",
        };
        f.write_str(label)
    }
}

/// True once `page_number` pages have been processed under `page_limit`
#[must_use]
pub fn cap_reached(page_number: u32, page_limit: Option<u32>) -> bool {
    page_limit.is_some_and(|limit| page_number >= limit)
}

/// Decide whether a candidate is worth opening.
///
/// Returns the link to open, or why the entry is skipped.
pub fn classify_candidate(entry: &CandidateEntry) -> Result<&str, SkipReason> {
    if entry.ghost {
        return Err(SkipReason::Ghost);
    }
    let href = entry
        .target_href
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .ok_or(SkipReason::NoLink)?;
    if href.contains(HEADLESS_MARKER) {
        return Err(SkipReason::Headless);
    }
    Ok(href)
}

/// Drives the results page through its pages
pub struct PaginationDriver<'a, P, I: ?Sized> {
    page: &'a P,
    images: &'a I,
    page_limit: Option<u32>,
    timings: Timings,
}

impl<'a, P, I> PaginationDriver<'a, P, I>
where
    P: ResultsPage,
    I: ImageSource + ?Sized,
{
    pub fn new(page: &'a P, images: &'a I, page_limit: Option<u32>, timings: Timings) -> Self {
        Self {
            page,
            images,
            page_limit,
            timings,
        }
    }

    /// Process pages until the cap, or until there is no enabled next control.
    ///
    /// # Errors
    ///
    /// Only an extraction failure classified fatal escapes; records gathered
    /// before it stay in `records`.
    pub async fn run(&self, records: &mut RecordAggregator) -> ScrapeResult<CrawlReport> {
        let mut report = CrawlReport::default();
        let mut cursor = PageCursor::default();

        while cursor.has_more {
            info!("Processing page {}", cursor.page_number);
            self.process_page(records, &mut report).await?;
            report.pages_processed += 1;

            match self.next_step(cursor.page_number).await {
                Some(stop) => {
                    info!("Stopping after page {}: {}", cursor.page_number, stop);
                    cursor.has_more = false;
                }
                None => {
                    if !self.timings.page_settle.is_zero() {
                        tokio::time::sleep(self.timings.page_settle).await;
                    }
                    cursor.page_number += 1;
                }
            }
        }

        info!("Crawl finished: {}", report);
        Ok(report)
    }

    /// `None` after successfully advancing to the following page
    async fn next_step(&self, page_number: u32) -> Option<StopReason> {
        if cap_reached(page_number, self.page_limit) {
            return Some(StopReason::PageCapReached);
        }

        let control = match with_page_timeout(
            self.page.next_control(),
            self.timings.step,
            "read next control",
        )
        .await
        {
            Ok(control) => control,
            Err(e) => {
                warn!("Could not read next control: {}", e);
                return Some(StopReason::NavigationFailed);
            }
        };

        match control {
            NextControl::Absent => Some(StopReason::NoNextControl),
            NextControl::Disabled => Some(StopReason::NextDisabled),
            NextControl::Enabled => {
                match with_page_timeout(self.page.advance(), self.timings.step, "advance page")
                    .await
                {
                    Ok(()) => None,
                    Err(e) => {
                        warn!("Could not advance to next page: {}", e);
                        Some(StopReason::NavigationFailed)
                    }
                }
            }
        }
    }

    async fn process_page(
        &self,
        records: &mut RecordAggregator,
        report: &mut CrawlReport,
    ) -> ScrapeResult<()> {
        let count = match with_page_timeout(
            self.page.candidate_count(),
            self.timings.step,
            "count candidates",
        )
        .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!("Could not enumerate candidates: {}", e);
                0
            }
        };
        debug!("{} candidate(s) on page", count);

        for index in 0..count {
            report.candidates_seen += 1;
            let outcome = self.process_candidate(index).await;
            report.record(&outcome);

            match outcome {
                ExtractOutcome::Extracted(record) => {
                    info!("    [+] {}", record.display_name);
                    records.push(record);
                }
                ExtractOutcome::Skipped(reason) => {
                    debug!("Candidate {} skipped: {}", index, reason);
                }
                ExtractOutcome::Failed(failure) if failure.is_fatal() => {
                    return Err(ScrapeError::Extraction(failure));
                }
                ExtractOutcome::Failed(failure) => {
                    warn!("Candidate {} failed: {}", index, failure);
                }
            }
        }
        Ok(())
    }

    async fn process_candidate(&self, index: usize) -> ExtractOutcome {
        match with_page_timeout(
            self.page.scroll_to_candidate(index),
            self.timings.step,
            "scroll candidate",
        )
        .await
        {
            Ok(()) => {}
            Err(SessionError::NotFound(_)) => return ExtractOutcome::Skipped(SkipReason::Vanished),
            Err(e) => return ExtractOutcome::Failed(ExtractFailure::new("scroll candidate", e)),
        }

        if !self.timings.candidate_settle.is_zero() {
            tokio::time::sleep(self.timings.candidate_settle).await;
        }

        let entry = match with_page_timeout(
            self.page.inspect_candidate(index),
            self.timings.step,
            "inspect candidate",
        )
        .await
        {
            Ok(Some(entry)) => entry,
            Ok(None) => return ExtractOutcome::Skipped(SkipReason::Vanished),
            Err(e) => return ExtractOutcome::Failed(ExtractFailure::new("inspect candidate", e)),
        };

        match classify_candidate(&entry) {
            Ok(href) => extract_profile(self.page, href, self.images, &self.timings).await,
            Err(reason) => ExtractOutcome::Skipped(reason),
        }
    }
}
