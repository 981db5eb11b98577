//! Core types for a crawl run.
//!
//! Error types, the per-candidate outcome the extractor hands back to the
//! pagination driver, and the run summary.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::records::ProfileRecord;
use crate::session::SessionError;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The landing page carries no company identifier, so no search query
    /// can be built
    #[error("company identifier not found on {url}")]
    CompanyNotFound { url: String },

    /// The results page itself could not be driven
    #[error("browser error: {0}")]
    Browser(SessionError),

    /// A bounded wait on the results page expired
    #[error("{what} timed out after {after:?}")]
    Timeout { what: String, after: Duration },

    /// Writing the spreadsheet failed
    #[error("export failed: {0}")]
    Export(String),

    /// An extraction fault classified as fatal escaped a candidate
    #[error("fatal extraction failure: {0}")]
    Extraction(ExtractFailure),
}

impl From<SessionError> for ScrapeError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Timeout { what, after } => Self::Timeout { what, after },
            other => Self::Browser(other),
        }
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Why a candidate produced no record without anything going wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// Loading skeleton, not a real person
    Ghost,
    /// Avatar without an enclosing link
    NoLink,
    /// Sponsored/headless link
    Headless,
    /// Profile hidden behind the anonymized-member name
    AnonymousMember,
    /// Profile rendered without a display name
    MissingName,
    /// The page dropped the entry between counting and inspecting it
    Vanished,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ghost => "ghost entry",
            Self::NoLink => "no profile link",
            Self::Headless => "headless link",
            Self::AnonymousMember => "anonymous member",
            Self::MissingName => "missing name",
            Self::Vanished => "entry vanished",
        };
        f.write_str(label)
    }
}

/// A contained failure while extracting one candidate
#[derive(Debug, Clone, Error)]
#[error("{step}: {cause}")]
pub struct ExtractFailure {
    /// Extraction step that failed
    pub step: &'static str,
    pub cause: SessionError,
}

impl ExtractFailure {
    pub fn new(step: &'static str, cause: SessionError) -> Self {
        Self { step, cause }
    }

    /// Whether this failure must stop the whole crawl.
    ///
    /// Every per-profile fault is local to its tab, so none currently is.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        false
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.cause.is_timeout()
    }
}

/// Result of extracting one candidate
#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted(ProfileRecord),
    Skipped(SkipReason),
    Failed(ExtractFailure),
}

/// Crawl progress marker, in memory only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based number of the page being processed
    pub page_number: u32,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page_number: 1,
            has_more: true,
        }
    }
}

/// Counters for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages_processed: u32,
    pub candidates_seen: usize,
    pub extracted: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub failed: usize,
    pub timed_out: usize,
}

impl CrawlReport {
    pub(crate) fn record(&mut self, outcome: &ExtractOutcome) {
        match outcome {
            ExtractOutcome::Extracted(_) => self.extracted += 1,
            ExtractOutcome::Skipped(reason) => *self.skipped.entry(*reason).or_insert(0) += 1,
            ExtractOutcome::Failed(failure) => {
                self.failed += 1;
                if failure.is_timeout() {
                    self.timed_out += 1;
                }
            }
        }
    }
}

impl CrawlReport {
    /// Skips across every reason
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page(s), {} candidate(s): {} extracted, {} skipped, {} failed ({} timed out)",
            self.pages_processed,
            self.candidates_seen,
            self.extracted,
            self.total_skipped(),
            self.failed,
            self.timed_out
        )?;
        for (reason, count) in &self.skipped {
            write!(f, "; {reason}: {count}")?;
        }
        Ok(())
    }
}
