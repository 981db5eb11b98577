//! Core configuration types for a scrape run
//!
//! `ScrapeConfig` carries everything the operator chooses (target company,
//! page cap, output name, browser profile) plus the `Timings` that bound every
//! wait in the crawl.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_CANDIDATE_SETTLE, DEFAULT_CONTACT_READY_TIMEOUT, DEFAULT_DISMISS_PAUSE,
    DEFAULT_IMAGE_TIMEOUT, DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_PAGE_SETTLE,
    DEFAULT_PROFILE_COOLDOWN, DEFAULT_PROFILE_READY_TIMEOUT, DEFAULT_STEP_TIMEOUT,
};

/// Main configuration struct for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Company landing page the run starts from
    pub(crate) company_url: String,

    /// Maximum number of result pages to process. `None` walks every page.
    pub(crate) page_limit: Option<u32>,

    /// Output file name without the `.xlsx` extension
    pub(crate) output_base: String,

    /// Persistent Chromium user data directory.
    ///
    /// Reused across runs so an authenticated session survives restarts.
    pub(crate) profile_dir: PathBuf,

    pub(crate) headless: bool,

    /// Photos larger than this are dropped instead of embedded
    pub(crate) max_image_bytes: usize,

    pub(crate) timings: Timings,
}

/// Bounds and fixed delays applied throughout the crawl.
///
/// Every wait in the engine reads one of these; none is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Document load on the results page
    pub navigation: Duration,

    /// Wait for the profile photo marker in a freshly opened tab
    pub profile_ready: Duration,

    /// Wait for a populated contact section after opening the panel
    pub contact_ready: Duration,

    /// Any other single browser step (read text, open tab, click)
    pub step: Duration,

    /// HTTP GET for a profile photo
    pub image_fetch: Duration,

    /// Pause after clicking "next" so the following page can render
    pub page_settle: Duration,

    /// Pause after scrolling a candidate into view
    pub candidate_settle: Duration,

    /// Pause after closing a successfully extracted profile tab
    pub profile_cooldown: Duration,

    /// Pause after dismissing a loaded contact panel
    pub dismiss_pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            navigation: DEFAULT_NAVIGATION_TIMEOUT,
            profile_ready: DEFAULT_PROFILE_READY_TIMEOUT,
            contact_ready: DEFAULT_CONTACT_READY_TIMEOUT,
            step: DEFAULT_STEP_TIMEOUT,
            image_fetch: DEFAULT_IMAGE_TIMEOUT,
            page_settle: DEFAULT_PAGE_SETTLE,
            candidate_settle: DEFAULT_CANDIDATE_SETTLE,
            profile_cooldown: DEFAULT_PROFILE_COOLDOWN,
            dismiss_pause: DEFAULT_DISMISS_PAUSE,
        }
    }
}

impl Timings {
    /// Default bounds with every fixed delay removed.
    ///
    /// Timeouts keep their values; only the settle/cooldown pauses drop to zero.
    #[must_use]
    pub fn without_delays() -> Self {
        Self {
            page_settle: Duration::ZERO,
            candidate_settle: Duration::ZERO,
            profile_cooldown: Duration::ZERO,
            dismiss_pause: Duration::ZERO,
            ..Self::default()
        }
    }
}
