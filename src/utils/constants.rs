//! Shared constants for roster_scrape
//!
//! Selectors, sentinels, and default timings used across the crawl engine.
//! Keeping them in one place makes a site markup change a one-file edit.

use std::time::Duration;

/// Chrome user agent string for stealth mode
///
/// Sent by the launched browser and by the asset fetcher so image requests
/// look like they come from the same client as the session.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Base URL of the people-search results page
pub const PEOPLE_SEARCH_URL: &str = "https://www.linkedin.com/search/results/people/";

/// Literal prefix preceding the numeric company identifier in landing-page markup
pub const COMPANY_URN_PREFIX: &str = "urn:li:fsd_company:";

/// Display name used for members whose profile is hidden from the viewer
pub const ANONYMOUS_MEMBER: &str = "LinkedIn Member";

/// Substring marking sponsored/headless result links
pub const HEADLESS_MARKER: &str = "headless";

// =============================================================================
// Results page selectors
// =============================================================================

/// One avatar image per candidate on a results page
pub const CANDIDATE_AVATAR_SELECTOR: &str = "img.EntityPhoto-circle-3";

/// Class fragment carried by loading-skeleton containers
pub const GHOST_CLASS_FRAGMENT: &str = "ghost";

/// Pagination "next" button
pub const NEXT_BUTTON_SELECTOR: &str = "button.artdeco-pagination__button--next";

/// Class set on the next button once the last page is reached
pub const NEXT_DISABLED_CLASS: &str = "artdeco-button--disabled";

// =============================================================================
// Profile page selectors
// =============================================================================

/// Top-card photo; its presence confirms a real, rendered profile
pub const PROFILE_PHOTO_SELECTOR: &str = "img.pv-top-card-profile-picture__image--show";

pub const PROFILE_NAME_SELECTOR: &str = "h1.break-words";

pub const PROFILE_HEADLINE_SELECTOR: &str = "div.text-body-medium.break-words";

/// Link that opens the contact-info overlay
pub const CONTACT_TRIGGER_SELECTOR: &str = "#top-card-text-details-contact-info";

/// A populated contact-type section inside the overlay.
///
/// The overlay shell renders before its sections do, so this is the marker to
/// wait for.
pub const CONTACT_SECTION_SELECTOR: &str = "section.pv-contact-info__contact-type";

pub const CONTACT_HEADER_SELECTOR: &str = "h3";

pub const PHONE_VALUE_SELECTOR: &str = "span.t-black.t-normal";

pub const EMAIL_LINK_SELECTOR: &str = "a[href^='mailto:']";

pub const PHONE_HEADER: &str = "Phone";

pub const EMAIL_HEADER: &str = "Email";

/// Key dispatched to dismiss the contact overlay
pub const DISMISS_KEY: &str = "Escape";

// =============================================================================
// Defaults
// =============================================================================

/// Output base name used when the operator leaves it blank
pub const DEFAULT_OUTPUT_BASE: &str = "employees";

/// Persistent browser profile directory, relative to the working directory
pub const DEFAULT_PROFILE_DIR: &str = "./profile";

/// Largest profile photo that will be embedded (5 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PROFILE_READY_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_CONTACT_READY_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_PAGE_SETTLE: Duration = Duration::from_secs(5);
pub const DEFAULT_CANDIDATE_SETTLE: Duration = Duration::from_secs(1);
pub const DEFAULT_PROFILE_COOLDOWN: Duration = Duration::from_secs(1);
pub const DEFAULT_DISMISS_PAUSE: Duration = Duration::from_millis(500);

/// Slack added on top of a selector wait's own timeout before the engine
/// abandons the call
pub const WAIT_DEADLINE_MARGIN: Duration = Duration::from_secs(2);

/// Interval between DOM polls while waiting for a selector
pub const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);
