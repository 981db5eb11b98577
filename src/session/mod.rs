//! Browsing-session capability
//!
//! The crawl engine never talks to a browser directly. It is handed a
//! `ResultsPage` (the long-lived search-results tab) and receives `ProfileTab`
//! handles from it, one per candidate. The two are distinct types: a profile
//! tab can be read, clicked and closed, but it cannot navigate the results
//! page, and the results page is only navigated by the pagination driver.
//!
//! `chrome` implements both traits on top of chromiumoxide.

pub mod chrome;
mod js_scripts;
mod page_helpers;

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::utils::constants::NEXT_DISABLED_CLASS;

pub use chrome::{ChromeSession, ChromeTab};

/// Failure of a single browser operation
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A bounded wait expired
    #[error("{what} timeout after {after:?}")]
    Timeout { what: String, after: Duration },

    /// A selector that had to match did not
    #[error("element not found: {0}")]
    NotFound(String),

    /// Browser communication or script evaluation failed
    #[error("browser error: {0}")]
    Browser(String),
}

impl SessionError {
    pub fn timeout(what: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            what: what.into(),
            after,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for SessionError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// One avatar entry on a results page, as observed after scrolling it into view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateEntry {
    /// Position within the page, in DOM order
    pub ordinal_index: usize,

    /// Raw `href` of the nearest enclosing link, if any
    pub target_href: Option<String>,

    /// The avatar sits inside a loading-skeleton container
    pub ghost: bool,
}

/// State of the pagination "next" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextControl {
    Absent,
    Disabled,
    Enabled,
}

impl NextControl {
    /// Classify a present control from its `class` attribute.
    #[must_use]
    pub fn from_class(class: Option<&str>) -> Self {
        match class {
            Some(c) if c.split_whitespace().any(|name| name == NEXT_DISABLED_CLASS) => {
                Self::Disabled
            }
            _ => Self::Enabled,
        }
    }
}

/// An isolated tab opened for one candidate
#[async_trait]
pub trait ProfileTab: Send + Sync + Sized {
    /// Wait until `selector` matches at least one element, or fail with
    /// `SessionError::Timeout` once `timeout` has elapsed.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> SessionResult<()>;

    async fn exists(&self, selector: &str) -> SessionResult<bool>;

    /// Text of the first match, `None` when nothing matches
    async fn text(&self, selector: &str) -> SessionResult<Option<String>>;

    /// Attribute of the first match, `None` when nothing matches or the
    /// attribute is unset
    async fn attribute(&self, selector: &str, name: &str) -> SessionResult<Option<String>>;

    /// URL after any redirects
    async fn current_url(&self) -> SessionResult<String>;

    /// Click the first match directly on the element, ignoring anything
    /// overlaying it. `SessionError::NotFound` when nothing matches.
    async fn force_click(&self, selector: &str) -> SessionResult<()>;

    /// Outer HTML of every match, in document order
    async fn outer_html_all(&self, selector: &str) -> SessionResult<Vec<String>>;

    async fn press_key(&self, key: &str) -> SessionResult<()>;

    async fn close(self) -> SessionResult<()>;
}

/// The long-lived search-results tab
#[async_trait]
pub trait ResultsPage: Send + Sync {
    type Tab: ProfileTab;

    async fn goto(&self, url: &str, timeout: Duration) -> SessionResult<()>;

    /// Full rendered markup of the current document
    async fn content(&self) -> SessionResult<String>;

    /// Number of candidate avatars currently on the page
    async fn candidate_count(&self) -> SessionResult<usize>;

    /// Scroll candidate `index` into view so lazy content can render
    async fn scroll_to_candidate(&self, index: usize) -> SessionResult<()>;

    /// Inspect candidate `index`; `None` when the page no longer has it
    async fn inspect_candidate(&self, index: usize) -> SessionResult<Option<CandidateEntry>>;

    async fn next_control(&self) -> SessionResult<NextControl>;

    /// Scroll the next control into view and click it
    async fn advance(&self) -> SessionResult<()>;

    /// Open `href` in a new tab of the same session
    async fn open_tab(&self, href: &str) -> SessionResult<Self::Tab>;
}
