//! In-memory browsing session shared by the crawl tests
//!
//! `FakeResults` plays the results tab: a list of pages, each with candidate
//! entries and a next-control state. Profiles are looked up by href when a
//! tab is opened. Everything the engine does to the session is recorded in a
//! shared `SessionLog` so tests can assert on it.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use roster_scrape::utils::constants::{
    CONTACT_SECTION_SELECTOR, CONTACT_TRIGGER_SELECTOR, PROFILE_HEADLINE_SELECTOR,
    PROFILE_NAME_SELECTOR, PROFILE_PHOTO_SELECTOR,
};
use roster_scrape::{
    CandidateEntry, ImageSource, NextControl, ProfileTab, ResultsPage, SessionError,
    SessionResult, Timings,
};

pub const PHOTO_URL: &str = "https://media.example.test/photo.jpg";

/// A 1x1 transparent PNG
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn fast_timings() -> Timings {
    Timings {
        contact_ready: Duration::from_millis(50),
        profile_ready: Duration::from_millis(50),
        step: Duration::from_millis(200),
        ..Timings::without_delays()
    }
}

/// Outer HTML of one contact section
pub fn contact_section(header: &str, body: &str) -> String {
    format!(
        r#"<section class="pv-contact-info__contact-type"><h3 class="pv-contact-info__header t-16 t-black t-bold">{header}</h3>{body}</section>"#
    )
}

pub fn phone_section(values: &[&str]) -> String {
    let spans: String = values
        .iter()
        .map(|v| format!(r#"<li><span class="t-14 t-black t-normal">{v}</span></li>"#))
        .collect();
    contact_section("Phone", &format!("<ul>{spans}</ul>"))
}

pub fn email_section(values: &[&str]) -> String {
    let links: String = values
        .iter()
        .map(|v| format!(r#"<a class="pv-contact-info__contact-link" href="mailto:{v}">{v}</a>"#))
        .collect();
    contact_section("Email", &format!("<div>{links}</div>"))
}

#[derive(Debug, Clone)]
pub enum FakeContact {
    /// No contact-info trigger on the profile
    Absent,
    /// Trigger present, panel never renders a section
    NeverLoads,
    /// Trigger present, panel renders these section fragments
    Loaded(Vec<String>),
}

/// Browser faults a fake tab can be told to produce
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeFaults {
    /// The contact trigger lookup never resolves
    pub hang_trigger_lookup: bool,
    /// Text reads fail with a browser error
    pub fail_text: bool,
    /// Key presses fail with a browser error
    pub fail_dismiss: bool,
    /// Closing the tab fails with a browser error
    pub fail_close: bool,
}

#[derive(Debug, Clone)]
pub struct FakeProfile {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub url: String,
    pub photo_src: Option<String>,
    /// The top-card photo marker appears
    pub ready: bool,
    pub contact: FakeContact,
    pub faults: FakeFaults,
}

impl FakeProfile {
    pub fn named(name: &str) -> Self {
        let slug = name.to_lowercase().replace(' ', "-");
        Self {
            name: Some(format!("\n   {name}  \n")),
            headline: Some("  Engineer at Example  ".to_string()),
            url: format!("https://www.linkedin.com/in/{slug}/"),
            photo_src: Some(PHOTO_URL.to_string()),
            ready: true,
            contact: FakeContact::Absent,
            faults: FakeFaults::default(),
        }
    }

    pub fn with_contact(mut self, contact: FakeContact) -> Self {
        self.contact = contact;
        self
    }

    pub fn without_photo(mut self) -> Self {
        self.photo_src = None;
        self
    }

    pub fn never_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn hanging_trigger(mut self) -> Self {
        self.faults.hang_trigger_lookup = true;
        self
    }

    pub fn failing_text(mut self) -> Self {
        self.faults.fail_text = true;
        self
    }

    pub fn failing_dismiss(mut self) -> Self {
        self.faults.fail_dismiss = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.faults.fail_close = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct SessionLog {
    pub visited: Vec<String>,
    pub opened: Vec<String>,
    pub closed: usize,
    pub keys: Vec<String>,
    pub clicks: Vec<String>,
    pub advances: usize,
    pub scrolled: Vec<usize>,
}

pub type SharedLog = Arc<Mutex<SessionLog>>;

pub struct FakeTab {
    profile: FakeProfile,
    panel_open: Mutex<bool>,
    log: SharedLog,
}

impl FakeTab {
    pub fn new(profile: FakeProfile, log: SharedLog) -> Self {
        Self {
            profile,
            panel_open: Mutex::new(false),
            log,
        }
    }

    fn panel_loaded(&self) -> bool {
        *self.panel_open.lock().unwrap() && matches!(self.profile.contact, FakeContact::Loaded(_))
    }
}

#[async_trait]
impl ProfileTab for FakeTab {
    async fn wait_for(&self, selector: &str, timeout: Duration) -> SessionResult<()> {
        let present = match selector {
            PROFILE_PHOTO_SELECTOR => self.profile.ready,
            CONTACT_SECTION_SELECTOR => self.panel_loaded(),
            _ => false,
        };
        if present {
            Ok(())
        } else {
            Err(SessionError::timeout(format!("wait for {selector}"), timeout))
        }
    }

    async fn exists(&self, selector: &str) -> SessionResult<bool> {
        if selector == CONTACT_TRIGGER_SELECTOR && self.profile.faults.hang_trigger_lookup {
            std::future::pending::<()>().await;
        }
        Ok(match selector {
            CONTACT_TRIGGER_SELECTOR => !matches!(self.profile.contact, FakeContact::Absent),
            PROFILE_PHOTO_SELECTOR => self.profile.ready,
            CONTACT_SECTION_SELECTOR => self.panel_loaded(),
            _ => false,
        })
    }

    async fn text(&self, selector: &str) -> SessionResult<Option<String>> {
        if self.profile.faults.fail_text {
            return Err(SessionError::Browser("text read failed".to_string()));
        }
        Ok(match selector {
            PROFILE_NAME_SELECTOR => self.profile.name.clone(),
            PROFILE_HEADLINE_SELECTOR => self.profile.headline.clone(),
            _ => None,
        })
    }

    async fn attribute(&self, selector: &str, name: &str) -> SessionResult<Option<String>> {
        if selector == PROFILE_PHOTO_SELECTOR && name == "src" && self.profile.ready {
            Ok(self.profile.photo_src.clone())
        } else {
            Ok(None)
        }
    }

    async fn current_url(&self) -> SessionResult<String> {
        Ok(self.profile.url.clone())
    }

    async fn force_click(&self, selector: &str) -> SessionResult<()> {
        self.log.lock().unwrap().clicks.push(selector.to_string());
        if selector == CONTACT_TRIGGER_SELECTOR
            && !matches!(self.profile.contact, FakeContact::Absent)
        {
            *self.panel_open.lock().unwrap() = true;
            Ok(())
        } else {
            Err(SessionError::NotFound(selector.to_string()))
        }
    }

    async fn outer_html_all(&self, selector: &str) -> SessionResult<Vec<String>> {
        match (&self.profile.contact, selector) {
            (FakeContact::Loaded(sections), CONTACT_SECTION_SELECTOR) if self.panel_loaded() => {
                Ok(sections.clone())
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn press_key(&self, key: &str) -> SessionResult<()> {
        self.log.lock().unwrap().keys.push(key.to_string());
        if self.profile.faults.fail_dismiss {
            return Err(SessionError::Browser("key dispatch failed".to_string()));
        }
        *self.panel_open.lock().unwrap() = false;
        Ok(())
    }

    async fn close(self) -> SessionResult<()> {
        self.log.lock().unwrap().closed += 1;
        if self.profile.faults.fail_close {
            return Err(SessionError::Browser("target already gone".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FakePage {
    pub candidates: Vec<CandidateEntry>,
    pub next: NextControl,
}

impl FakePage {
    /// One linked, non-ghost candidate per href
    pub fn linking(hrefs: &[&str], next: NextControl) -> Self {
        let candidates = hrefs
            .iter()
            .enumerate()
            .map(|(i, href)| CandidateEntry {
                ordinal_index: i,
                target_href: Some((*href).to_string()),
                ghost: false,
            })
            .collect();
        Self { candidates, next }
    }
}

pub struct FakeResults {
    landing_markup: String,
    pages: Vec<FakePage>,
    profiles: HashMap<String, FakeProfile>,
    current: Mutex<usize>,
    pub log: SharedLog,
}

impl FakeResults {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            landing_markup: r#"<html><body><code>{"entityUrn":"urn:li:fsd_company:1441"}</code></body></html>"#
                .to_string(),
            pages,
            profiles: HashMap::new(),
            current: Mutex::new(0),
            log: Arc::new(Mutex::new(SessionLog::default())),
        }
    }

    pub fn with_landing(mut self, markup: &str) -> Self {
        self.landing_markup = markup.to_string();
        self
    }

    pub fn with_profile(mut self, href: &str, profile: FakeProfile) -> Self {
        self.profiles.insert(href.to_string(), profile);
        self
    }

    pub fn tab_for(&self, profile: FakeProfile) -> FakeTab {
        FakeTab::new(profile, Arc::clone(&self.log))
    }

    fn page(&self) -> Option<FakePage> {
        self.pages.get(*self.current.lock().unwrap()).cloned()
    }
}

#[async_trait]
impl ResultsPage for FakeResults {
    type Tab = FakeTab;

    async fn goto(&self, url: &str, _timeout: Duration) -> SessionResult<()> {
        self.log.lock().unwrap().visited.push(url.to_string());
        *self.current.lock().unwrap() = 0;
        Ok(())
    }

    async fn content(&self) -> SessionResult<String> {
        Ok(self.landing_markup.clone())
    }

    async fn candidate_count(&self) -> SessionResult<usize> {
        Ok(self.page().map_or(0, |p| p.candidates.len()))
    }

    async fn scroll_to_candidate(&self, index: usize) -> SessionResult<()> {
        self.log.lock().unwrap().scrolled.push(index);
        Ok(())
    }

    async fn inspect_candidate(&self, index: usize) -> SessionResult<Option<CandidateEntry>> {
        Ok(self.page().and_then(|p| p.candidates.get(index).cloned()))
    }

    async fn next_control(&self) -> SessionResult<NextControl> {
        Ok(self.page().map_or(NextControl::Absent, |p| p.next))
    }

    async fn advance(&self) -> SessionResult<()> {
        self.log.lock().unwrap().advances += 1;
        *self.current.lock().unwrap() += 1;
        Ok(())
    }

    async fn open_tab(&self, href: &str) -> SessionResult<FakeTab> {
        self.log.lock().unwrap().opened.push(href.to_string());
        self.profiles
            .get(href)
            .cloned()
            .map(|profile| self.tab_for(profile))
            .ok_or_else(|| SessionError::Browser(format!("no profile behind {href}")))
    }
}

/// Serves fixed bytes per URL and records every request
#[derive(Default)]
pub struct FakeImages {
    pub served: HashMap<String, Bytes>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn serving(url: &str, bytes: &'static [u8]) -> Self {
        let mut served = HashMap::new();
        served.insert(url.to_string(), Bytes::from_static(bytes));
        Self {
            served,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn fetch(&self, url: &str) -> Option<Bytes> {
        self.requested.lock().unwrap().push(url.to_string());
        self.served.get(url).cloned()
    }
}
