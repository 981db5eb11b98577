//! chromiumoxide implementation of the browsing-session capability
//!
//! `ChromeSession` owns the browser process, its CDP handler task and the
//! results tab. `ChromeTab` wraps one extra tab opened for a candidate.

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::page::Page;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::js_scripts::{
    candidate_probe_script, force_click_script, scroll_candidate_script, text_content_script,
};
use super::page_helpers::{evaluate_value, get_page_url_with_fallback, wait_for_selector};
use super::{
    CandidateEntry, NextControl, ProfileTab, ResultsPage, SessionError, SessionResult,
};
use crate::browser_setup::launch_browser;
use crate::crawl_engine::page_timeout::with_page_timeout;
use crate::utils::constants::{CANDIDATE_AVATAR_SELECTOR, NEXT_BUTTON_SELECTOR};

/// Browser process plus the results tab
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    results: Page,
    step_timeout: Duration,
}

impl ChromeSession {
    /// Launch Chromium on `profile_dir` and open the results tab.
    ///
    /// # Errors
    ///
    /// Fails when no browser can be found or downloaded, or it does not start.
    pub async fn launch(
        headless: bool,
        profile_dir: &Path,
        step_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let (browser, handler) = launch_browser(headless, profile_dir).await?;

        let results = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(anyhow::anyhow!("Failed to open results tab: {e}"));
            }
        };

        Ok(Self {
            browser,
            handler,
            results,
            step_timeout,
        })
    }

    /// Close the browser and stop the handler task.
    ///
    /// Best-effort: failures are logged, never returned.
    pub async fn shutdown(mut self) {
        info!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Waiting for browser exit failed: {}", e);
        }
        self.handler.abort();
    }

    async fn resolve_href(&self, href: &str) -> SessionResult<String> {
        let base = get_page_url_with_fallback(&self.results).await;
        match Url::parse(href) {
            Ok(absolute) => Ok(absolute.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&base)
                .and_then(|b| b.join(href))
                .map(|u| u.to_string())
                .map_err(|e| SessionError::Browser(format!("cannot resolve '{href}': {e}"))),
            Err(e) => Err(SessionError::Browser(format!("invalid link '{href}': {e}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CandidateProbe {
    present: bool,
    ghost: bool,
    target_href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextProbe {
    found: bool,
    text: Option<String>,
}

#[async_trait]
impl ResultsPage for ChromeSession {
    type Tab = ChromeTab;

    async fn goto(&self, url: &str, timeout: Duration) -> SessionResult<()> {
        info!("Navigating to {}", url);
        with_page_timeout(
            async {
                self.results
                    .goto(url)
                    .await
                    .map(|_| ())
                    .map_err(SessionError::from)
            },
            timeout,
            "Page navigation",
        )
        .await
    }

    async fn content(&self) -> SessionResult<String> {
        with_page_timeout(
            async { self.results.content().await.map_err(SessionError::from) },
            self.step_timeout,
            "Read page content",
        )
        .await
    }

    async fn candidate_count(&self) -> SessionResult<usize> {
        let avatars = self.results.find_elements(CANDIDATE_AVATAR_SELECTOR).await?;
        Ok(avatars.len())
    }

    async fn scroll_to_candidate(&self, index: usize) -> SessionResult<()> {
        let found: bool = evaluate_value(&self.results, &scroll_candidate_script(index)).await?;
        if found {
            Ok(())
        } else {
            Err(SessionError::NotFound(format!(
                "{CANDIDATE_AVATAR_SELECTOR} #{index}"
            )))
        }
    }

    async fn inspect_candidate(&self, index: usize) -> SessionResult<Option<CandidateEntry>> {
        let probe: CandidateProbe =
            evaluate_value(&self.results, &candidate_probe_script(index)).await?;

        Ok(probe.present.then(|| CandidateEntry {
            ordinal_index: index,
            target_href: probe.target_href,
            ghost: probe.ghost,
        }))
    }

    async fn next_control(&self) -> SessionResult<NextControl> {
        let buttons = self.results.find_elements(NEXT_BUTTON_SELECTOR).await?;
        let Some(button) = buttons.first() else {
            return Ok(NextControl::Absent);
        };
        let class = button.attribute("class").await?;
        Ok(NextControl::from_class(class.as_deref()))
    }

    async fn advance(&self) -> SessionResult<()> {
        let button = self.results.find_element(NEXT_BUTTON_SELECTOR).await?;
        button.scroll_into_view().await?;
        button.click().await?;
        Ok(())
    }

    async fn open_tab(&self, href: &str) -> SessionResult<ChromeTab> {
        let target = self.resolve_href(href).await?;
        debug!("Opening profile tab: {}", target);

        let page = with_page_timeout(
            async {
                self.browser
                    .new_page(target.as_str())
                    .await
                    .map_err(SessionError::from)
            },
            self.step_timeout,
            "Open profile tab",
        )
        .await?;

        Ok(ChromeTab { page })
    }
}

/// A candidate's profile, opened in its own tab
pub struct ChromeTab {
    page: Page,
}

/// Windows virtual key code for the keys the crawler dispatches
fn virtual_key_code(key: &str) -> Option<i64> {
    match key {
        "Escape" => Some(27),
        "Enter" => Some(13),
        "Tab" => Some(9),
        _ => None,
    }
}

#[async_trait]
impl ProfileTab for ChromeTab {
    async fn wait_for(&self, selector: &str, timeout: Duration) -> SessionResult<()> {
        wait_for_selector(&self.page, selector, timeout).await
    }

    async fn exists(&self, selector: &str) -> SessionResult<bool> {
        Ok(!self.page.find_elements(selector).await?.is_empty())
    }

    async fn text(&self, selector: &str) -> SessionResult<Option<String>> {
        let probe: TextProbe = evaluate_value(&self.page, &text_content_script(selector)).await?;
        Ok(probe.text.filter(|_| probe.found))
    }

    async fn attribute(&self, selector: &str, name: &str) -> SessionResult<Option<String>> {
        let elements = self.page.find_elements(selector).await?;
        match elements.first() {
            Some(el) => Ok(el.attribute(name).await?),
            None => Ok(None),
        }
    }

    async fn current_url(&self) -> SessionResult<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| SessionError::Browser("tab has no URL".to_string()))
    }

    async fn force_click(&self, selector: &str) -> SessionResult<()> {
        let clicked: bool = evaluate_value(&self.page, &force_click_script(selector)).await?;
        if clicked {
            Ok(())
        } else {
            Err(SessionError::NotFound(selector.to_string()))
        }
    }

    async fn outer_html_all(&self, selector: &str) -> SessionResult<Vec<String>> {
        let elements = self.page.find_elements(selector).await?;
        let mut html = Vec::with_capacity(elements.len());
        for el in &elements {
            if let Some(fragment) = el.outer_html().await? {
                html.push(fragment);
            }
        }
        Ok(html)
    }

    async fn press_key(&self, key: &str) -> SessionResult<()> {
        for kind in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
            let mut builder = DispatchKeyEventParams::builder()
                .r#type(kind)
                .key(key)
                .code(key);
            if let Some(code) = virtual_key_code(key) {
                builder = builder.windows_virtual_key_code(code);
            }
            let params = builder.build().map_err(SessionError::Browser)?;
            self.page.execute(params).await?;
        }
        Ok(())
    }

    async fn close(self) -> SessionResult<()> {
        self.page.close().await?;
        Ok(())
    }
}
