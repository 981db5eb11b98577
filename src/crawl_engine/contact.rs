//! Contact panel reveal, parse and dismiss
//!
//! The panel is driven by `reveal_contacts`, a loop over `PanelState`. Every
//! path that opened the panel leaves through the same dismiss step, so the
//! profile tab is never left with the overlay up.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace, warn};

use super::page_timeout::with_page_timeout;
use crate::config::Timings;
use crate::session::ProfileTab;
use crate::utils::constants::{
    CONTACT_HEADER_SELECTOR, CONTACT_SECTION_SELECTOR, CONTACT_TRIGGER_SELECTOR, DISMISS_KEY,
    EMAIL_HEADER, EMAIL_LINK_SELECTOR, PHONE_HEADER, PHONE_VALUE_SELECTOR, WAIT_DEADLINE_MARGIN,
};

/// Phones and emails found in one profile's contact panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBlock {
    phones: Vec<String>,
    emails: Vec<String>,
}

impl ContactBlock {
    #[must_use]
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty() && self.emails.is_empty()
    }

    /// Keep `value` only if it looks like an international phone number
    pub fn push_phone(&mut self, value: &str) {
        let value = value.trim();
        if is_phone(value) {
            self.phones.push(value.to_string());
        }
    }

    /// Keep `value` only if it looks like an email address
    pub fn push_email(&mut self, value: &str) {
        let value = value.trim();
        if is_email(value) {
            self.emails.push(value.to_string());
        }
    }
}

/// Leading `+`, nothing else is checked
#[must_use]
pub fn is_phone(value: &str) -> bool {
    value.starts_with('+')
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    value.contains('@')
}

/// Where the panel is in its open/close protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelState {
    Closed,
    Opening,
    Loaded,
    TimedOut,
    Faulted,
}

/// Open the contact panel on `tab`, collect its phones and emails, close it.
///
/// Never fails: a missing trigger, a panel that never renders, or a browser
/// fault all degrade to an empty block. Each browser call is bounded by
/// `timings.step`, the panel wait by `timings.contact_ready`.
pub async fn reveal_contacts<T: ProfileTab>(tab: &T, timings: &Timings) -> ContactBlock {
    let mut contacts = ContactBlock::default();
    let mut state = PanelState::Closed;

    loop {
        trace!("Contact panel state: {:?}", state);
        state = match state {
            PanelState::Closed => match with_page_timeout(
                tab.exists(CONTACT_TRIGGER_SELECTOR),
                timings.step,
                "contact trigger lookup",
            )
            .await
            {
                Ok(false) => {
                    debug!("No contact info trigger on profile");
                    return contacts;
                }
                Ok(true) => match with_page_timeout(
                    tab.force_click(CONTACT_TRIGGER_SELECTOR),
                    timings.step,
                    "contact trigger click",
                )
                .await
                {
                    Ok(()) => PanelState::Opening,
                    Err(e) => {
                        warn!("Contact trigger click failed: {}", e);
                        PanelState::Faulted
                    }
                },
                Err(e) => {
                    warn!("Contact trigger lookup failed: {}", e);
                    PanelState::Faulted
                }
            },
            PanelState::Opening => {
                match with_page_timeout(
                    tab.wait_for(CONTACT_SECTION_SELECTOR, timings.contact_ready),
                    timings.contact_ready + WAIT_DEADLINE_MARGIN,
                    "contact panel",
                )
                .await
                {
                    Ok(()) => PanelState::Loaded,
                    Err(e) if e.is_timeout() => PanelState::TimedOut,
                    Err(e) => {
                        warn!("Contact panel wait failed: {}", e);
                        PanelState::Faulted
                    }
                }
            }
            PanelState::Loaded => match with_page_timeout(
                tab.outer_html_all(CONTACT_SECTION_SELECTOR),
                timings.step,
                "contact sections",
            )
            .await
            {
                Ok(sections) => {
                    contacts = parse_contact_sections(&sections);
                    break;
                }
                Err(e) => {
                    warn!("Reading contact sections failed: {}", e);
                    PanelState::Faulted
                }
            },
            PanelState::TimedOut => {
                debug!(
                    "Contact panel did not load within {:?}",
                    timings.contact_ready
                );
                break;
            }
            PanelState::Faulted => break,
        };
    }

    dismiss_panel(tab, state, timings).await;
    contacts
}

/// Terminal transition back to `Closed`. The post-dismiss pause only follows
/// a panel that actually loaded.
async fn dismiss_panel<T: ProfileTab>(tab: &T, from: PanelState, timings: &Timings) {
    let dismissed = with_page_timeout(tab.press_key(DISMISS_KEY), timings.step, "dismiss panel");
    if let Err(e) = dismissed.await {
        debug!("Contact panel dismiss failed: {}", e);
        return;
    }
    if from == PanelState::Loaded && !timings.dismiss_pause.is_zero() {
        tokio::time::sleep(timings.dismiss_pause).await;
    }
}

/// Parse the outer HTML of each contact section.
///
/// Sections are classified by their `h3` header; only `Phone` and `Email`
/// sections contribute, and their values pass the phone/email filters.
#[must_use]
pub fn parse_contact_sections<S: AsRef<str>>(sections: &[S]) -> ContactBlock {
    let header_sel = selector(CONTACT_HEADER_SELECTOR);
    let phone_sel = selector(PHONE_VALUE_SELECTOR);
    let email_sel = selector(EMAIL_LINK_SELECTOR);

    let mut contacts = ContactBlock::default();

    for section in sections {
        let fragment = Html::parse_fragment(section.as_ref());
        let root = fragment.root_element();

        let header = root
            .select(&header_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if header == PHONE_HEADER {
            for span in root.select(&phone_sel) {
                contacts.push_phone(&element_text(span));
            }
        } else if header == EMAIL_HEADER {
            for link in root.select(&email_sel) {
                contacts.push_email(&element_text(link));
            }
        }
    }

    contacts
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("BUG: hardcoded contact panel selector is invalid")
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(header: &str, body: &str) -> String {
        format!(
            r#"<section class="pv-contact-info__contact-type"><h3 class="t-16 t-bold"> {header} </h3>{body}</section>"#
        )
    }

    #[test]
    fn phone_values_need_leading_plus() {
        let html = section(
            "Phone",
            r#"<ul><li><span class="t-14 t-black t-normal">+1 555 0100</span><span class="t-black--light">(Mobile)</span></li>
               <li><span class="t-14 t-black t-normal">5550101</span></li></ul>"#,
        );
        let contacts = parse_contact_sections(&[html]);
        assert_eq!(contacts.phones(), ["+1 555 0100"]);
        assert!(contacts.emails().is_empty());
    }

    #[test]
    fn email_values_need_at_sign() {
        let html = section(
            "Email",
            r#"<div><a href="mailto:ada@example.com"> ada@example.com </a><a href="mailto:x">nobody</a><a href="https://x">b@c</a></div>"#,
        );
        let contacts = parse_contact_sections(&[html]);
        assert_eq!(contacts.emails(), ["ada@example.com"]);
    }

    #[test]
    fn unknown_headers_ignored() {
        let html = section(
            "Website",
            r#"<span class="t-black t-normal">+44 20 7946 0000</span><a href="mailto:a@b">a@b</a>"#,
        );
        assert!(parse_contact_sections(&[html]).is_empty());
    }

    #[test]
    fn header_match_is_exact() {
        let html = section("Phones", r#"<span class="t-black t-normal">+1 1</span>"#);
        assert!(parse_contact_sections(&[html]).is_empty());
    }
}
