//! Company identifier resolution and search URL construction

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::{info, warn};

use super::crawl_types::{ScrapeError, ScrapeResult};
use crate::session::ResultsPage;
use crate::utils::constants::{COMPANY_URN_PREFIX, PEOPLE_SEARCH_URL};

static COMPANY_URN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{}(\d+)", regex::escape(COMPANY_URN_PREFIX)))
        .expect("Invalid company URN regex")
});

/// Numeric company identifier, immutable once resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyIdentity(String);

impl CompanyIdentity {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// People-search URL filtered to current employees of this company
    #[must_use]
    pub fn search_url(&self) -> String {
        // %5B%22 ... %22%5D is the URL-encoded JSON array ["<id>"]
        format!("{PEOPLE_SEARCH_URL}?currentCompany=%5B%22{}%22%5D", self.0)
    }
}

impl fmt::Display for CompanyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First company identifier embedded in `markup`, if any
#[must_use]
pub fn find_company_id(markup: &str) -> Option<CompanyIdentity> {
    COMPANY_URN
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| CompanyIdentity(m.as_str().to_string()))
}

/// Read the loaded landing page and extract its company identifier.
///
/// # Errors
///
/// `ScrapeError::CompanyNotFound` when the markup carries no identifier, or
/// the session error when the markup cannot be read. Neither is retried.
pub async fn resolve_company<P: ResultsPage>(
    page: &P,
    landing_url: &str,
) -> ScrapeResult<CompanyIdentity> {
    let markup = page.content().await?;

    match find_company_id(&markup) {
        Some(identity) => {
            info!("Resolved company id {}", identity);
            Ok(identity)
        }
        None => {
            warn!("No company identifier in {} bytes of markup", markup.len());
            Err(ScrapeError::CompanyNotFound {
                url: landing_url.to_string(),
            })
        }
    }
}
