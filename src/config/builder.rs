//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The company URL is the only required field; `build()` is only available
//! once it has been set.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;
use url::Url;

use super::types::{ScrapeConfig, Timings};
use crate::utils::constants::{DEFAULT_MAX_IMAGE_BYTES, DEFAULT_OUTPUT_BASE, DEFAULT_PROFILE_DIR};

// Type states for the builder
pub struct WithCompanyUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) company_url: Option<String>,
    pub(crate) page_limit: Option<u32>,
    pub(crate) output_base: Option<String>,
    pub(crate) profile_dir: PathBuf,
    pub(crate) headless: bool,
    pub(crate) max_image_bytes: usize,
    pub(crate) timings: Timings,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            company_url: None,
            page_limit: None,
            output_base: None,
            profile_dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            headless: true,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            timings: Timings::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn company_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithCompanyUrl> {
        ScrapeConfigBuilder {
            company_url: Some(url.into()),
            page_limit: self.page_limit,
            output_base: self.output_base,
            profile_dir: self.profile_dir,
            headless: self.headless,
            max_image_bytes: self.max_image_bytes,
            timings: self.timings,
            _phantom: PhantomData,
        }
    }
}

impl<State> ScrapeConfigBuilder<State> {
    /// Cap the number of result pages. `None` means unbounded.
    #[must_use]
    pub fn page_limit(mut self, limit: Option<u32>) -> Self {
        self.page_limit = limit;
        self
    }

    /// Output base name; blank falls back to `employees` at build time.
    #[must_use]
    pub fn output_base(mut self, base: impl Into<String>) -> Self {
        self.output_base = Some(base.into());
        self
    }

    #[must_use]
    pub fn profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_dir = dir.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn max_image_bytes(mut self, bytes: usize) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    #[must_use]
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}

impl ScrapeConfigBuilder<WithCompanyUrl> {
    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Fails when the company URL is not an absolute http(s) URL, when a page
    /// limit of zero was given, or when the image cap is zero.
    pub fn build(self) -> Result<ScrapeConfig> {
        let company_url = self
            .company_url
            .map(|u| u.trim().to_string())
            .ok_or_else(|| anyhow!("company URL is required"))?;

        let parsed = Url::parse(&company_url)
            .map_err(|e| anyhow!("Invalid company URL '{company_url}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Company URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.page_limit == Some(0) {
            return Err(anyhow!("page limit must be at least 1"));
        }

        if self.max_image_bytes == 0 {
            return Err(anyhow!("max_image_bytes must be greater than zero"));
        }

        Ok(ScrapeConfig {
            company_url,
            page_limit: self.page_limit,
            output_base: normalize_output_base(self.output_base.as_deref()),
            profile_dir: self.profile_dir,
            headless: self.headless,
            max_image_bytes: self.max_image_bytes,
            timings: self.timings,
        })
    }
}

/// Blank names fall back to the default; a trailing `.xlsx` is dropped since
/// the exporter appends it.
fn normalize_output_base(base: Option<&str>) -> String {
    let trimmed = base.map(str::trim).unwrap_or_default();
    let stem = trimmed.strip_suffix(".xlsx").unwrap_or(trimmed).trim();
    if stem.is_empty() {
        DEFAULT_OUTPUT_BASE.to_string()
    } else {
        stem.to_string()
    }
}
