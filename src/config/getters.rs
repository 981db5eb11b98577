//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};

use super::types::{ScrapeConfig, Timings};

impl ScrapeConfig {
    #[must_use]
    pub fn company_url(&self) -> &str {
        &self.company_url
    }

    #[must_use]
    pub fn page_limit(&self) -> Option<u32> {
        self.page_limit
    }

    #[must_use]
    pub fn output_base(&self) -> &str {
        &self.output_base
    }

    /// Final spreadsheet path: `<output_base>.xlsx` in the working directory
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.xlsx", self.output_base))
    }

    #[must_use]
    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    #[must_use]
    pub fn timings(&self) -> &Timings {
        &self.timings
    }
}
