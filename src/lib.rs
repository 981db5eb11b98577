pub mod asset_fetcher;
pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod crawl_engine;
pub mod exporter;
pub mod session;
pub mod utils;

pub use asset_fetcher::{AssetFetcher, ImageSource};
pub use browser_profile::prepare_persistent_profile;
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ScrapeConfig, Timings};
pub use crawl_engine::{
    CompanyIdentity, ContactBlock, CrawlOutput, CrawlReport, ExtractFailure, ExtractOutcome,
    ProfileRecord, RecordAggregator, ScrapeError, ScrapeResult, SkipReason, crawl_company,
    open_landing,
};
pub use exporter::export_records;
pub use session::{
    CandidateEntry, ChromeSession, ChromeTab, NextControl, ProfileTab, ResultsPage, SessionError,
    SessionResult,
};
