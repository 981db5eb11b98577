//! Crawl Engine Module
//!
//! Company resolution, the pagination driver, per-candidate profile
//! extraction and the contact panel protocol. Everything here is written
//! against the `session` traits and never touches chromiumoxide directly.

pub mod company;
pub mod contact;
pub mod crawl_types;
pub mod execution;
pub mod page_timeout;
pub mod paginator;
pub mod profile;
pub mod records;

pub use company::{CompanyIdentity, find_company_id, resolve_company};
pub use contact::{ContactBlock, is_email, is_phone, parse_contact_sections, reveal_contacts};
pub use crawl_types::{
    CrawlReport, ExtractFailure, ExtractOutcome, PageCursor, ScrapeError, ScrapeResult,
    SkipReason,
};
pub use execution::{CrawlOutput, crawl_company, open_landing};
pub use paginator::{PaginationDriver, StopReason, cap_reached, classify_candidate};
pub use profile::{extract_profile, reject_name};
pub use records::{ProfileRecord, RecordAggregator};
