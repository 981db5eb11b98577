//! Crawl execution
//!
//! `open_landing` and `crawl_company` are the two halves of a run. The caller
//! sits between them for the manual gate: the operator gets to clear any
//! challenge on the landing page before its markup is read.

use tracing::info;

use super::company::resolve_company;
use super::crawl_types::{CrawlReport, ScrapeResult};
use super::paginator::PaginationDriver;
use super::records::{ProfileRecord, RecordAggregator};
use crate::asset_fetcher::ImageSource;
use crate::config::ScrapeConfig;
use crate::session::ResultsPage;

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlOutput {
    /// Records in encounter order
    pub records: Vec<ProfileRecord>,
    pub report: CrawlReport,
}

/// Load the company landing page on the results tab.
///
/// # Errors
///
/// Navigation failure or timeout; the run cannot continue without it.
pub async fn open_landing<P: ResultsPage>(page: &P, config: &ScrapeConfig) -> ScrapeResult<()> {
    page.goto(config.company_url(), config.timings().navigation).await?;
    Ok(())
}

/// Resolve the company on the already loaded landing page, open its people
/// search, and walk the result pages.
///
/// # Errors
///
/// `ScrapeError::CompanyNotFound` before any search happens, a navigation
/// error when the search page cannot be loaded, or a fatal extraction
/// failure from the pagination driver.
pub async fn crawl_company<P, I>(
    page: &P,
    images: &I,
    config: &ScrapeConfig,
) -> ScrapeResult<CrawlOutput>
where
    P: ResultsPage,
    I: ImageSource + ?Sized,
{
    let timings = *config.timings();
    let company = resolve_company(page, config.company_url()).await?;

    let search_url = company.search_url();
    page.goto(&search_url, timings.navigation).await?;
    if !timings.page_settle.is_zero() {
        tokio::time::sleep(timings.page_settle).await;
    }

    let mut records = RecordAggregator::new();
    let driver = PaginationDriver::new(page, images, config.page_limit(), timings);
    let report = driver.run(&mut records).await?;

    info!("Collected {} profile(s) for company {}", records.len(), company);

    Ok(CrawlOutput {
        records: records.into_records(),
        report,
    })
}
