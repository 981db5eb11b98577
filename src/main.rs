// roster-scrape: export a company's people-search results to a spreadsheet.
//
// Opens the company page in a persistent Chromium profile, waits for the
// operator to clear any challenge, then walks the results and writes
// `<output>.xlsx`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_scrape::{
    AssetFetcher, ChromeSession, CrawlOutput, ScrapeConfig, ScrapeError, crawl_company,
    export_records, open_landing, prepare_persistent_profile,
};

#[derive(Parser, Debug)]
#[command(
    name = "roster-scrape",
    about = "Collect the people listed under a company into an .xlsx sheet"
)]
struct Cli {
    /// Company landing page URL. Prompted for when omitted.
    #[arg(long, env = "ROSTER_COMPANY_URL")]
    company_url: Option<String>,

    /// Number of result pages to process. Prompted for when omitted.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "all_pages")]
    pages: Option<u32>,

    /// Process every result page without prompting.
    #[arg(long, default_value_t = false)]
    all_pages: bool,

    /// Output file name, `.xlsx` is appended. Prompted for when omitted.
    #[arg(long)]
    output: Option<String>,

    /// Persistent browser profile directory.
    #[arg(long, env = "ROSTER_PROFILE_DIR", default_value = "./profile")]
    profile_dir: PathBuf,

    /// Show the browser window instead of running headless.
    #[arg(long, default_value_t = false)]
    headful: bool,
}

fn prompt(label: &str) -> Result<String> {
    print!("[*] {label}");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Blank answers mean "all pages"; anything else must be a positive integer.
fn prompt_page_limit() -> Result<Option<u32>> {
    loop {
        let answer = prompt("How many pages to scrape? (ENTER = ALL): ")?;
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<u32>() {
            Ok(n) if n > 0 => return Ok(Some(n)),
            _ => println!("[!] Enter a positive whole number, or nothing for all pages"),
        }
    }
}

async fn wait_for_operator() -> Result<()> {
    println!("[*] Solve CAPTCHA if shown");
    tokio::task::spawn_blocking(|| prompt("Press ENTER to continue..."))
        .await
        .context("Operator prompt task failed")??;
    Ok(())
}

fn config_from_cli(cli: Cli) -> Result<ScrapeConfig> {
    let company_url = match cli.company_url {
        Some(url) => url,
        None => prompt("Enter company URL: ")?,
    };
    let page_limit = match (cli.pages, cli.all_pages) {
        (Some(n), _) => Some(n),
        (None, true) => None,
        (None, false) => prompt_page_limit()?,
    };
    let output = match cli.output {
        Some(name) => name,
        None => prompt("Enter Excel file name (without .xlsx): ")?,
    };

    ScrapeConfig::builder()
        .company_url(company_url)
        .page_limit(page_limit)
        .output_base(output)
        .profile_dir(cli.profile_dir)
        .headless(!cli.headful)
        .build()
}

async fn crawl(session: &ChromeSession, config: &ScrapeConfig) -> Result<CrawlOutput> {
    let images = AssetFetcher::new(config.timings().image_fetch, config.max_image_bytes())
        .context("Failed to build HTTP client")?;

    open_landing(session, config)
        .await
        .context("Failed to open company page")?;
    wait_for_operator().await?;

    match crawl_company(session, &images, config).await {
        Ok(output) => Ok(output),
        Err(e @ ScrapeError::CompanyNotFound { .. }) => {
            println!("[FATAL] Company ID not found");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roster_scrape=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config_from_cli(Cli::parse())?;
    let profile_dir = prepare_persistent_profile(config.profile_dir())?;

    let session = ChromeSession::launch(config.headless(), &profile_dir, config.timings().step)
        .await
        .context("Failed to start browser")?;

    // The browser is closed whatever the crawl returned
    let result = crawl(&session, &config).await;
    session.shutdown().await;

    let output = result.inspect_err(|e| error!("Crawl aborted: {:#}", e))?;
    info!("{}", output.report);

    let path = config.output_path();
    let saved = export_records(&output.records, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("\n[+] Saved {} profiles to {}", saved, path.display());

    Ok(())
}
