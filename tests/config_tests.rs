//! Tests for the type-safe configuration builder

use roster_scrape::config::{ScrapeConfig, Timings};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_builder_defaults() {
    // Does not compile without a company URL:
    // let config = ScrapeConfig::builder().build();

    let config = ScrapeConfig::builder()
        .company_url("https://www.linkedin.com/company/example/")
        .build()
        .unwrap();

    assert_eq!(config.company_url(), "https://www.linkedin.com/company/example/");
    assert_eq!(config.page_limit(), None);
    assert_eq!(config.output_base(), "employees");
    assert_eq!(config.output_path(), PathBuf::from("employees.xlsx"));
    assert_eq!(config.profile_dir(), Path::new("./profile"));
    assert!(config.headless());
    assert_eq!(config.max_image_bytes(), 5 * 1024 * 1024);

    let timings = config.timings();
    assert_eq!(timings.navigation, Duration::from_secs(60));
    assert_eq!(timings.profile_ready, Duration::from_secs(20));
    assert_eq!(timings.contact_ready, Duration::from_secs(10));
    assert_eq!(timings.image_fetch, Duration::from_secs(15));
    assert_eq!(timings.page_settle, Duration::from_secs(5));
    assert_eq!(timings.candidate_settle, Duration::from_secs(1));
    assert_eq!(timings.dismiss_pause, Duration::from_millis(500));
}

#[test]
fn test_builder_with_all_fields() {
    let config = ScrapeConfig::builder()
        .page_limit(Some(3))
        .company_url("  https://www.linkedin.com/company/acme  ")
        .output_base("acme-staff.xlsx")
        .profile_dir("/tmp/roster-profile")
        .headless(false)
        .max_image_bytes(1024)
        .timings(Timings::without_delays())
        .build()
        .unwrap();

    assert_eq!(config.company_url(), "https://www.linkedin.com/company/acme");
    assert_eq!(config.page_limit(), Some(3));
    assert_eq!(config.output_path(), PathBuf::from("acme-staff.xlsx"));
    assert_eq!(config.profile_dir(), Path::new("/tmp/roster-profile"));
    assert!(!config.headless());
    assert_eq!(config.max_image_bytes(), 1024);
    assert!(config.timings().page_settle.is_zero());
    assert_eq!(config.timings().navigation, Duration::from_secs(60));
}

#[test]
fn test_builder_rejects_invalid_values() {
    let not_a_url = ScrapeConfig::builder().company_url("linkedin company").build();
    assert!(not_a_url.is_err());

    let wrong_scheme = ScrapeConfig::builder()
        .company_url("ftp://www.linkedin.com/company/acme")
        .build();
    assert!(wrong_scheme.is_err());

    let zero_pages = ScrapeConfig::builder()
        .company_url("https://www.linkedin.com/company/acme")
        .page_limit(Some(0))
        .build();
    assert!(zero_pages.is_err());

    let zero_cap = ScrapeConfig::builder()
        .company_url("https://www.linkedin.com/company/acme")
        .max_image_bytes(0)
        .build();
    assert!(zero_cap.is_err());
}

#[test]
fn test_config_serializes() {
    let config = ScrapeConfig::builder()
        .company_url("https://www.linkedin.com/company/acme")
        .page_limit(Some(2))
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let restored: ScrapeConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.page_limit(), Some(2));
    assert_eq!(restored.timings(), config.timings());
}
