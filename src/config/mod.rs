//! Configuration module for a scrape run
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithCompanyUrl};
pub use types::{ScrapeConfig, Timings};
