//! Output records and their aggregation
//!
//! One `ProfileRecord` per extracted candidate, collected in encounter order.

use bytes::Bytes;

use super::contact::ContactBlock;
use crate::utils::string_utils::join_values;

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub photo: Option<Bytes>,
    pub display_name: String,
    pub headline: String,
    pub profile_url: String,
    /// Comma-joined phone numbers, each starting with `+`
    pub phones: String,
    /// Comma-joined email addresses, each containing `@`
    pub emails: String,
}

impl ProfileRecord {
    pub fn new(
        display_name: String,
        headline: String,
        profile_url: String,
        photo: Option<Bytes>,
        contact: &ContactBlock,
    ) -> Self {
        Self {
            photo,
            display_name,
            headline,
            profile_url,
            phones: join_values(contact.phones()),
            emails: join_values(contact.emails()),
        }
    }
}

/// Append-only list of records for one run
#[derive(Debug, Default)]
pub struct RecordAggregator {
    records: Vec<ProfileRecord>,
}

impl RecordAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProfileRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ProfileRecord> {
        self.records
    }
}
