//! Small text helpers shared by the extractors
//!
//! Element text comes back from the browser with layout whitespace around it;
//! everything that lands in a record goes through `clean_text` first.

/// Trim layout whitespace from element text.
///
/// `None` (element missing, or text unavailable) becomes an empty string, which
/// is how absent fields are represented in a record.
///
/// # Examples
/// ```
/// # use roster_scrape::utils::string_utils::clean_text;
/// assert_eq!(clean_text(Some("\n   Jane Doe  \n".to_string())), "Jane Doe");
/// assert_eq!(clean_text(None), "");
/// ```
#[inline]
pub fn clean_text(text: Option<String>) -> String {
    match text {
        Some(t) => t.trim().to_string(),
        None => String::new(),
    }
}

/// Join collected contact values into a single cell value.
///
/// # Examples
/// ```
/// # use roster_scrape::utils::string_utils::join_values;
/// let phones = vec!["+1 555 0100".to_string(), "+44 20 7946 0000".to_string()];
/// assert_eq!(join_values(&phones), "+1 555 0100, +44 20 7946 0000");
/// assert_eq!(join_values(&[]), "");
/// ```
pub fn join_values(values: &[String]) -> String {
    values.join(", ")
}
