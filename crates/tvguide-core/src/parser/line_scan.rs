//! Line-oriented listings parser
//!
//! The guide emits its whole schedule table on a single line. This parser
//! finds that line and cuts it into `<tr>` segments with regexes, without
//! building a DOM.

use regex_lite::Regex;

use super::{find_time, ListingParser, ROW_GROUP_CLASS};
use crate::types::ListingEntry;

/// Default [`ListingParser`]: regex scan of the first schedule table line
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanParser;

impl ListingParser for LineScanParser {
    fn parse(&self, markup: &str) -> Vec<ListingEntry> {
        parse_listings(markup)
    }
}

/// Parse listings from a guide response page.
///
/// Only the first line carrying the schedule table marker is read; every
/// `<tr>` segment after the marker on that line becomes one entry.
///
/// # Arguments
/// * `markup` - Raw HTML content of the listings page
///
/// # Returns
/// Entries in page order; empty if no schedule table was found
///
/// # Example
/// ```
/// use tvguide_core::parser::parse_listings;
///
/// let page = r#"<table class="tvguide"><tr><td>18:00<br>Evening News</td></tr></table>"#;
/// let listings = parse_listings(page);
/// assert_eq!(listings[0].time.as_deref(), Some("18:00"));
/// assert_eq!(listings[0].title.as_deref(), Some("Evening News"));
/// ```
pub fn parse_listings(markup: &str) -> Vec<ListingEntry> {
    let (Some(marker), Some(row)) = (row_group_regex(), row_regex()) else {
        return Vec::new();
    };

    let group = markup
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| marker.find(line).map(|m| &line[m.end()..]));

    let Some(mut rest) = group else {
        tracing::warn!("No schedule table found in listings page");
        return Vec::new();
    };

    let mut listings = Vec::new();
    while let Some(segment) = row.find(rest) {
        listings.push(parse_row(segment.as_str()));
        rest = &rest[segment.end()..];
    }

    tracing::debug!(count = listings.len(), "Parsed listings");
    listings
}

/// Extract time and title from one `<tr>` segment.
fn parse_row(segment: &str) -> ListingEntry {
    ListingEntry {
        time: find_time(segment),
        title: extract_title(segment),
    }
}

/// Text after the row's first `<br>`, up to the closing `</td>`.
fn extract_title(segment: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<br\s*/?>(.*?)</td").ok()?;
    let caps = re.captures(segment)?;
    normalize_title(caps.get(1)?.as_str())
}

/// Drop control characters and surrounding whitespace.
///
/// Returns None when nothing printable is left.
///
/// # Examples
/// ```
/// use tvguide_core::parser::normalize_title;
///
/// assert_eq!(normalize_title("  Kaun Banega\u{7} Crorepati \r"), Some("Kaun Banega Crorepati".to_string()));
/// assert_eq!(normalize_title(" \t "), None);
/// ```
pub fn normalize_title(raw: &str) -> Option<String> {
    let printable: String = raw.chars().filter(|c| !c.is_control()).collect();
    let title = printable.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

fn row_group_regex() -> Option<Regex> {
    // The class value must be exactly the marker, quoted or bare
    Regex::new(&format!(
        r#"(?i)class\s*=\s*(?:(?:"{0}"|'{0}')[^>]*|{0}(?:\s[^>]*)?)>"#,
        ROW_GROUP_CLASS
    ))
    .ok()
}

fn row_regex() -> Option<Regex> {
    Regex::new(r"(?is)<tr\b[^>]*>.*?</tr\s*>").ok()
}
