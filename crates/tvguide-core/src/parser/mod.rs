//! HTML parsers for guide listing pages
//!
//! The response page carries one schedule table tagged with the `tvguide`
//! class. Each row holds a broadcast time and, after a `<br>`, the title.
//! - `line_scan`: line-oriented regex scan, the default
//! - `tree`: DOM walk over the same table

pub mod line_scan;
pub mod tree;

use crate::types::ListingEntry;

pub use line_scan::{normalize_title, parse_listings, LineScanParser};
pub use tree::HtmlTreeParser;

/// Class that marks the schedule table in a listings page.
pub const ROW_GROUP_CLASS: &str = "tvguide";

/// Turns a listings page into entries in broadcast order
///
/// Implementations never fail: markup they cannot make sense of yields
/// partial entries or an empty list.
pub trait ListingParser {
    fn parse(&self, markup: &str) -> Vec<ListingEntry>;
}

/// First 24-hour `HH:MM` token in `text`.
pub(crate) fn find_time(text: &str) -> Option<String> {
    // Guarded by non-digits only, so "18:00hrs" still yields a time
    let re = regex_lite::Regex::new(r"(?:^|[^0-9])((?:[01]\d|2[0-3]):[0-5]\d)(?:[^0-9]|$)").ok()?;
    let caps = re.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Page shaped like a real guide response: two rows on the table line.
    pub const TWO_ROWS: &str = r#"<html>
<head><title>TV Guide</title></head>
<body>
    <form method="post" action="tvguide.asp">
    </form>
    <table class="tvguide" width="100%" cellpadding="2"><tr><td><b>18:00</b><br>Sample Show A</td></tr><tr><td><b>19:30</b><br>Sample Show B</td></tr></table>
</body>
</html>
"#;

    /// Rows with one missing time and one missing title.
    pub const PARTIAL_ROWS: &str = r#"<table class="tvguide"><tr><td><b>TBA</b><br>Late Movie</td></tr><tr><td><b>23:30</b></td></tr></table>"#;
}
