//! Plain text and XML renderings of a listing set

use crate::types::ListingEntry;

/// Line closing each entry in the text rendering.
pub const TEXT_SEPARATOR: &str = "-------------------";

/// Declaration heading the XML rendering.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render listings as plain text, three lines per entry.
///
/// # Example
/// ```
/// use tvguide_core::{render_text, ListingEntry};
///
/// let text = render_text(&[ListingEntry::new("18:00", "X")]);
/// assert_eq!(text, " Time: 18:00\nTitle: X\n-------------------\n");
/// ```
pub fn render_text(listings: &[ListingEntry]) -> String {
    let mut out = String::new();
    for entry in listings {
        out.push_str(&format!(" Time: {}\n", entry.time_str()));
        out.push_str(&format!("Title: {}\n", entry.title_str()));
        out.push_str(TEXT_SEPARATOR);
        out.push('\n');
    }
    out
}

/// Render listings as a `<programmes>` XML document.
///
/// Text content is written as-is; titles are not escaped.
pub fn render_xml(listings: &[ListingEntry]) -> String {
    let mut out = format!("{}\n<programmes>\n", XML_DECLARATION);
    for entry in listings {
        out.push_str("  <programme>\n");
        out.push_str(&format!("    <time> {} </time>\n", entry.time_str()));
        out.push_str(&format!("    <title> {} </title>\n", entry.title_str()));
        out.push_str("  </programme>\n");
    }
    out.push_str("</programmes>\n");
    out
}
