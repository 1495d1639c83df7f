//! DOM-based listings parser
//!
//! Reads the same schedule table as [`LineScanParser`](super::LineScanParser)
//! but through a parsed document, so it does not care how the page is split
//! into lines.

use scraper::{ElementRef, Html, Selector};

use super::{find_time, normalize_title, ListingParser, ROW_GROUP_CLASS};
use crate::types::ListingEntry;

/// [`ListingParser`] walking the first `tvguide` table of the parsed page
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTreeParser;

impl ListingParser for HtmlTreeParser {
    fn parse(&self, markup: &str) -> Vec<ListingEntry> {
        let document = Html::parse_document(markup);
        let table_class = format!(".{}", ROW_GROUP_CLASS);

        let (Ok(table_selector), Ok(row_selector)) =
            (Selector::parse(&table_class), Selector::parse("tr"))
        else {
            return Vec::new();
        };

        let Some(table) = document.select(&table_selector).next() else {
            tracing::warn!("No schedule table found in listings page");
            return Vec::new();
        };

        let listings: Vec<ListingEntry> = table
            .select(&row_selector)
            .map(|row| ListingEntry {
                time: find_time(&row.text().collect::<Vec<_>>().join(" ")),
                title: title_after_break(&row),
            })
            .collect();

        tracing::debug!(count = listings.len(), "Parsed listings");
        listings
    }
}

/// Text following the row's first `<br>` within the same cell.
fn title_after_break(row: &ElementRef) -> Option<String> {
    let br_selector = Selector::parse("br").ok()?;
    let br = row.select(&br_selector).next()?;

    let mut text = String::new();
    for sibling in br.next_siblings() {
        if let Some(fragment) = sibling.value().as_text() {
            text.push_str(fragment);
        } else if let Some(element) = ElementRef::wrap(sibling) {
            text.extend(element.text());
        }
    }

    normalize_title(&text)
}
