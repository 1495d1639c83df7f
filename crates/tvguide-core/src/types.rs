//! Data types for the TV guide scraper
//!
//! All types implement Serialize and Deserialize for JSON output.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single scheduled programme
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Broadcast time in 24-hour `HH:MM` form, None if the row had no time
    pub time: Option<String>,
    /// Programme title, None if the row had no title text
    pub title: Option<String>,
}

impl ListingEntry {
    /// Create an entry with both fields present
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            title: Some(title.into()),
        }
    }

    /// Time as displayed, empty when missing
    pub fn time_str(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    /// Title as displayed, empty when missing
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// Listings for one channel and day, in broadcast order
///
/// Shared so that a cache hit hands back the very same set.
pub type ListingSet = Arc<Vec<ListingEntry>>;
