//! STAR TV Guide Core Library
//!
//! This crate fetches daily programme listings for the STAR channels from
//! the indya.com TV guide form and turns them into time/title entries.
//!
//! # Features
//! - Validated schedule dates (`DD_MM_YYYY` on the wire)
//! - Case-insensitive channel keys (`gold`, `news`, `one`, `plus`)
//! - Per-day, per-channel caching of parsed listings
//! - Plain text and XML renderings

pub mod channel;
pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod parser;
pub mod render;
pub mod schedule;
pub mod types;

// Re-export main types for convenience
pub use channel::ChannelRegistry;
pub use client::GuideClient;
pub use config::GuideConfig;
pub use date::{DateValidator, ScheduleDate};
pub use error::{DateField, GuideError, Result};
pub use parser::{HtmlTreeParser, LineScanParser, ListingParser};
pub use render::{render_text, render_xml};
pub use schedule::ScheduleClient;
pub use types::{ListingEntry, ListingSet};
