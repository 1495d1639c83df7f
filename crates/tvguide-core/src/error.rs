//! Error types for the TV guide scraper
//!
//! This module defines all error types used throughout the library.
//! GuideError implements Serialize so front-ends can ship it as a plain string.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Date component reported by [`GuideError::InvalidDate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DateField::Year => "year",
            DateField::Month => "month",
            DateField::Day => "day",
        };
        f.write_str(name)
    }
}

/// Error type for TV guide operations
#[derive(Error, Debug)]
pub enum GuideError {
    /// Constructor options were not a key-value mapping
    #[error("Invalid argument: expected a mapping of yyyy/mm/dd, got {0}")]
    InvalidArgument(String),

    /// Date mapping supplied with fewer than the three required keys
    #[error("Invalid configuration: expected yyyy, mm and dd, got {0} key(s)")]
    InvalidConfiguration(usize),

    /// A date component failed validation
    #[error("Invalid {field}: {value}")]
    InvalidDate { field: DateField, value: String },

    /// No channel key was given
    #[error("Channel is not defined")]
    UndefinedChannel,

    /// Channel key is not in the registry
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// The listings request failed or returned a non-success status
    #[error("Request to {url} failed: {reason}")]
    TransportError { url: String, reason: String },
}

/// Serialize GuideError as its display string
impl Serialize for GuideError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for TV guide operations
pub type Result<T> = std::result::Result<T, GuideError>;
