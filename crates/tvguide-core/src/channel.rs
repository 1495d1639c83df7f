//! Channel registry
//!
//! Maps the short keys callers use (`news`, `gold`, ...) to the display names
//! the guide's form expects in `ddChannelName`.

use std::collections::BTreeMap;

use crate::error::{GuideError, Result};

/// The channels the guide carries, as (key, display name).
const STAR_CHANNELS: [(&str, &str); 4] = [
    ("gold", "STAR Gold"),
    ("news", "STAR News"),
    ("one", "STAR One"),
    ("plus", "STAR Plus"),
];

/// Fixed, case-insensitive lookup of channel keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistry {
    entries: BTreeMap<&'static str, &'static str>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self {
            entries: STAR_CHANNELS.into_iter().collect(),
        }
    }
}

impl ChannelRegistry {
    /// Resolve a channel key to its display name.
    ///
    /// # Errors
    /// - `GuideError::UndefinedChannel` if no key was given
    /// - `GuideError::UnknownChannel` if the key is not registered
    ///
    /// # Example
    /// ```
    /// use tvguide_core::ChannelRegistry;
    ///
    /// let channels = ChannelRegistry::default();
    /// assert_eq!(channels.resolve(Some("NEWS")).unwrap(), "STAR News");
    /// assert!(channels.resolve(Some("star")).is_err());
    /// ```
    pub fn resolve(&self, key: Option<&str>) -> Result<&'static str> {
        let key = key.ok_or(GuideError::UndefinedChannel)?;
        self.entries
            .get(key.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| GuideError::UnknownChannel(key.to_string()))
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}
