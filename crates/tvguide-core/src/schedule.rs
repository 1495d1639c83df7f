//! Main TV guide API
//!
//! This module provides the high-level API for one day of listings.
//! It combines the HTTP client with a listings parser and caches every
//! channel it has fetched.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::channel::ChannelRegistry;
use crate::client::GuideClient;
use crate::config::GuideConfig;
use crate::date::ScheduleDate;
use crate::error::Result;
use crate::parser::{LineScanParser, ListingParser};
use crate::render::{render_text, render_xml};
use crate::types::ListingSet;

/// Channel rendered when nothing has been fetched yet.
pub const DEFAULT_CHANNEL: &str = "news";

/// Form field carrying the channel display name.
const CHANNEL_FIELD: &str = "ddChannelName";

/// Form field carrying the `DD_MM_YYYY` date.
const DATE_FIELD: &str = "ddDate";

/// Listings for a single day
///
/// The date is fixed at construction. Each channel is fetched at most once;
/// later calls return the cached set.
///
/// # Example
/// ```no_run
/// use serde_json::json;
/// use tvguide_core::ScheduleClient;
///
/// # async fn example() -> Result<(), tvguide_core::GuideError> {
/// let options = json!({"yyyy": 2008, "mm": 7, "dd": 4});
/// let mut guide = ScheduleClient::new(Some(&options))?;
///
/// let listings = guide.get_listings(Some("plus")).await?;
/// println!("{} programmes", listings.len());
/// print!("{}", guide.to_text().await?);
/// # Ok(())
/// # }
/// ```
pub struct ScheduleClient<P = LineScanParser> {
    date: ScheduleDate,
    channels: ChannelRegistry,
    client: GuideClient,
    parser: P,
    /// Parsed listings keyed by `DD_MM_YYYY_channel`
    cache: HashMap<String, ListingSet>,
    /// Most recently fetched set, read by the renderers
    last_listings: Option<ListingSet>,
}

impl ScheduleClient<LineScanParser> {
    /// Create a client for the day given by an optional `{yyyy, mm, dd}` mapping.
    ///
    /// An absent or empty mapping means today.
    ///
    /// # Errors
    /// - `GuideError::InvalidArgument` if `options` is not a mapping
    /// - `GuideError::InvalidConfiguration` if the mapping is incomplete
    /// - `GuideError::InvalidDate` if the date fails validation
    /// - `GuideError::TransportError` if the HTTP client cannot be created
    pub fn new(options: Option<&Value>) -> Result<Self> {
        Self::with_config(options, &GuideConfig::default())
    }

    /// Same as [`ScheduleClient::new`] with an explicit guide configuration.
    ///
    /// # Errors
    /// As for [`ScheduleClient::new`].
    pub fn with_config(options: Option<&Value>, config: &GuideConfig) -> Result<Self> {
        let date = ScheduleDate::from_options(options)?;
        Self::with_parser(date, config, LineScanParser)
    }
}

impl<P: ListingParser> ScheduleClient<P> {
    /// Create a client for an already validated date using a custom parser.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_parser(date: ScheduleDate, config: &GuideConfig, parser: P) -> Result<Self> {
        let client = GuideClient::with_config(config)?;
        Ok(Self {
            date,
            channels: config.channels.clone(),
            client,
            parser,
            cache: HashMap::new(),
            last_listings: None,
        })
    }

    /// Day this client serves
    pub fn date(&self) -> ScheduleDate {
        self.date
    }

    /// Most recently fetched listings, if any
    pub fn last_listings(&self) -> Option<&ListingSet> {
        self.last_listings.as_ref()
    }

    /// Get the day's listings for a channel.
    ///
    /// # Arguments
    /// * `channel` - Channel key (`gold`, `news`, `one`, `plus`), any case
    ///
    /// # Returns
    /// * `Ok(ListingSet)` in broadcast order; a cached set is returned as-is
    /// * `Err(GuideError::UndefinedChannel)` if `channel` is None
    /// * `Err(GuideError::UnknownChannel)` if the key is not registered
    /// * `Err(GuideError::TransportError)` if the request fails
    #[tracing::instrument(skip(self), fields(date = %self.date))]
    pub async fn get_listings(&mut self, channel: Option<&str>) -> Result<ListingSet> {
        let display_name = self.channels.resolve(channel)?;
        let key = channel.unwrap_or_default().to_lowercase();
        let cache_key = format!("{}_{}", self.date, key);

        if let Some(listings) = self.cache.get(&cache_key) {
            tracing::debug!(%cache_key, "Listings cache hit");
            return Ok(Arc::clone(listings));
        }

        tracing::debug!(%cache_key, "Listings cache miss");
        let date = self.date.to_string();
        let html = self
            .client
            .post_form(&[(CHANNEL_FIELD, display_name), (DATE_FIELD, date.as_str())])
            .await?;

        let listings: ListingSet = Arc::new(self.parser.parse(&html));
        self.cache.insert(cache_key, Arc::clone(&listings));
        self.last_listings = Some(Arc::clone(&listings));

        Ok(listings)
    }

    /// Render the last fetched listings as text, fetching `news` if none yet.
    ///
    /// # Errors
    /// Any error from fetching the default channel.
    pub async fn to_text(&mut self) -> Result<String> {
        let listings = self.current_listings().await?;
        Ok(render_text(&listings))
    }

    /// Render the last fetched listings as XML, fetching `news` if none yet.
    ///
    /// # Errors
    /// Any error from fetching the default channel.
    pub async fn to_xml(&mut self) -> Result<String> {
        let listings = self.current_listings().await?;
        Ok(render_xml(&listings))
    }

    async fn current_listings(&mut self) -> Result<ListingSet> {
        match &self.last_listings {
            Some(listings) => Ok(Arc::clone(listings)),
            None => self.get_listings(Some(DEFAULT_CHANNEL)).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DateField, GuideError};
    use crate::parser::fixtures;
    use crate::parser::HtmlTreeParser;
    use crate::types::ListingEntry;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date_options() -> Value {
        json!({"yyyy": 2008, "mm": 7, "dd": 4})
    }

    fn guide_config(server: &MockServer) -> GuideConfig {
        GuideConfig::with_base_url(format!("{}/uk/tvguide/tvguide.asp", server.uri()))
    }

    /// Mount a listings page for one channel, expecting `calls` requests.
    async fn mount_channel(server: &MockServer, display_name: &str, body: &str, calls: u64) {
        let encoded_name = display_name.replace(' ', "+");
        Mock::given(method("POST"))
            .and(path("/uk/tvguide/tvguide.asp"))
            .and(body_string_contains(format!("ddChannelName={}", encoded_name)))
            .and(body_string_contains("ddDate=04_07_2008"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[test]
    fn test_new_with_date_options() {
        let guide = ScheduleClient::new(Some(&date_options())).unwrap();
        assert_eq!(guide.date().to_string(), "04_07_2008");
        assert!(guide.last_listings().is_none());
    }

    #[test]
    fn test_new_without_options_uses_today() {
        let guide = ScheduleClient::new(None).unwrap();
        assert_eq!(guide.date(), ScheduleDate::today().unwrap());
    }

    #[test]
    fn test_new_not_a_mapping() {
        let result = ScheduleClient::new(Some(&json!("04/07/2008")));
        assert!(matches!(result, Err(GuideError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_incomplete_mapping() {
        let result = ScheduleClient::new(Some(&json!({"mm": 7, "dd": 4})));
        assert!(matches!(result, Err(GuideError::InvalidConfiguration(2))));
    }

    #[test]
    fn test_new_invalid_date() {
        let result = ScheduleClient::new(Some(&json!({"yyyy": 2008, "mm": 13, "dd": 4})));
        match result {
            Err(GuideError::InvalidDate { field, value }) => {
                assert_eq!(field, DateField::Month);
                assert_eq!(value, "13");
            }
            _ => panic!("Expected InvalidDate error"),
        }
    }

    #[tokio::test]
    async fn test_get_listings_undefined_channel() {
        let mut guide = ScheduleClient::new(Some(&date_options())).unwrap();
        let result = guide.get_listings(None).await;
        assert!(matches!(result, Err(GuideError::UndefinedChannel)));
    }

    #[tokio::test]
    async fn test_get_listings_unknown_channel() {
        let mut guide = ScheduleClient::new(Some(&date_options())).unwrap();
        match guide.get_listings(Some("star")).await {
            Err(GuideError::UnknownChannel(key)) => assert_eq!(key, "star"),
            _ => panic!("Expected UnknownChannel error"),
        }
    }

    #[tokio::test]
    async fn test_get_listings_fetches_and_parses() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR Plus", fixtures::TWO_ROWS, 1).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        let listings = guide.get_listings(Some("plus")).await.unwrap();

        assert_eq!(
            *listings,
            vec![
                ListingEntry::new("18:00", "Sample Show A"),
                ListingEntry::new("19:30", "Sample Show B"),
            ]
        );
        assert!(Arc::ptr_eq(guide.last_listings().unwrap(), &listings));
    }

    #[tokio::test]
    async fn test_get_listings_is_cached() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR News", fixtures::TWO_ROWS, 1).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        let first = guide.get_listings(Some("news")).await.unwrap();
        let second = guide.get_listings(Some("news")).await.unwrap();
        let shouted = guide.get_listings(Some("NEWS")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &shouted));
    }

    #[tokio::test]
    async fn test_cache_hit_leaves_last_listings() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR News", fixtures::TWO_ROWS, 1).await;
        mount_channel(&server, "STAR Gold", fixtures::PARTIAL_ROWS, 1).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        guide.get_listings(Some("news")).await.unwrap();
        let gold = guide.get_listings(Some("gold")).await.unwrap();
        guide.get_listings(Some("news")).await.unwrap();

        assert!(Arc::ptr_eq(guide.last_listings().unwrap(), &gold));
    }

    #[tokio::test]
    async fn test_get_listings_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = guide_config(&server);
        let mut guide = ScheduleClient::with_config(Some(&date_options()), &config).unwrap();
        match guide.get_listings(Some("one")).await {
            Err(GuideError::TransportError { url, .. }) => assert_eq!(url, config.base_url),
            _ => panic!("Expected TransportError"),
        }
        assert!(guide.last_listings().is_none());
    }

    #[tokio::test]
    async fn test_empty_page_is_cached_as_empty() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR One", "<html><body>No listings</body></html>", 1).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        assert!(guide.get_listings(Some("one")).await.unwrap().is_empty());
        assert!(guide.get_listings(Some("one")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_to_text_defaults_to_news() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR News", fixtures::TWO_ROWS, 1).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        let text = guide.to_text().await.unwrap();
        assert!(text.starts_with(" Time: 18:00\nTitle: Sample Show A\n"));

        // Second rendering reads the last listings slot
        let xml = guide.to_xml().await.unwrap();
        assert!(xml.contains("<title> Sample Show B </title>"));
    }

    #[tokio::test]
    async fn test_to_xml_uses_last_listings() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR Gold", fixtures::TWO_ROWS, 1).await;
        mount_channel(&server, "STAR News", fixtures::TWO_ROWS, 0).await;

        let mut guide = ScheduleClient::with_config(Some(&date_options()), &guide_config(&server)).unwrap();
        guide.get_listings(Some("gold")).await.unwrap();

        let xml = guide.to_xml().await.unwrap();
        assert_eq!(xml.matches("<programme>").count(), 2);
    }

    #[tokio::test]
    async fn test_with_tree_parser() {
        let server = MockServer::start().await;
        mount_channel(&server, "STAR Plus", fixtures::TWO_ROWS, 1).await;

        let date = ScheduleDate::new(2008, 7, 4).unwrap();
        let mut guide = ScheduleClient::with_parser(date, &guide_config(&server), HtmlTreeParser).unwrap();
        let listings = guide.get_listings(Some("Plus")).await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].title.as_deref(), Some("Sample Show B"));
    }
}
