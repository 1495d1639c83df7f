//! HTTP transport for the listings form
//!
//! The guide is a classic HTML form: every lookup is one POST of
//! `application/x-www-form-urlencoded` fields, answered with a full page.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::config::GuideConfig;
use crate::error::{GuideError, Result};

/// Default Accept-Language header for English listings
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9";

/// HTTP client bound to one listings endpoint
pub struct GuideClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Endpoint the form is posted to
    url: String,
}

impl GuideClient {
    /// Create a client for the default endpoint
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(&GuideConfig::default())
    }

    /// Create a client from a guide configuration
    ///
    /// # Errors
    /// Returns `GuideError::TransportError` if the HTTP client cannot be created
    pub fn with_config(config: &GuideConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| transport_error(&config.base_url, e))?;

        Ok(Self {
            client,
            url: config.base_url.clone(),
        })
    }

    /// Endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST form fields and return the response body
    ///
    /// # Arguments
    /// * `form` - Field name/value pairs, sent URL-encoded
    ///
    /// # Errors
    /// `GuideError::TransportError` naming the URL if the request fails or the
    /// response status is not a success
    pub async fn post_form(&self, form: &[(&str, &str)]) -> Result<String> {
        tracing::info!(url = %self.url, ?form, "Posting listings form");

        let response = self
            .client
            .post(&self.url)
            .form(form)
            .send()
            .await
            .map_err(|e| transport_error(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "Listings request was not successful");
            return Err(GuideError::TransportError {
                url: self.url.clone(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&self.url, e))?;
        tracing::debug!(url = %self.url, body_len = body.len(), "Response body received");

        Ok(body)
    }
}

fn transport_error(url: &str, error: reqwest::Error) -> GuideError {
    GuideError::TransportError {
        url: url.to_string(),
        reason: error.to_string(),
    }
}
