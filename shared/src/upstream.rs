//! Upstream calendar fetcher.

use reqwest::redirect::{Attempt, Policy};
use reqwest::{Client, ClientBuilder};
use tracing::{info, warn};
use url::Url;

use crate::hosts::is_allowed_host;
use crate::{Config, Error, Result};

const MAX_REDIRECTS: usize = 5;

/// Fetches calendar feeds from allow-listed hosts.
///
/// Holds a pooled HTTP client; build once per cold start and share it.
#[derive(Debug, Clone)]
pub struct CalendarFetcher {
    http_client: Client,
}

impl CalendarFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = client_builder(config)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http_client))
    }

    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Fetch the calendar at `url` and return its body as text.
    ///
    /// Non-success statuses map to [`Error::Upstream`] without reading the body.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self.http_client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} responded with {}", url.host_str().unwrap_or_default(), status);
            return Err(Error::Upstream(status));
        }

        let body = response.text().await?;
        info!("Fetched {} bytes from {}", body.len(), url.host_str().unwrap_or_default());
        Ok(body)
    }
}

/// Client builder with timeout, user agent and allow-list redirect policy applied.
pub fn client_builder(config: &Config) -> ClientBuilder {
    Client::builder()
        .timeout(config.fetch_timeout)
        .user_agent(config.user_agent.clone())
        .redirect(Policy::custom(follow_allowed_redirect))
}

// A hop to a host outside the allow-list is not followed; the 3xx is returned as-is.
fn follow_allowed_redirect(attempt: Attempt) -> reqwest::redirect::Action {
    // previous() includes the original request URL
    if attempt.previous().len() > MAX_REDIRECTS {
        return attempt.error("too many redirects");
    }

    let allowed = attempt.url().host_str().is_some_and(is_allowed_host);
    if allowed {
        attempt.follow()
    } else {
        warn!("Refusing redirect to {}", attempt.url());
        attempt.stop()
    }
}
