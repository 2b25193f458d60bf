//! Host allow-list for calendar feeds.
//!
//! Only vacation-rental hosts (and their subdomains) may be fetched, so the
//! proxy cannot be pointed at arbitrary or internal addresses.

use url::Url;

use crate::{Error, Result};

/// Domains whose calendar feeds may be fetched.
pub const ALLOWED_HOSTS: &[&str] = &[
    "airbnb.com",
    "airbnb.com.au",
    "abnb.me",
    "vrbo.com",
    "booking.com",
];

/// Returns true if `hostname` equals an allowed domain or is a subdomain of one.
pub fn is_allowed_host(hostname: &str) -> bool {
    ALLOWED_HOSTS.iter().any(|allowed| {
        hostname == *allowed
            || hostname
                .strip_suffix(allowed)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Parse the client-supplied calendar URL and check its host against the allow-list.
pub fn validate_calendar_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    let host = url.host_str().unwrap_or_default();

    if !is_allowed_host(host) {
        return Err(Error::HostNotAllowed(host.to_string()));
    }

    Ok(url)
}
