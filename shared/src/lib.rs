//! Shared library for the Hampa website Lambda functions.
//!
//! This crate provides the calendar ingestion core (host allow-list, upstream
//! fetcher, ICS parser) and the common response helpers used by the handlers.

pub mod config;
pub mod error;
pub mod hosts;
pub mod http;
pub mod ics;
pub mod models;
pub mod upstream;

pub use config::Config;
pub use error::{Error, Result};
pub use hosts::{is_allowed_host, validate_calendar_url, ALLOWED_HOSTS};
pub use ics::{normalize_date, parse_ics};
pub use models::{CalendarEvent, ErrorResponse, EventsResponse};
pub use upstream::CalendarFetcher;
