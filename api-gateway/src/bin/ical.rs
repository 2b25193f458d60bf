//! iCal Lambda - Handles the /ical endpoint.
//!
//! Fetches a vacation-rental calendar feed from an allow-listed host and
//! returns its events as JSON for the booking form.
//!
//! Endpoints:
//! - GET /ical?url=<calendar url> - Parse a remote ICS feed
//! - OPTIONS * - CORS preflight

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{error_response, json_response, preflight_response};
use shared::{parse_ics, validate_calendar_url, CalendarEvent, CalendarFetcher, Config, EventsResponse};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    fetcher: CalendarFetcher,
}

impl AppState {
    fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        info!(
            "Calendar fetch timeout {}s, user agent {}",
            config.fetch_timeout.as_secs(),
            config.user_agent
        );

        Ok(Self {
            fetcher: CalendarFetcher::new(&config)?,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let method = event.method().as_str();
    let path = event.uri().path();

    info!("Calendar request: {} {}", method, path);

    match path {
        "/ical" => {
            let params = event.query_string_parameters();
            let calendar_url = params.first("url").filter(|url| !url.is_empty());

            match load_events(&state, calendar_url).await {
                Ok(events) => {
                    info!("Returning {} events", events.len());
                    json_response(200, &EventsResponse { events })
                }
                Err(e) => {
                    match &e {
                        shared::Error::Fetch(_) => {
                            error!("Calendar request failed: {}", e)
                        }
                        _ => warn!("Calendar request rejected: {}", e),
                    }
                    error_response(e.status_code(), e.public_message())
                }
            }
        }

        _ => error_response(404, "Not found"),
    }
}

/// Validate the requested URL, fetch it once and parse the feed.
async fn load_events(state: &AppState, calendar_url: Option<&str>) -> shared::Result<Vec<CalendarEvent>> {
    let calendar_url = calendar_url.ok_or(shared::Error::MissingUrl)?;
    let url = validate_calendar_url(calendar_url)?;
    let body = state.fetcher.fetch(&url).await?;

    Ok(parse_ics(&body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new()?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
