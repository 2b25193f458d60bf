//! HTTP helpers for Lambda functions.
//!
//! Every response, including errors and preflights, carries the same CORS
//! header set so browser callers can read error bodies.

use lambda_http::http::response::Builder;
use lambda_http::{Body, Response};
use serde::Serialize;

use crate::models::ErrorResponse;

/// CORS headers attached to every response.
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Max-Age", "86400"),
];

fn with_cors(status: u16) -> Builder {
    CORS_HEADERS
        .iter()
        .fold(Response::builder().status(status), |builder, (name, value)| {
            builder.header(*name, *value)
        })
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string(data)?;
    Ok(with_cors(status).body(Body::from(body)).map_err(Box::new)?)
}

/// Create an `{"error": ...}` response with the given status code.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorResponse::new(message))
}

/// Empty response for CORS preflight requests.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    Ok(with_cors(200).body(Body::Empty).map_err(Box::new)?)
}
