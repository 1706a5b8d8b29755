//! Response constructors shared by the feature handlers.
//!
//! Every lab page is `text/html; charset=utf-8`; every API payload is
//! `application/json`. Handlers build responses through these helpers so the
//! headers stay uniform.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::error::LabError;

/// Largest JSON body any lab endpoint accepts.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// A canned HTML document.
pub fn html(body: impl Into<String>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(body.into()))
        .unwrap_or_default()
}

/// A canned HTML document with a public cache hint (quantum pages).
pub fn html_cached(body: impl Into<String>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(body.into()))
        .unwrap_or_default()
}

/// A JSON payload with status 200.
pub fn json<T: Serialize>(value: &T) -> Response {
    json_status(StatusCode::OK, value)
}

pub fn json_status<T: Serialize>(status: StatusCode, value: &T) -> Response {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_default()
}

/// Plaintext 404 used by the dispatcher fallback.
pub fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Not Found"))
        .unwrap_or_default()
}

/// Read and parse a JSON request body. Malformed bodies are a 400.
pub async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> Result<T, LabError> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| LabError::BadRequest("Invalid request".into()))?;
    serde_json::from_slice(&bytes).map_err(|_| LabError::BadRequest("Invalid request".into()))
}
