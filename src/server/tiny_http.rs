//! tiny_http server adapter
//!
//! Handles routing, body reading, and response conversion for tiny_http.

use std::io::Cursor;

use serde::Serialize;
use serde_json::Value;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::api::{self, ApiError, Handler};

/// Routes the adapter answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /health`
    Health,
    /// `POST /run-case`
    RunCase,
    /// Anything else
    NotFound,
}

impl Route {
    /// Resolve a method and raw request URL to a route
    ///
    /// Paths match exactly, so a query string makes the route unknown.
    #[must_use]
    pub fn resolve(method: &Method, url: &str) -> Self {
        match (method, url) {
            (&Method::Post, "/health") => Self::Health,
            (&Method::Post, "/run-case") => Self::RunCase,
            _ => Self::NotFound,
        }
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle one request and return the response to send
pub fn handle_request<H: Handler + ?Sized>(
    handler: &H,
    request: &mut Request,
) -> Response<Cursor<Vec<u8>>> {
    let route = Route::resolve(request.method(), request.url());

    let response = match route {
        Route::Health => json_bytes_response(api::HEALTH_BODY.to_vec(), 200),
        Route::RunCase => {
            let content_length = request.body_length();
            handle_result(api::run_case(handler, request.as_reader(), content_length))
        },
        Route::NotFound => not_found_response(),
    };

    log::debug!(
        "{} {} -> {}",
        request.method(),
        request.url(),
        response.status_code().0
    );
    response
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a run-case result to an HTTP response
fn handle_result(result: Result<Value, ApiError>) -> Response<Cursor<Vec<u8>>> {
    match result {
        Ok(data) => match serde_json::to_vec(&data) {
            Ok(body) => json_bytes_response(body, 200),
            Err(e) => error_response(&ApiError::handler_error(format!(
                "failed to encode handler response: {e}"
            ))),
        },
        Err(e) => error_response(&e),
    }
}

/// Create an error JSON response with the kind's status code
fn error_response(error: &ApiError) -> Response<Cursor<Vec<u8>>> {
    if error.kind == api::ErrorKind::HandlerError {
        log::warn!("handler failed: {}", error.message);
    }
    json_response(&error.envelope(), error.status_code())
}

/// Create a 404 response with an empty body
fn not_found_response() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(Vec::new()).with_status_code(StatusCode(404))
}

/// Serialize data to a JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::to_vec(data)
        .unwrap_or_else(|_| br#"{"error":"handler_error","message":""}"#.to_vec());
    json_bytes_response(body, status)
}

fn json_bytes_response(body: Vec<u8>, status: u16) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(body).with_status_code(StatusCode(status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
