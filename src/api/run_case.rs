//! Body decoding and handler invocation for `/run-case`

use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use super::error::ApiError;
use super::handler::Handler;

/// Exact body of every `/health` response
pub const HEALTH_BODY: &[u8] = br#"{"ok": true}"#;

/// Read exactly `content_length` bytes from `body` and parse them as JSON
///
/// A missing length reads nothing, which then fails to parse. Under tiny_http
/// a short body only gets here when more than 1024 bytes were declared;
/// smaller ones are buffered up front and a short one drops the connection.
pub fn decode_body<R: Read>(body: R, content_length: Option<usize>) -> Result<Value, ApiError> {
    let expected = content_length.unwrap_or(0);
    let mut buf = Vec::with_capacity(expected.min(64 * 1024));
    body.take(u64::try_from(expected).unwrap_or(u64::MAX))
        .read_to_end(&mut buf)
        .map_err(|e| ApiError::invalid_json(format!("failed to read request body: {e}")))?;

    if buf.len() < expected {
        return Err(ApiError::invalid_json(format!(
            "request body ended after {} of {expected} bytes",
            buf.len()
        )));
    }

    let text = std::str::from_utf8(&buf)
        .map_err(|e| ApiError::invalid_json(format!("request body is not valid UTF-8: {e}")))?;

    serde_json::from_str(text).map_err(|e| ApiError::invalid_json(e.to_string()))
}

/// Call the handler once, turning errors and panics into `handler_error`
pub fn invoke<H: Handler + ?Sized>(handler: &H, request: Value) -> Result<Value, ApiError> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(request))) {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ApiError::handler_error(format!("{err:#}"))),
        Err(payload) => Err(ApiError::handler_error(format!(
            "handler panicked: {}",
            panic_message(&*payload)
        ))),
    }
}

/// Decode the body, then invoke the handler
///
/// The handler never runs when decoding fails.
pub fn run_case<H, R>(
    handler: &H,
    body: R,
    content_length: Option<usize>,
) -> Result<Value, ApiError>
where
    H: Handler + ?Sized,
    R: Read,
{
    let request = decode_body(body, content_length)?;
    invoke(handler, request)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
