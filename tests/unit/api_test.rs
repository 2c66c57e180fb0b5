//! Tests for the run-case API layer
//!
//! Tests error kinds, body decoding and handler invocation.

use std::cell::Cell;
use std::io::Cursor;

use serde_json::{Value, json};

use crate::common::{failing_handler, identity_handler, panicking_handler};

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use agent_adapter::api::{ApiError, ErrorKind};

    #[test]
    fn test_invalid_json_maps_to_400() {
        let err = ApiError::invalid_json("expected value");
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message, "expected value");
    }

    #[test]
    fn test_handler_error_maps_to_500() {
        let err = ApiError::handler_error("boom");
        assert_eq!(err.kind, ErrorKind::HandlerError);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ErrorKind::InvalidJson.as_str(), "invalid_json");
        assert_eq!(ErrorKind::HandlerError.as_str(), "handler_error");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::handler_error("backend unavailable");
        assert_eq!(err.to_string(), "handler_error: backend unavailable");
    }

    #[test]
    fn test_envelope_serializes_error_and_message() {
        let err = ApiError::invalid_json("EOF while parsing");
        let json = serde_json::to_value(err.envelope()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "invalid_json", "message": "EOF while parsing"})
        );
    }
}

// =============================================================================
// BODY DECODING
// =============================================================================

mod decode_tests {
    use super::{Cursor, json};
    use agent_adapter::api::{ErrorKind, decode_body};

    #[test]
    fn test_decodes_object() {
        let body = br#"{"case_id":"c1","version":1}"#;
        let value = decode_body(Cursor::new(&body[..]), Some(body.len())).unwrap();
        assert_eq!(value, json!({"case_id": "c1", "version": 1}));
    }

    #[test]
    fn test_decodes_non_object_json() {
        let value = decode_body(Cursor::new(&b"[1,2]"[..]), Some(5)).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_reads_only_content_length_bytes() {
        let body = b"{}trailing garbage";
        let value = decode_body(Cursor::new(&body[..]), Some(2)).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_malformed_json_is_invalid_json() {
        let body = b"not json";
        let err = decode_body(Cursor::new(&body[..]), Some(body.len())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_missing_length_is_invalid_json() {
        let err = decode_body(Cursor::new(&b"{}"[..]), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
    }

    #[test]
    fn test_short_body_is_invalid_json() {
        let err = decode_body(Cursor::new(&b"{}"[..]), Some(10)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert!(err.message.contains("2 of 10"));
    }

    #[test]
    fn test_invalid_utf8_is_invalid_json() {
        let body = [0xff, 0xfe, 0xfd];
        let err = decode_body(Cursor::new(&body[..]), Some(body.len())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert!(err.message.contains("UTF-8"));
    }
}

// =============================================================================
// HANDLER INVOCATION
// =============================================================================

mod invoke_tests {
    use super::{Value, failing_handler, identity_handler, json, panicking_handler};
    use agent_adapter::api::{ErrorKind, invoke};

    #[test]
    fn test_success_passes_value_through() {
        let input = json!({"b": 1, "a": 2});
        let output = invoke(&identity_handler, input.clone()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_preserves_key_order() {
        let input: Value = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let output = invoke(&identity_handler, input).unwrap();
        assert_eq!(serde_json::to_string(&output).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_error_becomes_handler_error() {
        let err = invoke(&failing_handler, json!({})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HandlerError);
        assert_eq!(err.message, "backend unavailable");
    }

    #[test]
    fn test_error_context_chain_is_reported() {
        use anyhow::Context as _;

        let handler = |_: Value| -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("connection refused")).context("calling model")
        };
        let err = invoke(&handler, json!({})).unwrap_err();
        assert_eq!(err.message, "calling model: connection refused");
    }

    #[test]
    fn test_panic_becomes_handler_error() {
        let err = invoke(&panicking_handler, json!({})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HandlerError);
        assert_eq!(err.message, "handler panicked: agent crashed");
    }

    #[test]
    fn test_formatted_panic_message() {
        let handler = |request: Value| -> anyhow::Result<Value> {
            panic!("bad case {}", request["case_id"]);
        };
        let err = invoke(&handler, json!({"case_id": 7})).unwrap_err();
        assert_eq!(err.message, "handler panicked: bad case 7");
    }
}

// =============================================================================
// RUN-CASE FLOW
// =============================================================================

mod run_case_tests {
    use super::{Cell, Cursor, Value, json};
    use agent_adapter::api::{ErrorKind, example_handler, run_case};

    #[test]
    fn test_example_scenario() {
        let body = br#"{"case_id":"c1","version":1,"input":{"user":"u"}}"#;
        let output = run_case(&example_handler, Cursor::new(&body[..]), Some(body.len())).unwrap();
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"case_id":"c1","version":1,"final_output":{"content_type":"text","content":"ok"},"events":[]}"#
        );
    }

    #[test]
    fn test_handler_not_called_on_invalid_json() {
        let calls = Cell::new(0);
        let handler = |request: Value| -> anyhow::Result<Value> {
            calls.set(calls.get() + 1);
            Ok(request)
        };

        let body = b"{broken";
        let err = run_case(&handler, Cursor::new(&body[..]), Some(body.len())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_handler_called_once_on_valid_json() {
        let calls = Cell::new(0);
        let handler = |request: Value| -> anyhow::Result<Value> {
            calls.set(calls.get() + 1);
            Ok(request)
        };

        let output = run_case(&handler, Cursor::new(&b"{}"[..]), Some(2)).unwrap();
        assert_eq!(output, json!({}));
        assert_eq!(calls.get(), 1);
    }
}
