#![cfg(all(feature = "pipe", feature = "serde"))]

//! Integration tests for serializing pipe errors.
//!
//! A pipe error is plain data, so it can be logged or shipped as JSON.

use effect_pipe::effect::{Effect, fail, pure};
use effect_pipe::pipe::{Pipe, PipeError};
use rstest::rstest;
use serde_json::json;

fn failed_signup() -> PipeError<String, u32, String> {
    Pipe::new()
        .then("user".to_string(), |_| pure(7))
        .then("team".to_string(), |_| fail("quota exceeded".to_string()))
        .execute()
        .expect_err("team step fails")
}

// =============================================================================
// PipeError Integration Tests
// =============================================================================

#[rstest]
fn test_pipe_error_json_shape() {
    let value = serde_json::to_value(failed_signup()).unwrap();

    assert_eq!(
        value,
        json!({
            "errors": { "team": "quota exceeded" },
            "results": { "user": 7 },
        })
    );
}

#[rstest]
fn test_pipe_error_json_roundtrip() {
    let error = failed_signup();
    let json = serde_json::to_string(&error).unwrap();
    let restored: PipeError<String, u32, String> = serde_json::from_str(&json).unwrap();

    assert_eq!(error, restored);
    assert_eq!(restored.failure(), Some((&"team".to_string(), &"quota exceeded".to_string())));
}

#[rstest]
fn test_pipe_error_with_structured_step_error() {
    #[derive(Debug, PartialEq, serde::Serialize)]
    struct Rejected {
        code: u16,
    }

    let error = Pipe::<&str, bool, Rejected>::new()
        .then("check", |_| fail(Rejected { code: 429 }))
        .execute()
        .expect_err("check fails");

    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({ "errors": { "check": { "code": 429 } }, "results": {} })
    );
}
