use grava_core::errors::{ErrorInfo, GravaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "1")
        .with_context("reason", "example")
}

#[test]
fn invalid_argument_surface() {
    let err = GravaError::InvalidArgument(sample_info("invalid-weight", "weight must be finite"));
    assert_eq!(err.info().code, "invalid-weight");
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn vertex_duplicated_surface() {
    let err = GravaError::VertexDuplicated(sample_info("duplicate-vertex", "key collision"));
    assert_eq!(err.info().code, "duplicate-vertex");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn vertex_not_found_surface() {
    let err = GravaError::vertex_not_found("unknown-vertex", "vertex does not exist")
        .with_context("vertex", "\"a\"");
    assert_eq!(err.info().code, "unknown-vertex");
    assert_eq!(err.info().context.get("vertex").map(String::as_str), Some("\"a\""));
}

#[test]
fn edge_not_found_surface() {
    let err = GravaError::edge_not_found("unknown-edge", "edge does not exist");
    assert_eq!(err.info().code, "unknown-edge");
}

#[test]
fn serialization_surface() {
    let err = GravaError::serialization("unserializable-label", "cannot canonicalize");
    assert_eq!(err.info().code, "unserializable-label");
}

#[test]
fn serde_surface_round_trips_as_json() {
    let err = GravaError::serde("deserialize-json", "unexpected token");
    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: GravaError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn hint_is_rendered_in_display() {
    let err = GravaError::InvalidArgument(
        ErrorInfo::new("invalid-position", "coordinates must be finite").with_hint("check for NaN"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("invalid-position"));
    assert!(rendered.contains("check for NaN"));
}
