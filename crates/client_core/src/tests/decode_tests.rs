use serde_json::json;
use shared::domain::{LogDrain, LogDrainType, ProjectId, TokenGrant};

use super::*;

fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DecodeError> {
    decode_json(value.to_string().as_bytes())
}

#[test]
fn decodes_token_grant_with_null_team() {
    let grant: TokenGrant = decode_value(json!({
        "token_type": "Bearer",
        "access_token": "tok_123",
        "installation_id": "icfg_1",
        "user_id": "user_1",
        "team_id": null,
        "extra": {"ignored": true}
    }))
    .expect("grant");
    assert_eq!(grant.team_id, None);
    assert_eq!(grant.access_token.expose(), "tok_123");
    assert_eq!(grant.installation_id.as_str(), "icfg_1");
}

#[test]
fn nullable_field_must_still_be_present() {
    let err = decode_value::<TokenGrant>(json!({
        "token_type": "Bearer",
        "access_token": "tok_123",
        "installation_id": "icfg_1",
        "user_id": "user_1"
    }))
    .expect_err("team_id is required");
    assert_eq!(
        err,
        DecodeError::MissingField {
            path: "$.team_id".into()
        }
    );
}

#[test]
fn wrong_type_names_field() {
    let err = decode_value::<TokenGrant>(json!({
        "token_type": "Bearer",
        "access_token": 42,
        "installation_id": "icfg_1",
        "user_id": "user_1",
        "team_id": "team_1"
    }))
    .expect_err("number is not a string");
    assert_eq!(err.path(), Some("$.access_token"));
    assert!(
        err.to_string()
            .starts_with("$.access_token: invalid type: integer `42`"),
        "{err}"
    );
}

#[test]
fn project_list_reports_index_of_bad_element() {
    let err = decode_value::<ProjectList>(json!({
        "projects": [
            {"accountId": "a", "id": "prj_1", "name": "web"},
            {"accountId": "a", "id": "prj_2", "name": "api"},
            {"id": "prj_3", "name": "docs"}
        ]
    }))
    .expect_err("third project lacks accountId");
    assert_eq!(err.path(), Some("$.projects[2].accountId"));
}

#[test]
fn decodes_project_list() {
    let ProjectList { projects } = decode_value(json!({
        "projects": [{"accountId": "team_1", "id": "prj_1", "name": "web", "framework": "nextjs"}]
    }))
    .expect("projects");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "web");
    assert_eq!(projects[0].id.as_str(), "prj_1");
}

#[test]
fn decodes_log_drain_with_optional_fields() {
    let drains: Vec<LogDrain> = decode_value(json!([
        {"id": "ld_1", "name": "prod", "type": "ndjson", "url": "https://a.example/logs",
         "projectId": "prj_1", "createdAt": 1_700_000_000_000i64},
        {"id": "ld_2", "name": "all", "type": "syslog", "url": "https://b.example/logs",
         "projectId": null}
    ]))
    .expect("drains");
    assert_eq!(drains[0].drain_type, LogDrainType::Ndjson);
    assert_eq!(drains[0].project_id.as_ref().map(ProjectId::as_str), Some("prj_1"));
    assert_eq!(
        drains[0].created_at.map(|ts| ts.timestamp_millis()),
        Some(1_700_000_000_000)
    );
    assert_eq!(drains[1].project_id, None);
    assert_eq!(drains[1].created_at, None);
}

#[test]
fn unknown_drain_type_is_rejected_with_path() {
    let err = decode_value::<Vec<LogDrain>>(json!([
        {"id": "ld_1", "name": "prod", "type": "xml", "url": "https://a.example/logs"}
    ]))
    .expect_err("xml is not a drain type");
    assert_eq!(err.path(), Some("$[0].type"));
    assert!(err.to_string().contains("unknown variant `xml`"), "{err}");
}

#[test]
fn top_level_shape_mismatch() {
    let err = decode_value::<Vec<LogDrain>>(json!({"drains": []})).expect_err("object");
    assert!(matches!(err, DecodeError::Invalid { .. }));
    assert_eq!(err.path(), Some("$"));
}

#[test]
fn invalid_json_is_a_syntax_error() {
    let err = decode_json::<Vec<LogDrain>>(b"<html>oops</html>").expect_err("not json");
    assert!(matches!(err, DecodeError::Syntax(_)));
    assert_eq!(err.path(), None);
}

#[test]
fn error_envelope_decodes_code_and_message() {
    let envelope: ErrorEnvelope = decode_value(json!({
        "error": {"code": "forbidden", "message": "Not authorized"}
    }))
    .expect("envelope");
    assert_eq!(envelope.error.code.as_deref(), Some("forbidden"));
    assert_eq!(envelope.error.message, "Not authorized");
}

#[test]
fn trailing_garbage_is_a_syntax_error() {
    let err = decode_json::<Vec<LogDrain>>(b"[] []").expect_err("trailing data");
    assert!(matches!(err, DecodeError::Syntax(_)));
}

#[test]
fn created_at_must_be_integer_millis() {
    let err = decode_value::<Vec<LogDrain>>(json!([
        {"id": "ld_1", "name": "prod", "type": "json", "url": "https://a.example/logs",
         "createdAt": 1.5}
    ]))
    .expect_err("float timestamp");
    assert_eq!(err.path(), Some("$[0].createdAt"));

    let err = decode_value::<Vec<LogDrain>>(json!([
        {"id": "ld_1", "name": "prod", "type": "json", "url": "https://a.example/logs",
         "createdAt": i64::MAX}
    ]))
    .expect_err("timestamp out of range");
    assert_eq!(err.path(), Some("$[0].createdAt"));
}

#[test]
fn non_string_project_id_is_rejected() {
    let err = decode_value::<Vec<LogDrain>>(json!([
        {"id": "ld_1", "name": "prod", "type": "json", "url": "https://a.example/logs",
         "projectId": 5}
    ]))
    .expect_err("numeric project id");
    assert_eq!(err.path(), Some("$[0].projectId"));
    assert!(matches!(err, DecodeError::Invalid { .. }));
}

#[test]
fn error_envelope_requires_message() {
    let err = decode_value::<ErrorEnvelope>(json!({"error": {"code": "forbidden"}}))
        .expect_err("message missing");
    assert_eq!(
        err,
        DecodeError::MissingField {
            path: "$.error.message".into()
        }
    );
}
