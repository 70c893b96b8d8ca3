use super::*;

#[test]
fn drain_type_parses_case_insensitively() {
    assert_eq!("NDJSON".parse::<LogDrainType>(), Ok(LogDrainType::Ndjson));
    assert_eq!(" syslog ".parse::<LogDrainType>(), Ok(LogDrainType::Syslog));
    assert_eq!(
        "xml".parse::<LogDrainType>(),
        Err(UnknownDrainType("xml".to_string()))
    );
}

#[test]
fn drain_type_defaults_to_ndjson() {
    assert_eq!(LogDrainType::default(), LogDrainType::Ndjson);
    assert_eq!(LogDrainType::default().to_string(), "ndjson");
}

#[test]
fn access_token_debug_is_redacted() {
    let credentials = Credentials::new(Some(TeamId::from("team_1")), AccessToken::new("s3cr3t"));
    let rendered = format!("{credentials:?}");
    assert!(!rendered.contains("s3cr3t"));
    assert!(rendered.contains("team_1"));
    assert_eq!(
        serde_json::to_string(&credentials.access_token).expect("json"),
        "\"<redacted>\""
    );
}

#[test]
fn blank_team_id_from_form_means_personal_account() {
    let credentials = Credentials::from_form("   ", " token ");
    assert_eq!(credentials.team_id, None);
    assert_eq!(credentials.access_token.expose(), "token");

    let credentials = Credentials::from_form("team_9", "token");
    assert_eq!(credentials.team_id, Some(TeamId::from("team_9")));
}

#[test]
fn token_grant_yields_credentials() {
    let grant = TokenGrant {
        token_type: "Bearer".into(),
        access_token: AccessToken::new("abc"),
        installation_id: InstallationId::from("icfg_1"),
        user_id: UserId::from("user_1"),
        team_id: None,
    };
    let credentials = grant.credentials();
    assert_eq!(credentials.team_id, None);
    assert_eq!(credentials.access_token.expose(), "abc");
}

#[test]
fn log_drain_serializes_with_wire_names() {
    let drain = LogDrain {
        id: DrainId::from("ld_1"),
        name: "prod".into(),
        drain_type: LogDrainType::Json,
        url: "https://example.com/logs".into(),
        project_id: None,
        created_at: None,
    };
    let value = serde_json::to_value(&drain).expect("json");
    assert_eq!(value["type"], "json");
    assert!(value.get("projectId").is_none());
}

#[test]
fn unknown_drain_type_message_lists_choices() {
    let err = "xml".parse::<LogDrainType>().expect_err("xml");
    assert_eq!(
        err.to_string(),
        "unknown log drain type `xml` (expected json, ndjson or syslog)"
    );
}

#[test]
fn token_grant_requires_team_id_key() {
    let body = r#"{"token_type":"Bearer","access_token":"t","installation_id":"i","user_id":"u"}"#;
    assert!(serde_json::from_str::<TokenGrant>(body).is_err());

    let body = r#"{"token_type":"Bearer","access_token":"t","installation_id":"i","user_id":"u","team_id":null}"#;
    let grant: TokenGrant = serde_json::from_str(body).expect("grant");
    assert_eq!(grant.team_id, None);
    assert_eq!(grant.credentials().access_token.expose(), "t");
}
