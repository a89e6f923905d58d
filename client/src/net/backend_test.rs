use super::*;

#[test]
fn token_endpoint_carries_grant_type() {
    assert_eq!(
        token_endpoint("https://p.example.co", "password"),
        "https://p.example.co/auth/v1/token?grant_type=password"
    );
    assert_eq!(
        token_endpoint("https://p.example.co", "refresh_token"),
        "https://p.example.co/auth/v1/token?grant_type=refresh_token"
    );
}

#[test]
fn auth_and_table_endpoints() {
    assert_eq!(auth_endpoint("https://p.example.co", "logout"), "https://p.example.co/auth/v1/logout");
    assert_eq!(table_endpoint("https://p.example.co", "detections"), "https://p.example.co/rest/v1/detections");
}

#[test]
fn unconfigured_client_is_rejected() {
    assert_eq!(BackendClient::new("", "").ensure_configured(), Err(IdentityError::NotConfigured));
    assert_eq!(BackendClient::new("https://p.example.co", "anon").ensure_configured(), Ok(()));
}

#[test]
fn provider_error_message_prefers_description() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(provider_error_message(400, body), "Invalid login credentials");
}

#[test]
fn provider_error_message_reads_msg_field() {
    assert_eq!(provider_error_message(422, r#"{"code":422,"msg":"User already registered"}"#), "User already registered");
}

#[test]
fn provider_error_message_falls_back_to_status() {
    assert_eq!(provider_error_message(503, "<html>bad gateway</html>"), "request failed: 503");
    assert_eq!(provider_error_message(401, r#"{"message":""}"#), "request failed: 401");
}

#[test]
fn provider_error_displays_message_only() {
    let err = IdentityError::Provider { status: 400, message: "Invalid login credentials".to_owned() };
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[test]
fn sign_up_without_tokens_means_confirmation_pending() {
    let body = r#"{"id":"u-9","email":"new@example.com","confirmation_sent_at":"2024-05-01T00:00:00Z"}"#;
    assert_eq!(parse_sign_up(body, 0), Ok(None));
}

#[test]
fn sign_up_with_tokens_yields_session() {
    let body = r#"{"access_token":"at","refresh_token":"rt","expires_in":60,"user":{"id":"u-9"}}"#;
    let session = parse_sign_up(body, 100).expect("parse").expect("session");
    assert_eq!(session.access_token, "at");
    assert_eq!(session.expires_at, Some(160));
}

#[test]
fn malformed_session_body_is_decode_error() {
    assert!(matches!(parse_session("{}", 0), Err(IdentityError::Decode(_))));
}

#[test]
fn rejected_tokens_count_as_session_gone() {
    let provider = |status| IdentityError::Provider { status, message: String::new() };
    assert!(provider(401).is_session_gone());
    assert!(provider(403).is_session_gone());
    assert!(provider(404).is_session_gone());
    assert!(!provider(400).is_session_gone());
    assert!(!provider(500).is_session_gone());
    assert!(!IdentityError::Transport("offline".to_owned()).is_session_gone());
}
