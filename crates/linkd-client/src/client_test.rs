use super::*;

fn test_client(base_url: &str) -> LinkdClient {
    LinkdClient::with_base_url(base_url, 30, "linkd-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_constructs_query_string() {
    let client = test_client("https://api.linkd.example");
    let url = client.endpoint("api/search", &[("query", "founders"), ("offset", "20")]);
    assert_eq!(
        url.as_str(),
        "https://api.linkd.example/api/search?query=founders&offset=20"
    );
}

#[test]
fn endpoint_without_params_has_no_query() {
    let client = test_client("https://api.linkd.example/");
    let url = client.endpoint("api/elo/pair", &[]);
    assert_eq!(url.as_str(), "https://api.linkd.example/api/elo/pair");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://gateway.example/linkd/");
    let url = client.endpoint("api/leaderboard", &[]);
    assert_eq!(url.as_str(), "https://gateway.example/linkd/api/leaderboard");
}

#[test]
fn endpoint_encodes_special_characters() {
    let client = test_client("https://api.linkd.example");
    let url = client.endpoint("api/search", &[("query", "Alumni in tech & finance")]);
    assert!(
        url.as_str().contains("Alumni+in+tech+%26+finance"),
        "query param should be form-encoded: {url}"
    );
}

#[test]
fn remote_http_base_is_upgraded() {
    let client = test_client("http://api.linkd.example/");
    assert_eq!(client.base_url().as_str(), "https://api.linkd.example/");
}

#[test]
fn local_http_base_is_kept() {
    let client = test_client("http://localhost:8000");
    assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = LinkdClient::with_base_url("api.linkd.example", 30, "ua");
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn error_message_prefers_json_detail() {
    let msg = error_message(
        r#"{"detail": "Invalid result value"}"#,
        StatusCode::BAD_REQUEST,
    );
    assert_eq!(msg, "Invalid result value");
}

#[test]
fn error_message_renders_structured_detail() {
    let msg = error_message(
        r#"{"detail": [{"loc": ["query", "offset"], "msg": "field required"}]}"#,
        StatusCode::UNPROCESSABLE_ENTITY,
    );
    assert!(msg.contains("field required"), "{msg}");
}

#[test]
fn error_message_falls_back_to_body_text() {
    let msg = error_message("upstream exploded\n", StatusCode::BAD_GATEWAY);
    assert_eq!(msg, "upstream exploded");
}

#[test]
fn error_message_falls_back_to_reason_phrase() {
    let msg = error_message("", StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(msg, "Internal Server Error");
}

#[test]
fn error_message_json_without_detail_uses_body() {
    let msg = error_message(r#"{"error": "nope"}"#, StatusCode::BAD_REQUEST);
    assert_eq!(msg, r#"{"error": "nope"}"#);
}
