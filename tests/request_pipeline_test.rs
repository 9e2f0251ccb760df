//! End-to-end tests of the request pipeline itself, driving `ApiRequest`
//! directly against a mock server.

use serde_json::json;

use dwolla_sdk::{ApiRequest, Configuration, HttpMethod, RequestBody, RequestOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(mock_server: &MockServer) -> Configuration {
    Configuration::builder()
        .base_url(&mock_server.uri())
        .access_token("test-token")
        .force_ending_format(false)
        .build()
}

#[tokio::test]
async fn json_bodies_are_camel_cased_shallowly_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let options = RequestOptions::new().auth("oauth2").body(RequestBody::Json(json!({
        "first_name": "A",
        "profile": {"nick_name": "a"}
    })));
    ApiRequest::new(&config, HttpMethod::Post, "/customers", options)
        .execute(&reqwest::Client::new())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    // Top-level keys are recased; nested keys are not.
    assert_eq!(sent["firstName"], "A");
    assert_eq!(sent["profile"]["nick_name"], "a");
}

#[tokio::test]
async fn default_headers_and_bearer_auth_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    ApiRequest::new(
        &config,
        HttpMethod::Get,
        "/documents/a",
        RequestOptions::new().auth("oauth2"),
    )
    .execute(&reqwest::Client::new())
    .await
    .unwrap();

    let request = &mock_server.received_requests().await.unwrap()[0];
    assert_eq!(
        request.headers.get("authorization").unwrap(),
        "Bearer test-token"
    );
    assert_eq!(
        request.headers.get("content-type").unwrap(),
        "application/json"
    );
    assert!(
        request
            .headers
            .get("user-agent")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("dwolla-sdk-rust/")
    );
}

#[test]
fn path_params_never_leak_into_the_query_string() {
    let config = Configuration::builder()
        .host("api.example.com")
        .force_ending_format(false)
        .build();

    // With a fully substituted path both params are query params.
    let options = RequestOptions::new()
        .query_param("word", "cat")
        .query_param("limit", 5);
    let request = ApiRequest::new(&config, HttpMethod::Get, "/words/cat/entries", options);
    assert_eq!(request.query_string(), "limit=5&word=cat");

    // "word" names a path placeholder here, so it is excluded.
    let options = RequestOptions::new()
        .query_param("word", "cat")
        .query_param("limit", 5);
    let request = ApiRequest::new(&config, HttpMethod::Get, "/words/{word}/entries", options);
    assert_eq!(request.query_string(), "limit=5");
}
