// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for the SparkPost HTTP client (URL building, request shape, error mapping).

#[cfg(test)]
mod tests {
    use crate::client::{body_fields, error_payload, parse_base_url, RemoteApi, RemoteResponse, SparkPostClient};
    use crate::config::ProviderConfig;
    use crate::errors::ProviderError;
    use crate::schema::ResourceKind;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-api-key";

    fn client_for(base_url: &str) -> SparkPostClient {
        let config = ProviderConfig::new(API_KEY)
            .unwrap()
            .with_base_url(base_url);
        SparkPostClient::new(&config).unwrap()
    }

    // =====================================================
    // URL Building Tests
    // =====================================================

    #[test]
    fn test_endpoint_url_default_base() {
        let client = client_for("https://api.sparkpost.com/api/v1");
        let url = client.endpoint_url(ResourceKind::Webhook, None);
        assert_eq!(url.as_str(), "https://api.sparkpost.com/api/v1/webhooks");
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let client = client_for("https://api.sparkpost.com/api/v1/");
        let url = client.endpoint_url(ResourceKind::RelayWebhook, Some("abc123"));
        assert_eq!(
            url.as_str(),
            "https://api.sparkpost.com/api/v1/relay-webhooks/abc123"
        );
    }

    #[test]
    fn test_endpoint_url_host_only() {
        let client = client_for("http://127.0.0.1:8080");
        let url = client.endpoint_url(ResourceKind::InboundDomain, Some("in.example.com"));
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/inbound-domains/in.example.com"
        );
    }

    #[test]
    fn test_endpoint_url_encodes_identity() {
        let client = client_for("https://api.sparkpost.com/api/v1");
        let url = client.endpoint_url(ResourceKind::Webhook, Some("a/b c"));
        assert_eq!(
            url.as_str(),
            "https://api.sparkpost.com/api/v1/webhooks/a%2Fb%20c"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ProviderError::Config(_))
        ));
        assert!(matches!(
            parse_base_url("mailto:ops@example.com"),
            Err(ProviderError::Config(_))
        ));
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(ProviderError::Config(_))
        ));
        assert!(parse_base_url("https://api.eu.sparkpost.com/api/v1").is_ok());
    }

    #[test]
    fn test_body_fields_lists_names_only() {
        let body = json!({
            "name": "n",
            "auth_credentials": {"username": "u", "password": "p"}
        });
        let mut fields = body_fields(&body);
        fields.sort_unstable();
        assert_eq!(fields, vec!["auth_credentials", "name"]);
        assert!(body_fields(&json!(null)).is_empty());
    }

    #[test]
    fn test_client_debug_redacts_api_key() {
        let client = client_for("https://api.sparkpost.com/api/v1");
        let debug_output = format!("{client:?}");
        assert!(debug_output.starts_with("SparkPostClient"));
        assert!(!debug_output.contains(API_KEY));
    }

    // =====================================================
    // Response / Payload Helpers
    // =====================================================

    #[test]
    fn test_error_payload_extracts_errors_array() {
        let payload = error_payload(r#"{"errors":[{"message":"invalid target"}]}"#);
        assert_eq!(payload, json!([{"message": "invalid target"}]));
    }

    #[test]
    fn test_error_payload_keeps_other_json_whole() {
        let payload = error_payload(r#"{"message":"boom"}"#);
        assert_eq!(payload, json!({"message": "boom"}));
    }

    #[test]
    fn test_error_payload_keeps_non_json_text() {
        let payload = error_payload("<html>Bad Gateway</html>");
        assert_eq!(payload, json!("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_result_id_string_and_number() {
        let response = RemoteResponse {
            status: 200,
            body: json!({"results": {"id": "12013026328707075"}}),
        };
        assert_eq!(response.result_id().as_deref(), Some("12013026328707075"));

        let response = RemoteResponse {
            status: 200,
            body: json!({"results": {"id": 42}}),
        };
        assert_eq!(response.result_id().as_deref(), Some("42"));

        let response = RemoteResponse {
            status: 200,
            body: json!({"results": {"id": ""}}),
        };
        assert!(response.result_id().is_none());

        let response = RemoteResponse {
            status: 204,
            body: serde_json::Value::Null,
        };
        assert!(response.result_id().is_none());
    }

    // =====================================================
    // HTTP Behaviour Tests
    // =====================================================

    #[tokio::test]
    async fn test_create_posts_json_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks"))
            .and(header("authorization", API_KEY))
            .and(header("accept", "application/json"))
            .and(body_json(json!({"name": "n", "target": "https://x", "events": ["delivery"]})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"results": {"id": "wh-1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client
            .create(
                ResourceKind::Webhook,
                &json!({"name": "n", "target": "https://x", "events": ["delivery"]}),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.result_id().as_deref(), Some("wh-1"));
    }

    #[tokio::test]
    async fn test_update_puts_to_identity() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/relay-webhooks/rw-1"))
            .and(body_json(json!({"target": "https://new"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"results": {"id": "rw-1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client
            .update(ResourceKind::RelayWebhook, "rw-1", &json!({"target": "https://new"}))
            .await
            .unwrap();
        assert_eq!(response.result_id().as_deref(), Some("rw-1"));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/inbound-domains/in.example.com"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client
            .delete(ResourceKind::InboundDomain, "in.example.com")
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_null());
    }

    #[tokio::test]
    async fn test_get_returns_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webhooks/wh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"results": {"name": "n", "target": "https://x", "events": ["delivery"]}}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client.get(ResourceKind::Webhook, "wh-1").await.unwrap();
        assert_eq!(
            response.results(),
            Some(&json!({"name": "n", "target": "https://x", "events": ["delivery"]}))
        );
    }

    #[tokio::test]
    async fn test_remote_error_carries_payload_verbatim() {
        let server = MockServer::start().await;
        let errors = json!([{
            "message": "invalid params",
            "description": "Target must be an https URL",
            "code": "1200"
        }]);
        Mock::given(method("POST"))
            .and(path("/relay-webhooks"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"errors": errors})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .create(ResourceKind::RelayWebhook, &json!({"target": "http://t"}))
            .await
            .unwrap_err();

        match err {
            ProviderError::RemoteService {
                kind,
                operation,
                status,
                reason,
                errors: payload,
            } => {
                assert_eq!(kind, ResourceKind::RelayWebhook);
                assert_eq!(operation, "create");
                assert_eq!(status, 422);
                assert_eq!(reason, "Unprocessable");
                assert_eq!(payload, errors);
            }
            other => panic!("expected remote service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remote_error_with_plain_text_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/webhooks/wh-1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.delete(ResourceKind::Webhook, "wh-1").await.unwrap_err();

        assert_eq!(err.remote_errors(), Some(&json!("upstream unavailable")));
        assert!(matches!(
            err,
            ProviderError::RemoteService {
                status: 503,
                reason: "GatewayError",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .create(ResourceKind::Webhook, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Transport {
                reason: "InvalidResponse",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_request_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webhooks/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = ProviderConfig::new(API_KEY)
            .unwrap()
            .with_base_url(server.uri())
            .with_request_timeout(Duration::from_millis(200));
        let client = SparkPostClient::new(&config).unwrap();

        let err = client.get(ResourceKind::Webhook, "slow").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Transport {
                reason: "RequestTimeout",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_no_retry_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"errors": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        assert!(client.create(ResourceKind::Webhook, &json!({})).await.is_err());
        // MockServer verifies `expect(1)` on drop
    }
}
