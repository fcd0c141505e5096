// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the patch builder.

#[cfg(test)]
mod tests {
    use crate::patch::build_patch;
    use crate::schema::{
        DesiredState, FieldMapping, IdentitySource, ResourceKind, ResourceSchema,
    };
    use serde_json::{json, Value};

    fn state(value: Value) -> DesiredState {
        value.as_object().cloned().unwrap()
    }

    fn patch(kind: ResourceKind, desired: Value) -> Value {
        Value::Object(build_patch(kind.schema(), &state(desired)))
    }

    #[test]
    fn test_relay_webhook_minimal_patch_nests_domain() {
        let body = patch(
            ResourceKind::RelayWebhook,
            json!({"target": "t", "domain": "d.com"}),
        );
        assert_eq!(body, json!({"target": "t", "match": {"domain": "d.com"}}));
    }

    #[test]
    fn test_relay_webhook_full_patch_renames_fields() {
        let body = patch(
            ResourceKind::RelayWebhook,
            json!({
                "name": "relay",
                "target": "https://hooks.example.com",
                "domain": "in.example.com",
                "authToken": "secret",
                "authType": "oauth2",
                "authRequestDetails": {"url": "https://oauth.example.com/token"},
                "customHeaders": {"x-customer": "42"}
            }),
        );

        assert_eq!(
            body,
            json!({
                "name": "relay",
                "target": "https://hooks.example.com",
                "match": {"domain": "in.example.com"},
                "auth_token": "secret",
                "auth_type": "oauth2",
                "auth_request_details": {"url": "https://oauth.example.com/token"},
                "custom_headers": {"x-customer": "42"}
            })
        );
    }

    #[test]
    fn test_webhook_patch_contains_exactly_required_fields() {
        let body = patch(
            ResourceKind::Webhook,
            json!({"name": "n", "target": "https://x", "events": ["relay.delivery"]}),
        );
        assert_eq!(
            body,
            json!({"name": "n", "target": "https://x", "events": ["relay.delivery"]})
        );
    }

    #[test]
    fn test_webhook_optional_fields_are_renamed() {
        let body = patch(
            ResourceKind::Webhook,
            json!({
                "name": "n",
                "active": false,
                "customHeaders": {"x": "y"},
                "authType": "basic",
                "authCredentials": {"username": "u", "password": "p"}
            }),
        );
        assert_eq!(
            body,
            json!({
                "name": "n",
                "active": false,
                "custom_headers": {"x": "y"},
                "auth_type": "basic",
                "auth_credentials": {"username": "u", "password": "p"}
            })
        );
    }

    #[test]
    fn test_absent_and_null_fields_are_omitted() {
        let body = patch(
            ResourceKind::Webhook,
            json!({"name": "n", "target": null, "customHeaders": null}),
        );
        assert_eq!(body, json!({"name": "n"}));
    }

    #[test]
    fn test_empty_desired_state_builds_empty_patch() {
        for kind in ResourceKind::ALL {
            assert_eq!(patch(kind, json!({})), json!({}));
        }
    }

    #[test]
    fn test_partial_update_touches_only_given_fields() {
        let body = patch(ResourceKind::RelayWebhook, json!({"domain": "new.example.com"}));
        assert_eq!(body, json!({"match": {"domain": "new.example.com"}}));
    }

    #[test]
    fn test_unmapped_fields_are_ignored() {
        let body = patch(
            ResourceKind::InboundDomain,
            json!({"domain": "in.example.com", "id": "in.example.com", "unknown": 1}),
        );
        assert_eq!(body, json!({"domain": "in.example.com"}));
    }

    static MERGED_SCHEMA: ResourceSchema = ResourceSchema {
        kind: ResourceKind::RelayWebhook,
        endpoint: "relay-webhooks",
        required_fields: &[],
        replace_trigger_fields: &[],
        field_map: &[
            FieldMapping::nested("domain", "match", "domain"),
            FieldMapping::nested("protocol", "match", "protocol"),
        ],
        identity: IdentitySource::RemoteId,
        supports_update: true,
    };

    #[test]
    fn test_nested_mappings_merge_into_one_object() {
        let body = build_patch(
            &MERGED_SCHEMA,
            &state(json!({"domain": "in.example.com", "protocol": "SMTP"})),
        );
        assert_eq!(
            Value::Object(body),
            json!({"match": {"domain": "in.example.com", "protocol": "SMTP"}})
        );
    }
}
