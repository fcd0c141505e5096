// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

use serde_json::Value;
use sparkpost_provider::config::ProviderConfig;
use sparkpost_provider::provider::Provider;
use sparkpost_provider::schema::DesiredState;
use std::sync::Arc;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "integration-test-key";

/// Start a mock SparkPost API and a provider pointed at it
pub async fn start_mock_sparkpost() -> (MockServer, Provider) {
    let server = MockServer::start().await;
    let config = ProviderConfig::new(TEST_API_KEY)
        .expect("non-empty api key")
        .with_base_url(server.uri());
    let provider = Provider::new(Arc::new(config));
    (server, provider)
}

/// Convert a JSON object literal into a desired state
pub fn desired(value: Value) -> DesiredState {
    match value {
        Value::Object(state) => state,
        other => panic!("desired state must be an object, got {other}"),
    }
}
