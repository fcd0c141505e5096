// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the SparkPost provider.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Remote API Constants
// ============================================================================

/// Default SparkPost REST API base URL (US region)
pub const DEFAULT_API_BASE_URL: &str = "https://api.sparkpost.com/api/v1";

/// SparkPost REST API base URL for the EU region
pub const EU_API_BASE_URL: &str = "https://api.eu.sparkpost.com/api/v1";

/// Endpoint path for inbound domains
pub const INBOUND_DOMAINS_PATH: &str = "inbound-domains";

/// Endpoint path for relay webhooks
pub const RELAY_WEBHOOKS_PATH: &str = "relay-webhooks";

/// Endpoint path for event webhooks
pub const WEBHOOKS_PATH: &str = "webhooks";

/// Default per-request timeout for remote calls (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every remote request
pub const USER_AGENT: &str = concat!("sparkpost-provider/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Resource Kind Names
// ============================================================================

/// Kind name for the inbound domain resource
pub const KIND_INBOUND_DOMAIN: &str = "InboundDomain";

/// Kind name for the relay webhook resource
pub const KIND_RELAY_WEBHOOK: &str = "RelayWebhook";

/// Kind name for the event webhook resource
pub const KIND_WEBHOOK: &str = "Webhook";

// ============================================================================
// Desired-State Field Names
// ============================================================================

/// Output field carrying the remote identity
pub const FIELD_ID: &str = "id";

pub const FIELD_DOMAIN: &str = "domain";
pub const FIELD_NAME: &str = "name";
pub const FIELD_TARGET: &str = "target";
pub const FIELD_EVENTS: &str = "events";
pub const FIELD_ACTIVE: &str = "active";
pub const FIELD_AUTH_TOKEN: &str = "authToken";
pub const FIELD_AUTH_TYPE: &str = "authType";
pub const FIELD_AUTH_REQUEST_DETAILS: &str = "authRequestDetails";
pub const FIELD_AUTH_CREDENTIALS: &str = "authCredentials";
pub const FIELD_CUSTOM_HEADERS: &str = "customHeaders";

// ============================================================================
// Configuration Constants
// ============================================================================

/// Namespace of the provider settings inside a configuration file
pub const CONFIG_NAMESPACE: &str = "sparkpost";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "SPARKPOST_API_KEY";

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "SPARKPOST_BASE_URL";

/// Environment variable overriding the per-request timeout in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SPARKPOST_REQUEST_TIMEOUT_SECS";

// ============================================================================
// Metrics Constants
// ============================================================================

/// Operation label for the validation stage
pub const OP_CHECK: &str = "check";

/// Operation label for the replace-decision stage
pub const OP_DIFF: &str = "diff";

/// Operation label for remote create
pub const OP_CREATE: &str = "create";

/// Operation label for remote update
pub const OP_UPDATE: &str = "update";

/// Operation label for remote delete
pub const OP_DELETE: &str = "delete";

/// Operation label for remote read
pub const OP_READ: &str = "read";
