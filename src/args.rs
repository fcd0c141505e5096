// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed resource arguments.
//!
//! The lifecycle protocol works on untyped [`DesiredState`] mappings because
//! that is what the orchestrator hands over. These structs give Rust callers
//! a checked way to build one: optional fields left as `None` are not
//! serialized at all, so they never reach the patch builder.
//!
//! # Example
//!
//! ```rust
//! use sparkpost_provider::args::{RelayWebhookArgs, ResourceArgs};
//!
//! let args = RelayWebhookArgs {
//!     target: "https://hooks.example.com/inbound".into(),
//!     domain: "inbound.example.com".into(),
//!     ..Default::default()
//! };
//! let desired = args.to_desired().unwrap();
//! assert_eq!(desired.len(), 2);
//! ```

use crate::schema::{AuthType, DesiredState, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments that describe one resource kind.
pub trait ResourceArgs: Serialize {
    /// Kind these arguments describe
    const KIND: ResourceKind;

    /// Convert into a desired-state mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not serialize to a JSON object.
    fn to_desired(&self) -> Result<DesiredState, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(state) => Ok(state),
            other => Err(serde::ser::Error::custom(format!(
                "{} arguments must serialize to an object, got {other}",
                Self::KIND
            ))),
        }
    }
}

/// Arguments for an inbound domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundDomainArgs {
    /// Domain that receives inbound mail; also the remote identity
    pub domain: String,
}

impl ResourceArgs for InboundDomainArgs {
    const KIND: ResourceKind = ResourceKind::InboundDomain;
}

/// Arguments for a relay webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayWebhookArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL inbound messages are POSTed to
    pub target: String,
    /// Inbound domain whose mail is relayed
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_request_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Value>,
}

impl ResourceArgs for RelayWebhookArgs {
    const KIND: ResourceKind = ResourceKind::RelayWebhook;
}

/// Arguments for an event webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookArgs {
    pub name: String,
    /// URL event batches are POSTed to
    pub target: String,
    /// Event types to deliver, e.g. `delivery`, `bounce`
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_request_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_credentials: Option<Value>,
}

impl ResourceArgs for WebhookArgs {
    const KIND: ResourceKind = ResourceKind::Webhook;
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod args_tests;
