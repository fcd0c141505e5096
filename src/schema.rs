// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource descriptors for the SparkPost resource kinds.
//!
//! Every resource kind is described by a static [`ResourceSchema`]: the fields a
//! desired state must carry, the fields whose change forces a replace, and the
//! ordered field map used to turn desired state into a remote request body.
//! The lifecycle logic in [`crate::controller`] is driven entirely by this data.
//!
//! # Example
//!
//! ```rust
//! use sparkpost_provider::schema::ResourceKind;
//!
//! let schema = ResourceKind::RelayWebhook.schema();
//! assert_eq!(schema.required_fields, &["domain", "target"]);
//! assert!(schema.replace_trigger_fields.is_empty());
//! ```

use crate::constants::{
    FIELD_ACTIVE, FIELD_AUTH_CREDENTIALS, FIELD_AUTH_REQUEST_DETAILS, FIELD_AUTH_TOKEN,
    FIELD_AUTH_TYPE, FIELD_CUSTOM_HEADERS, FIELD_DOMAIN, FIELD_EVENTS, FIELD_NAME, FIELD_TARGET,
    INBOUND_DOMAINS_PATH, KIND_INBOUND_DOMAIN, KIND_RELAY_WEBHOOK, KIND_WEBHOOK,
    RELAY_WEBHOOKS_PATH, WEBHOOKS_PATH,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Desired (or output) state of a resource instance: field name to value.
///
/// A field counts as present only when its key exists and its value is not
/// JSON `null`. See [`field_value`].
pub type DesiredState = Map<String, Value>;

/// The SparkPost resource kinds managed by this provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Inbound-mail domain (`/inbound-domains`)
    InboundDomain,
    /// Relay webhook forwarding inbound mail to an HTTP target (`/relay-webhooks`)
    RelayWebhook,
    /// Event webhook (`/webhooks`)
    Webhook,
}

impl ResourceKind {
    /// All resource kinds, in declaration order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::InboundDomain,
        ResourceKind::RelayWebhook,
        ResourceKind::Webhook,
    ];

    /// Kind name as used in logs, metrics labels and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::InboundDomain => KIND_INBOUND_DOMAIN,
            ResourceKind::RelayWebhook => KIND_RELAY_WEBHOOK,
            ResourceKind::Webhook => KIND_WEBHOOK,
        }
    }

    /// The static descriptor for this kind.
    #[must_use]
    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            ResourceKind::InboundDomain => &INBOUND_DOMAIN_SCHEMA,
            ResourceKind::RelayWebhook => &RELAY_WEBHOOK_SCHEMA,
            ResourceKind::Webhook => &WEBHOOK_SCHEMA,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the remote target endpoint authenticates calls coming from SparkPost.
///
/// Forwarded verbatim; the controller never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    None,
    Basic,
    Oauth2,
}

/// Transform applied to a desired-state value on its way into a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    /// Write the value unchanged under the remote field name.
    Identity,
    /// Write the value as `{ remote: { key: value } }`, merging with other
    /// mappings that nest under the same remote field.
    Nest {
        /// Key inside the nested object
        key: &'static str,
    },
}

/// One entry of a resource field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name in the desired state
    pub source: &'static str,
    /// Field name in the remote request body
    pub remote: &'static str,
    /// Transform applied to the value
    pub transform: FieldTransform,
}

impl FieldMapping {
    /// A mapping that copies the value as-is.
    #[must_use]
    pub const fn identity(source: &'static str, remote: &'static str) -> Self {
        Self {
            source,
            remote,
            transform: FieldTransform::Identity,
        }
    }

    /// A mapping that nests the value under `remote.key`.
    #[must_use]
    pub const fn nested(source: &'static str, remote: &'static str, key: &'static str) -> Self {
        Self {
            source,
            remote,
            transform: FieldTransform::Nest { key },
        }
    }
}

/// Where the remote identity of a freshly created resource comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// `results.id` of the create response
    RemoteId,
    /// The value of a desired-state field (the remote API issues no id)
    Field(&'static str),
}

/// Resource descriptor: everything that differs between resource kinds.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    /// Remote endpoint path segment, relative to the API base URL
    pub endpoint: &'static str,
    /// Fields that must be present in desired state
    pub required_fields: &'static [&'static str],
    /// Fields whose change forces destroy+recreate
    pub replace_trigger_fields: &'static [&'static str],
    /// Ordered desired-state to request-body mapping
    pub field_map: &'static [FieldMapping],
    pub identity: IdentitySource,
    /// Whether the remote API has an update endpoint for this kind
    pub supports_update: bool,
}

/// Descriptor for inbound domains.
///
/// The remote API has no update endpoint and no generated identifier, so the
/// domain itself is the identity and any domain change is a replace.
pub static INBOUND_DOMAIN_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::InboundDomain,
    endpoint: INBOUND_DOMAINS_PATH,
    required_fields: &[FIELD_DOMAIN],
    replace_trigger_fields: &[FIELD_DOMAIN],
    field_map: &[FieldMapping::identity(FIELD_DOMAIN, "domain")],
    identity: IdentitySource::Field(FIELD_DOMAIN),
    supports_update: false,
};

/// Descriptor for relay webhooks.
pub static RELAY_WEBHOOK_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::RelayWebhook,
    endpoint: RELAY_WEBHOOKS_PATH,
    required_fields: &[FIELD_DOMAIN, FIELD_TARGET],
    replace_trigger_fields: &[],
    field_map: &[
        FieldMapping::identity(FIELD_NAME, "name"),
        FieldMapping::identity(FIELD_TARGET, "target"),
        FieldMapping::nested(FIELD_DOMAIN, "match", "domain"),
        FieldMapping::identity(FIELD_AUTH_TOKEN, "auth_token"),
        FieldMapping::identity(FIELD_AUTH_TYPE, "auth_type"),
        FieldMapping::identity(FIELD_AUTH_REQUEST_DETAILS, "auth_request_details"),
        FieldMapping::identity(FIELD_CUSTOM_HEADERS, "custom_headers"),
    ],
    identity: IdentitySource::RemoteId,
    supports_update: true,
};

/// Descriptor for event webhooks.
pub static WEBHOOK_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Webhook,
    endpoint: WEBHOOKS_PATH,
    required_fields: &[FIELD_NAME, FIELD_TARGET, FIELD_EVENTS],
    replace_trigger_fields: &[],
    field_map: &[
        FieldMapping::identity(FIELD_NAME, "name"),
        FieldMapping::identity(FIELD_TARGET, "target"),
        FieldMapping::identity(FIELD_EVENTS, "events"),
        FieldMapping::identity(FIELD_ACTIVE, "active"),
        FieldMapping::identity(FIELD_CUSTOM_HEADERS, "custom_headers"),
        FieldMapping::identity(FIELD_AUTH_TYPE, "auth_type"),
        FieldMapping::identity(FIELD_AUTH_REQUEST_DETAILS, "auth_request_details"),
        FieldMapping::identity(FIELD_AUTH_CREDENTIALS, "auth_credentials"),
    ],
    identity: IdentitySource::RemoteId,
    supports_update: true,
};

/// Look up a field in a desired state, treating `null` as absent.
#[must_use]
pub fn field_value<'a>(state: &'a DesiredState, field: &str) -> Option<&'a Value> {
    state.get(field).filter(|value| !value.is_null())
}
