// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Patch builder: desired state to sparse remote request body.
//!
//! The schema field map is walked in declaration order. Fields absent from
//! the desired state (or set to `null`) are left out of the body entirely,
//! never sent as `null` or empty values, so a partial update only touches the
//! fields the caller actually set.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sparkpost_provider::patch::build_patch;
//! use sparkpost_provider::schema::ResourceKind;
//!
//! let desired = json!({"target": "https://hooks.example.com", "domain": "in.example.com"});
//! let patch = build_patch(ResourceKind::RelayWebhook.schema(), desired.as_object().unwrap());
//!
//! assert_eq!(
//!     serde_json::Value::Object(patch),
//!     json!({"target": "https://hooks.example.com", "match": {"domain": "in.example.com"}})
//! );
//! ```

use crate::schema::{field_value, DesiredState, FieldTransform, ResourceSchema};
use serde_json::{Map, Value};

/// Build the remote request body for `desired`.
#[must_use]
pub fn build_patch(schema: &ResourceSchema, desired: &DesiredState) -> Map<String, Value> {
    let mut body = Map::new();

    for mapping in schema.field_map {
        let Some(value) = field_value(desired, mapping.source) else {
            continue;
        };

        match mapping.transform {
            FieldTransform::Identity => {
                body.insert(mapping.remote.to_string(), value.clone());
            }
            FieldTransform::Nest { key } => {
                let slot = body
                    .entry(mapping.remote)
                    .or_insert_with(|| Value::Object(Map::new()));
                match slot {
                    Value::Object(inner) => {
                        inner.insert(key.to_string(), value.clone());
                    }
                    other => {
                        let mut inner = Map::new();
                        inner.insert(key.to_string(), value.clone());
                        *other = Value::Object(inner);
                    }
                }
            }
        }
    }

    body
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod patch_tests;
