// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic resource controller.
//!
//! One [`ResourceController`] implementation serves every resource kind; the
//! kinds differ only in their [`ResourceSchema`]. The controller is stateless:
//! it borrows a static schema and is handed the remote client for each call.
//!
//! # Lifecycle
//!
//! ```text
//! validate ──► decide_replace (on update) ──► build_patch ──► create | update | delete
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use sparkpost_provider::client::SparkPostClient;
//! use sparkpost_provider::config::ProviderConfig;
//! use sparkpost_provider::controller::ResourceController;
//! use sparkpost_provider::schema::ResourceKind;
//!
//! # async fn example() -> Result<(), sparkpost_provider::errors::ProviderError> {
//! let client = SparkPostClient::new(&ProviderConfig::new("api-key")?)?;
//! let controller = ResourceController::for_kind(ResourceKind::InboundDomain);
//!
//! let desired = json!({"domain": "mail.example.com"}).as_object().cloned().unwrap_or_default();
//! let inputs = controller.validate(desired).into_result(controller.schema())?;
//! let created = controller.create(&client, &inputs).await?;
//! assert_eq!(created.id, "mail.example.com");
//! # Ok(())
//! # }
//! ```

use crate::client::{body_fields, RemoteApi};
use crate::constants::{FIELD_ID, OP_CREATE, OP_UPDATE};
use crate::diff::{self, DiffResult};
use crate::errors::{CheckFailure, ProviderError};
use crate::http_errors::REASON_MISSING_IDENTITY;
use crate::patch;
use crate::schema::{field_value, DesiredState, IdentitySource, ResourceKind, ResourceSchema};
use crate::validation::{self, CheckResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateResult {
    /// Remote identity, immutable for the lifetime of the resource
    pub id: String,
    /// Normalized output attributes, including `id`
    pub outputs: DesiredState,
}

/// Schema-driven lifecycle controller for one resource kind.
#[derive(Debug, Clone, Copy)]
pub struct ResourceController {
    schema: &'static ResourceSchema,
}

impl ResourceController {
    /// Controller driven by `schema`.
    #[must_use]
    pub const fn new(schema: &'static ResourceSchema) -> Self {
        Self { schema }
    }

    /// Controller for one of the built-in resource kinds.
    #[must_use]
    pub fn for_kind(kind: ResourceKind) -> Self {
        Self::new(kind.schema())
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.schema.kind
    }

    #[must_use]
    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Validation stage. See [`validation::validate`].
    #[must_use]
    pub fn validate(&self, desired: DesiredState) -> CheckResult {
        validation::validate(self.schema, desired)
    }

    /// Replace-decision stage. See [`diff::decide_replace`].
    #[must_use]
    pub fn decide_replace(
        &self,
        previous: &DesiredState,
        proposed: &DesiredState,
    ) -> BTreeSet<&'static str> {
        diff::decide_replace(self.schema, previous, proposed)
    }

    /// Full diff including changed fields. See [`diff::diff`].
    #[must_use]
    pub fn diff(&self, previous: &DesiredState, proposed: &DesiredState) -> DiffResult {
        diff::diff(self.schema, previous, proposed)
    }

    /// Patch builder. See [`patch::build_patch`].
    #[must_use]
    pub fn build_patch(&self, desired: &DesiredState) -> Value {
        Value::Object(patch::build_patch(self.schema, desired))
    }

    /// Create the remote object for an already validated desired state.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Validation`] if the identity field of a kind whose
    ///   identity comes from desired state is missing (no remote call is made)
    /// - [`ProviderError::RemoteService`] if SparkPost rejects the call, or a
    ///   kind whose identity is issued remotely gets no `results.id` back
    /// - [`ProviderError::Transport`] if no response was received
    pub async fn create(
        &self,
        remote: &dyn RemoteApi,
        desired: &DesiredState,
    ) -> Result<CreateResult, ProviderError> {
        let kind = self.kind();

        // Identity derived from desired state is resolved before anything is sent
        let local_id = match self.schema.identity {
            IdentitySource::Field(field) => Some(identity_from_field(self.schema, desired, field)?),
            IdentitySource::RemoteId => None,
        };

        let body = self.build_patch(desired);
        debug!(
            kind = %kind,
            fields = ?body_fields(&body),
            "Built create request body"
        );

        let response = remote.create(kind, &body).await?;

        let id = match local_id {
            Some(id) => id,
            None => response
                .result_id()
                .ok_or_else(|| ProviderError::RemoteService {
                    kind,
                    operation: OP_CREATE,
                    status: response.status,
                    reason: REASON_MISSING_IDENTITY,
                    errors: response.body.clone(),
                })?,
        };

        info!(kind = %kind, identity = %id, "Created remote resource");

        Ok(CreateResult {
            outputs: outputs_with_id(desired.clone(), &id),
            id,
        })
    }

    /// Update the remote object addressed by `identity` in place.
    ///
    /// The request body is built from `proposed` alone; SparkPost keeps any
    /// field the body leaves out. The returned outputs are `previous`
    /// overlaid with the fields present in `proposed`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::UnsupportedOperation`] for kinds without an update
    ///   endpoint (no remote call is made)
    /// - [`ProviderError::RemoteService`] / [`ProviderError::Transport`] as for create
    pub async fn update(
        &self,
        remote: &dyn RemoteApi,
        identity: &str,
        previous: &DesiredState,
        proposed: &DesiredState,
    ) -> Result<DesiredState, ProviderError> {
        let kind = self.kind();
        if !self.schema.supports_update {
            return Err(ProviderError::UnsupportedOperation {
                kind,
                operation: OP_UPDATE,
            });
        }

        let body = self.build_patch(proposed);
        debug!(
            kind = %kind,
            identity = %identity,
            fields = ?body_fields(&body),
            "Built update request body"
        );

        let response = remote.update(kind, identity, &body).await?;

        if let Some(returned) = response.result_id() {
            if returned != identity {
                warn!(
                    kind = %kind,
                    identity = %identity,
                    returned = %returned,
                    "SparkPost returned a different id on update; keeping the original identity"
                );
            }
        }

        info!(kind = %kind, identity = %identity, "Updated remote resource");

        let mut outputs = previous.clone();
        for (field, value) in proposed {
            if !value.is_null() {
                outputs.insert(field.clone(), value.clone());
            }
        }
        Ok(outputs_with_id(outputs, identity))
    }

    /// Delete the remote object addressed by `identity`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::RemoteService`] / [`ProviderError::Transport`] on failure.
    /// A 404 is reported like any other remote error; the orchestrator decides
    /// whether an already-absent object blocks retirement.
    pub async fn delete(&self, remote: &dyn RemoteApi, identity: &str) -> Result<(), ProviderError> {
        let kind = self.kind();
        remote.delete(kind, identity).await?;
        info!(kind = %kind, identity = %identity, "Deleted remote resource");
        Ok(())
    }

    /// Fetch the current remote attributes of `identity`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::RemoteService`] / [`ProviderError::Transport`] on failure.
    pub async fn read(
        &self,
        remote: &dyn RemoteApi,
        identity: &str,
    ) -> Result<DesiredState, ProviderError> {
        let response = remote.get(self.kind(), identity).await?;
        let attributes = match response.results() {
            Some(Value::Object(results)) => results.clone(),
            _ => DesiredState::new(),
        };
        Ok(outputs_with_id(attributes, identity))
    }
}

fn identity_from_field(
    schema: &ResourceSchema,
    desired: &DesiredState,
    field: &str,
) -> Result<String, ProviderError> {
    match field_value(desired, field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(ProviderError::Validation {
            kind: schema.kind,
            failures: vec![CheckFailure::missing(field)],
        }),
    }
}

/// Drop `null` fields and stamp the identity.
fn outputs_with_id(mut outputs: DesiredState, id: &str) -> DesiredState {
    outputs.retain(|_, value| !value.is_null());
    outputs.insert(FIELD_ID.to_string(), Value::String(id.to_string()));
    outputs
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
