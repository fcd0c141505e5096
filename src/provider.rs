// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Orchestrator-facing entry points.
//!
//! [`Provider`] dispatches each lifecycle call to the [`ResourceController`]
//! for the requested kind. It holds nothing but the immutable configuration:
//! every remote operation builds its own [`SparkPostClient`], so any number of
//! operations on any kinds can be in flight at once without sharing state.
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use sparkpost_provider::config::ProviderConfig;
//! use sparkpost_provider::provider::Provider;
//! use sparkpost_provider::schema::ResourceKind;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), sparkpost_provider::errors::ProviderError> {
//! let provider = Provider::new(Arc::new(ProviderConfig::from_env()?));
//!
//! let desired = json!({
//!     "name": "deliveries",
//!     "target": "https://hooks.example.com/sparkpost",
//!     "events": ["delivery"],
//! });
//! let desired = desired.as_object().cloned().unwrap_or_default();
//!
//! let check = provider.check(ResourceKind::Webhook, desired);
//! if check.is_ok() {
//!     let created = provider.create(ResourceKind::Webhook, &check.inputs).await?;
//!     provider.delete(ResourceKind::Webhook, &created.id).await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::client::SparkPostClient;
use crate::config::{self, ProviderConfig};
use crate::constants::{OP_CHECK, OP_CREATE, OP_DELETE, OP_DIFF, OP_READ, OP_UPDATE};
use crate::controller::{CreateResult, ResourceController};
use crate::diff::DiffResult;
use crate::errors::ProviderError;
use crate::metrics;
use crate::schema::{DesiredState, ResourceKind};
use crate::validation::CheckResult;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Lifecycle dispatcher for all SparkPost resource kinds.
#[derive(Debug, Clone)]
pub struct Provider {
    config: Arc<ProviderConfig>,
}

impl Provider {
    /// Provider backed by `config`.
    #[must_use]
    pub fn new(config: Arc<ProviderConfig>) -> Self {
        Self { config }
    }

    /// Provider backed by the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if [`config::init_config`] has not run.
    pub fn from_global_config() -> Result<Self, ProviderError> {
        Ok(Self::new(config::config()?))
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn client(&self) -> Result<SparkPostClient, ProviderError> {
        SparkPostClient::new(&self.config)
    }

    /// Validate a proposed desired state. Never fails; see [`CheckResult`].
    #[must_use]
    pub fn check(&self, kind: ResourceKind, desired: DesiredState) -> CheckResult {
        let result = ResourceController::for_kind(kind).validate(desired);
        if result.is_ok() {
            metrics::OPERATIONS_TOTAL
                .with_label_values(&[kind.as_str(), OP_CHECK, "success"])
                .inc();
        } else {
            warn!(
                kind = %kind,
                failures = ?result.failures,
                "Desired state failed validation"
            );
            metrics::OPERATIONS_TOTAL
                .with_label_values(&[kind.as_str(), OP_CHECK, "error"])
                .inc();
            metrics::record_validation_failures(kind.as_str(), result.failures.len());
        }
        result
    }

    /// Decide how a change between two desired states must be applied.
    #[must_use]
    pub fn diff(
        &self,
        kind: ResourceKind,
        previous: &DesiredState,
        proposed: &DesiredState,
    ) -> DiffResult {
        let result = ResourceController::for_kind(kind).diff(previous, proposed);
        debug!(
            kind = %kind,
            replaces = ?result.replaces,
            changed = ?result.changed_fields,
            "Computed diff"
        );
        metrics::OPERATIONS_TOTAL
            .with_label_values(&[kind.as_str(), OP_DIFF, "success"])
            .inc();
        result
    }

    /// Create the remote object for a validated desired state.
    ///
    /// # Errors
    ///
    /// See [`ResourceController::create`].
    pub async fn create(
        &self,
        kind: ResourceKind,
        desired: &DesiredState,
    ) -> Result<CreateResult, ProviderError> {
        let start = Instant::now();
        let result = async {
            let client = self.client()?;
            ResourceController::for_kind(kind)
                .create(&client, desired)
                .await
        }
        .await;

        if result.is_ok() {
            metrics::record_resource_created(kind.as_str());
        }
        observe(kind, OP_CREATE, start, result)
    }

    /// Update the remote object addressed by `identity` in place.
    ///
    /// # Errors
    ///
    /// See [`ResourceController::update`].
    pub async fn update(
        &self,
        kind: ResourceKind,
        identity: &str,
        previous: &DesiredState,
        proposed: &DesiredState,
    ) -> Result<DesiredState, ProviderError> {
        let start = Instant::now();
        let result = async {
            let client = self.client()?;
            ResourceController::for_kind(kind)
                .update(&client, identity, previous, proposed)
                .await
        }
        .await;

        if result.is_ok() {
            metrics::record_resource_updated(kind.as_str());
        }
        observe(kind, OP_UPDATE, start, result)
    }

    /// Delete the remote object addressed by `identity`.
    ///
    /// # Errors
    ///
    /// See [`ResourceController::delete`].
    pub async fn delete(&self, kind: ResourceKind, identity: &str) -> Result<(), ProviderError> {
        let start = Instant::now();
        let result = async {
            let client = self.client()?;
            ResourceController::for_kind(kind)
                .delete(&client, identity)
                .await
        }
        .await;

        if result.is_ok() {
            metrics::record_resource_deleted(kind.as_str());
        }
        observe(kind, OP_DELETE, start, result)
    }

    /// Read the current remote attributes of `identity`.
    ///
    /// # Errors
    ///
    /// See [`ResourceController::read`].
    pub async fn read(
        &self,
        kind: ResourceKind,
        identity: &str,
    ) -> Result<DesiredState, ProviderError> {
        let start = Instant::now();
        let result = async {
            let client = self.client()?;
            ResourceController::for_kind(kind)
                .read(&client, identity)
                .await
        }
        .await;
        observe(kind, OP_READ, start, result)
    }
}

fn observe<T>(
    kind: ResourceKind,
    operation: &'static str,
    start: Instant,
    result: Result<T, ProviderError>,
) -> Result<T, ProviderError> {
    match &result {
        Ok(_) => metrics::record_operation_success(kind.as_str(), operation, start.elapsed()),
        Err(e) => {
            error!(
                kind = %kind,
                operation = operation,
                error_type = e.error_type(),
                error = %e,
                "Lifecycle operation failed"
            );
            metrics::record_operation_error(
                kind.as_str(),
                operation,
                e.error_type(),
                start.elapsed(),
            );
        }
    }
    result
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
