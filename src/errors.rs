// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the SparkPost provider.
//!
//! This module provides the error taxonomy surfaced to the orchestrator:
//! - Validation failures (required fields missing, no remote call made)
//! - Remote service errors (SparkPost rejected or failed a call)
//! - Unsupported operations (update requested for a kind without an update endpoint)
//! - Transport failures (no usable HTTP response)
//! - Configuration errors (fatal at startup)
//!
//! Every variant propagates unchanged; nothing here is retried.

use crate::schema::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One failed validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    /// Desired-state field that failed the check
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl CheckFailure {
    /// Failure record for a required field that is absent.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: format!("required property '{field}' missing"),
        }
    }
}

/// Errors surfaced by the lifecycle operations.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// One or more required fields are missing from the desired state.
    ///
    /// Recoverable by correcting the desired state; no remote call was attempted.
    #[error("{kind} desired state is invalid: {}", describe_failures(.failures))]
    Validation {
        /// Resource kind being validated
        kind: ResourceKind,
        /// Ordered failure records
        failures: Vec<CheckFailure>,
    },

    /// SparkPost rejected or failed a create/update/delete/get call.
    ///
    /// `errors` holds the remote-reported error list exactly as returned.
    #[error("SparkPost {operation} of {kind} failed with HTTP {status} ({reason}): {errors}")]
    RemoteService {
        /// Resource kind being operated on
        kind: ResourceKind,
        /// Lifecycle operation (`create`, `update`, `delete`, `read`)
        operation: &'static str,
        /// HTTP status of the remote response
        status: u16,
        /// Stable reason derived from the status code
        reason: &'static str,
        /// Remote-reported error payload, verbatim
        errors: Value,
    },

    /// The requested operation does not exist for this resource kind.
    ///
    /// Indicates a caller bug (the replace decision should have been honoured).
    #[error("{operation} is not supported for {kind}; changes must be applied by replacement")]
    UnsupportedOperation {
        /// Resource kind
        kind: ResourceKind,
        /// Requested operation
        operation: &'static str,
    },

    /// The remote call produced no usable HTTP response.
    #[error("SparkPost {operation} of {kind} failed before a response was received ({reason}): {message}")]
    Transport {
        /// Resource kind being operated on
        kind: ResourceKind,
        /// Lifecycle operation
        operation: &'static str,
        /// Stable reason for the failure
        reason: &'static str,
        /// Underlying error text
        message: String,
    },

    /// Provider configuration is missing or malformed.
    #[error("Provider configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Short category label used in metrics.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::Validation { .. } => "validation",
            ProviderError::RemoteService { .. } => "remote_service",
            ProviderError::UnsupportedOperation { .. } => "unsupported_operation",
            ProviderError::Transport { .. } => "transport",
            ProviderError::Config(_) => "config",
        }
    }

    /// `true` when SparkPost answered with a non-success status.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, ProviderError::RemoteService { .. })
    }

    /// The remote-reported payload, if this error came from SparkPost.
    #[must_use]
    pub fn remote_errors(&self) -> Option<&Value> {
        match self {
            ProviderError::RemoteService { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

fn describe_failures(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(|f| f.reason.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
