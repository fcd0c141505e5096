// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validation stage: required-field checks on a proposed desired state.
//!
//! Validation runs before any remote call. It never fails outright; instead
//! it returns the desired state untouched together with one [`CheckFailure`]
//! per missing required field, in schema order.

use crate::errors::{CheckFailure, ProviderError};
use crate::schema::{field_value, DesiredState, ResourceSchema};
use serde::Serialize;
use tracing::debug;

/// Outcome of validating a desired state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// The desired state, unmodified
    pub inputs: DesiredState,
    /// Ordered failure records; empty means proceed
    pub failures: Vec<CheckFailure>,
}

impl CheckResult {
    /// `true` when no check failed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into the validated inputs, or a [`ProviderError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Validation`] when any check failed.
    pub fn into_result(self, schema: &ResourceSchema) -> Result<DesiredState, ProviderError> {
        if self.failures.is_empty() {
            Ok(self.inputs)
        } else {
            Err(ProviderError::Validation {
                kind: schema.kind,
                failures: self.failures,
            })
        }
    }
}

/// Validate `desired` against the required fields of `schema`.
///
/// A field set to JSON `null` counts as missing.
#[must_use]
pub fn validate(schema: &ResourceSchema, desired: DesiredState) -> CheckResult {
    let failures: Vec<CheckFailure> = schema
        .required_fields
        .iter()
        .filter(|field| field_value(&desired, field).is_none())
        .map(|field| CheckFailure::missing(field))
        .collect();

    debug!(
        kind = %schema.kind,
        failures = failures.len(),
        "Validated desired state"
    );

    CheckResult {
        inputs: desired,
        failures,
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
