// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Replace-decision stage.
//!
//! Decides whether a change between two desired states can be applied in
//! place or requires destroying the remote object and creating a new one.
//! Only fields listed in the schema's `replace_trigger_fields` can force a
//! replace; kinds with no trigger fields are always updated in place.

use crate::constants::FIELD_ID;
use crate::schema::{field_value, DesiredState, ResourceSchema};
use serde::Serialize;
use std::collections::BTreeSet;

/// Full diff between a previous and a proposed desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Fields whose change forces destroy+recreate, sorted
    pub replaces: Vec<String>,
    /// Every field whose value differs between the two states, sorted
    pub changed_fields: Vec<String>,
    /// The old remote object must be deleted before the new one is created
    pub delete_before_replace: bool,
}

impl DiffResult {
    /// `true` when any field changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed_fields.is_empty()
    }

    /// `true` when the change can only be applied by replacement.
    #[must_use]
    pub fn requires_replace(&self) -> bool {
        !self.replaces.is_empty()
    }
}

/// Return the replace-trigger fields whose value differs between `previous`
/// and `proposed`. A field set on one side only counts as a difference.
#[must_use]
pub fn decide_replace(
    schema: &ResourceSchema,
    previous: &DesiredState,
    proposed: &DesiredState,
) -> BTreeSet<&'static str> {
    schema
        .replace_trigger_fields
        .iter()
        .copied()
        .filter(|field| field_value(previous, field) != field_value(proposed, field))
        .collect()
}

/// Every field, other than the output `id`, whose present value differs.
#[must_use]
pub fn changed_fields(previous: &DesiredState, proposed: &DesiredState) -> BTreeSet<String> {
    previous
        .keys()
        .chain(proposed.keys())
        .filter(|field| field.as_str() != FIELD_ID)
        .filter(|field| field_value(previous, field) != field_value(proposed, field))
        .cloned()
        .collect()
}

/// Compute the full [`DiffResult`].
#[must_use]
pub fn diff(schema: &ResourceSchema, previous: &DesiredState, proposed: &DesiredState) -> DiffResult {
    let replaces: Vec<String> = decide_replace(schema, previous, proposed)
        .into_iter()
        .map(str::to_string)
        .collect();
    let delete_before_replace = !replaces.is_empty();

    DiffResult {
        replaces,
        changed_fields: changed_fields(previous, proposed).into_iter().collect(),
        delete_before_replace,
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod diff_tests;
