// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # sparkpost-provider - Declarative SparkPost resource controllers
//!
//! This crate implements the resource controller protocol an
//! infrastructure-as-code orchestrator uses to manage SparkPost mail-relay
//! objects: inbound domains, relay webhooks and event webhooks.
//!
//! ## Overview
//!
//! For every resource kind the crate provides:
//!
//! - **Validation** of a proposed desired state (required fields)
//! - **Replace decision** between two desired states (update in place, or destroy then create)
//! - **Patch building** from a partial desired state into a sparse remote request body
//! - **Remote operations** (create, update, delete, read) against the SparkPost REST API
//!
//! All three kinds share a single schema-driven [`controller::ResourceController`].
//!
//! ## Modules
//!
//! - [`schema`] - Resource descriptors and the three built-in schemas
//! - [`args`] - Typed argument structs for each kind
//! - [`validation`] - Validation stage
//! - [`diff`] - Replace-decision stage
//! - [`patch`] - Patch builder
//! - [`client`] - Remote service boundary and HTTP client
//! - [`controller`] - Generic resource controller
//! - [`provider`] - Orchestrator-facing dispatcher
//! - [`config`] - Process-wide configuration
//! - [`errors`] - Error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use sparkpost_provider::schema::ResourceKind;
//! use sparkpost_provider::controller::ResourceController;
//!
//! let controller = ResourceController::for_kind(ResourceKind::InboundDomain);
//!
//! let previous = json!({"domain": "a.example.com"}).as_object().cloned().unwrap();
//! let proposed = json!({"domain": "b.example.com"}).as_object().cloned().unwrap();
//!
//! let replaces = controller.decide_replace(&previous, &proposed);
//! assert!(replaces.contains("domain"));
//! ```

pub mod args;
pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod diff;
pub mod errors;
pub mod http_errors;
pub mod metrics;
pub mod patch;
pub mod provider;
pub mod schema;
pub mod validation;
