// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SparkPost REST API client.
//!
//! This module contains the remote service boundary: the [`RemoteApi`] trait
//! the controllers talk to, and [`SparkPostClient`], its `reqwest`-backed
//! implementation.
//!
//! # Remote API shape
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST {base}/{endpoint}` |
//! | update | `PUT {base}/{endpoint}/{id}` |
//! | delete | `DELETE {base}/{endpoint}/{id}` |
//! | get | `GET {base}/{endpoint}/{id}` |
//!
//! Success bodies look like `{"results": {...}}`; error bodies look like
//! `{"errors": [...]}`. Error payloads are carried verbatim into
//! [`ProviderError::RemoteService`]. No request is ever retried here.

use crate::config::ProviderConfig;
use crate::constants::{FIELD_ID, OP_CREATE, OP_DELETE, OP_READ, OP_UPDATE, USER_AGENT};
use crate::errors::ProviderError;
use crate::http_errors::{map_http_error_to_reason, map_transport_error};
use crate::schema::ResourceKind;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use std::time::Instant;
use tracing::{error, info};
use url::Url;

/// A decoded response from the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body (`Value::Null` for an empty body)
    pub body: Value,
}

impl RemoteResponse {
    /// The `results` object of the body, if any.
    #[must_use]
    pub fn results(&self) -> Option<&Value> {
        self.body.get("results")
    }

    /// `results.id` as a string. Numeric ids are rendered in decimal.
    #[must_use]
    pub fn result_id(&self) -> Option<String> {
        match self.results()?.get(FIELD_ID)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Per-kind create/update/delete/get operations against the remote service.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Create a remote object from `body`.
    async fn create(&self, kind: ResourceKind, body: &Value)
        -> Result<RemoteResponse, ProviderError>;

    /// Update the remote object addressed by `id` with `body`.
    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &Value,
    ) -> Result<RemoteResponse, ProviderError>;

    /// Delete the remote object addressed by `id`.
    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<RemoteResponse, ProviderError>;

    /// Fetch the remote object addressed by `id`.
    async fn get(&self, kind: ResourceKind, id: &str) -> Result<RemoteResponse, ProviderError>;
}

/// HTTP client for the SparkPost REST API.
///
/// Built fresh for every lifecycle operation from the immutable
/// [`ProviderConfig`]; holds no state between operations.
#[derive(Clone)]
pub struct SparkPostClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for SparkPostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparkPostClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SparkPostClient {
    /// Create a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the base URL is not a valid
    /// absolute URL or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for `kind`, optionally addressed to a single object.
    ///
    /// The identity is pushed as one percent-encoded path segment, so ids
    /// containing `/` or spaces cannot escape the endpoint.
    pub(crate) fn endpoint_url(&self, kind: ResourceKind, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url guarantees a hierarchical URL, so path_segments_mut succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind.schema().endpoint);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Send one request and decode the response.
    async fn send(
        &self,
        kind: ResourceKind,
        operation: &'static str,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<RemoteResponse, ProviderError> {
        let start = Instant::now();

        info!(
            kind = %kind,
            operation = operation,
            method = %method,
            url = %url,
            fields = ?body.map(body_fields),
            "HTTP API request to SparkPost"
        );

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(kind, operation, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(kind, operation, &e))?;

        if !status.is_success() {
            let (reason, message) = map_http_error_to_reason(status.as_u16());
            error!(
                kind = %kind,
                operation = operation,
                method = %method,
                url = %url,
                status = %status,
                reason = reason,
                error = %text,
                "{message}"
            );
            return Err(ProviderError::RemoteService {
                kind,
                operation,
                status: status.as_u16(),
                reason,
                errors: error_payload(&text),
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ProviderError::Transport {
                kind,
                operation,
                reason: crate::http_errors::REASON_INVALID_RESPONSE,
                message: format!("Response body is not valid JSON: {e}"),
            })?
        };

        info!(
            kind = %kind,
            operation = operation,
            method = %method,
            url = %url,
            status = %status,
            elapsed = ?start.elapsed(),
            "HTTP API request successful"
        );

        Ok(RemoteResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RemoteApi for SparkPostClient {
    async fn create(
        &self,
        kind: ResourceKind,
        body: &Value,
    ) -> Result<RemoteResponse, ProviderError> {
        let url = self.endpoint_url(kind, None);
        self.send(kind, OP_CREATE, Method::POST, url, Some(body))
            .await
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &Value,
    ) -> Result<RemoteResponse, ProviderError> {
        let url = self.endpoint_url(kind, Some(id));
        self.send(kind, OP_UPDATE, Method::PUT, url, Some(body))
            .await
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<RemoteResponse, ProviderError> {
        let url = self.endpoint_url(kind, Some(id));
        self.send(kind, OP_DELETE, Method::DELETE, url, None).await
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<RemoteResponse, ProviderError> {
        let url = self.endpoint_url(kind, Some(id));
        self.send(kind, OP_READ, Method::GET, url, None).await
    }
}

/// Top-level field names of a request body.
///
/// Bodies carry webhook credentials, so only the names are ever logged.
pub(crate) fn body_fields(body: &Value) -> Vec<&str> {
    body.as_object()
        .map(|fields| fields.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Parse and sanity-check the configured API base URL.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ProviderError::Config(format!("Invalid API base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ProviderError::Config(format!(
            "API base URL '{raw}' must be an http(s) URL"
        )));
    }
    Ok(url)
}

/// Extract the remote-reported error payload from an error response body.
///
/// Returns the `errors` member when the body is a JSON object carrying one,
/// the whole JSON body otherwise, and the raw text as a JSON string when the
/// body is not JSON at all.
pub(crate) fn error_payload(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(mut body)) => match body.remove("errors") {
            Some(errors) => errors,
            None => Value::Object(body),
        },
        Ok(other) => other,
        Err(_) => Value::String(text.to_string()),
    }
}

fn transport_error(
    kind: ResourceKind,
    operation: &'static str,
    err: &reqwest::Error,
) -> ProviderError {
    let reason = map_transport_error(err);
    error!(
        kind = %kind,
        operation = operation,
        reason = reason,
        error = %err,
        "HTTP request to SparkPost failed"
    );
    ProviderError::Transport {
        kind,
        operation,
        reason,
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
