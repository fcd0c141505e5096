// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the SparkPost provider.
//!
//! All metrics carry the namespace prefix `sparkpost_provider_`.
//!
//! # Metrics Categories
//!
//! - **Operation Metrics** - Every lifecycle operation and its outcome
//! - **Resource Lifecycle Metrics** - Remote objects created, updated, deleted
//! - **Error Metrics** - Errors by kind and category
//!
//! # Example
//!
//! ```rust,no_run
//! use sparkpost_provider::metrics::record_operation_success;
//!
//! record_operation_success("Webhook", "create", std::time::Duration::from_millis(120));
//! ```

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all provider metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "sparkpost_provider";

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Operation Metrics
// ============================================================================

/// Total number of lifecycle operations by resource type, operation and status
///
/// Labels:
/// - `resource_type`: Kind of resource (e.g., `InboundDomain`, `Webhook`)
/// - `operation`: `check`, `diff`, `create`, `update`, `delete`, `read`
/// - `status`: Outcome (`success`, `error`)
pub static OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_operations_total"),
        "Total number of lifecycle operations by resource type, operation and status",
    );
    let counter = CounterVec::new(opts, &["resource_type", "operation", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of remote lifecycle operations in seconds
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `operation`: Lifecycle operation
pub static OPERATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_operation_duration_seconds"),
        "Duration of lifecycle operations in seconds by resource type and operation",
    )
    .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]);
    let histogram = HistogramVec::new(opts, &["resource_type", "operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of validation failures (one per failed field)
///
/// Labels:
/// - `resource_type`: Kind of resource
pub static VALIDATION_FAILURES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_validation_failures_total"),
        "Total number of failed required-field checks by resource type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Resource Lifecycle Metrics
// ============================================================================

/// Total number of remote objects created
pub static RESOURCES_CREATED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_resources_created_total"),
        "Total number of remote objects created by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of remote objects updated in place
pub static RESOURCES_UPDATED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_resources_updated_total"),
        "Total number of remote objects updated by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of remote objects deleted
pub static RESOURCES_DELETED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_resources_deleted_total"),
        "Total number of remote objects deleted by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of errors by resource type and error category
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `error_type`: `validation`, `remote_service`, `unsupported_operation`,
///   `transport`, `config`
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by resource type and error category",
    );
    let counter = CounterVec::new(opts, &["resource_type", "error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful lifecycle operation
///
/// # Arguments
/// * `resource_type` - The kind of resource (e.g., `Webhook`)
/// * `operation` - The lifecycle operation (e.g., `create`)
/// * `duration` - Duration of the operation
pub fn record_operation_success(resource_type: &str, operation: &str, duration: Duration) {
    OPERATIONS_TOTAL
        .with_label_values(&[resource_type, operation, "success"])
        .inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[resource_type, operation])
        .observe(duration.as_secs_f64());
}

/// Record a failed lifecycle operation
///
/// # Arguments
/// * `resource_type` - The kind of resource
/// * `operation` - The lifecycle operation
/// * `error_type` - Category of error (see [`crate::errors::ProviderError::error_type`])
/// * `duration` - Duration of the operation before failure
pub fn record_operation_error(
    resource_type: &str,
    operation: &str,
    error_type: &str,
    duration: Duration,
) {
    OPERATIONS_TOTAL
        .with_label_values(&[resource_type, operation, "error"])
        .inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[resource_type, operation])
        .observe(duration.as_secs_f64());
    ERRORS_TOTAL
        .with_label_values(&[resource_type, error_type])
        .inc();
}

/// Record failed required-field checks
pub fn record_validation_failures(resource_type: &str, count: usize) {
    if count > 0 {
        #[allow(clippy::cast_precision_loss)]
        VALIDATION_FAILURES_TOTAL
            .with_label_values(&[resource_type])
            .inc_by(count as f64);
    }
}

/// Record resource creation
pub fn record_resource_created(resource_type: &str) {
    RESOURCES_CREATED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
}

/// Record resource update
pub fn record_resource_updated(resource_type: &str) {
    RESOURCES_UPDATED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
}

/// Record resource deletion
pub fn record_resource_deleted(resource_type: &str) {
    RESOURCES_DELETED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation_success() {
        let resource_type = "TestResource";
        record_operation_success(resource_type, "create", Duration::from_millis(500));

        let counter = OPERATIONS_TOTAL.with_label_values(&[resource_type, "create", "success"]);
        assert!(counter.get() > 0.0);

        let histogram = OPERATION_DURATION_SECONDS.with_label_values(&[resource_type, "create"]);
        assert!(histogram.get_sample_count() > 0);
    }

    #[test]
    fn test_record_operation_error() {
        let resource_type = "TestResourceError";
        record_operation_error(
            resource_type,
            "delete",
            "remote_service",
            Duration::from_millis(250),
        );

        let counter = OPERATIONS_TOTAL.with_label_values(&[resource_type, "delete", "error"]);
        assert!(counter.get() > 0.0);

        let errors = ERRORS_TOTAL.with_label_values(&[resource_type, "remote_service"]);
        assert!(errors.get() > 0.0);
    }

    #[test]
    fn test_record_validation_failures_counts_each_field() {
        let resource_type = "TestValidation";
        record_validation_failures(resource_type, 3);
        record_validation_failures(resource_type, 0);

        let counter = VALIDATION_FAILURES_TOTAL.with_label_values(&[resource_type]);
        assert!((counter.get() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gather_metrics() {
        record_operation_success("GatherTest", "read", Duration::from_millis(100));

        let metrics_text = gather_metrics().expect("gathering metrics should succeed");
        assert!(
            metrics_text.contains("sparkpost_provider"),
            "Metrics should contain namespace prefix"
        );
        assert!(
            metrics_text.contains("operations_total"),
            "Metrics should contain operation counter"
        );
    }
}
