// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use sparkpost_provider::{
    config::{init_config, ProviderConfig},
    controller::ResourceController,
    provider::Provider,
    schema::{DesiredState, ResourceKind},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lifecycle driver for SparkPost inbound domains, relay webhooks and webhooks.
#[derive(Debug, Parser)]
#[command(name = "sparkpost-provider", version, about)]
struct Cli {
    /// YAML file with a `sparkpost:` section (falls back to SPARKPOST_* env vars)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a desired state without contacting SparkPost
    Check {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        desired: PathBuf,
    },
    /// Decide whether a change is an in-place update or a replace
    Diff {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        previous: PathBuf,
        #[arg(long)]
        desired: PathBuf,
    },
    /// Create the remote object
    Create {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        desired: PathBuf,
    },
    /// Update the remote object in place
    Update {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        id: String,
        #[arg(long)]
        previous: PathBuf,
        #[arg(long)]
        desired: PathBuf,
    },
    /// Delete the remote object
    Delete {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        id: String,
    },
    /// Read the remote object
    Read {
        #[arg(long, value_enum)]
        kind: ResourceKind,
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("sparkpost-provider")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Respects RUST_LOG_FORMAT environment variable for output format (json|text)
    // Logs go to stderr; stdout carries only the JSON result
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    debug!("Logging initialized with file and line number tracking");

    // Check and diff never reach SparkPost, so they run without credentials
    match cli.command {
        Command::Check { kind, desired } => {
            let desired = read_state(&desired)?;
            let result = ResourceController::for_kind(kind).validate(desired);
            print_json(&result)?;
            if !result.is_ok() {
                anyhow::bail!("{kind} desired state failed validation");
            }
            Ok(())
        }
        Command::Diff {
            kind,
            previous,
            desired,
        } => {
            let previous = read_state(&previous)?;
            let desired = read_state(&desired)?;
            print_json(&ResourceController::for_kind(kind).diff(&previous, &desired))
        }
        command => run_remote(cli.config.as_deref(), command).await,
    }
}

async fn run_remote(config_path: Option<&Path>, command: Command) -> Result<()> {
    let config = ProviderConfig::load(config_path).context("Failed to load provider configuration")?;
    init_config(config)?;
    let provider = Provider::from_global_config()?;

    info!(base_url = %provider.config().base_url, "Starting SparkPost lifecycle operation");

    match command {
        Command::Create { kind, desired } => {
            let desired = read_state(&desired)?;
            let created = provider.create(kind, &desired).await?;
            print_json(&created)
        }
        Command::Update {
            kind,
            id,
            previous,
            desired,
        } => {
            let previous = read_state(&previous)?;
            let desired = read_state(&desired)?;
            let outputs = provider.update(kind, &id, &previous, &desired).await?;
            print_json(&outputs)
        }
        Command::Delete { kind, id } => {
            provider.delete(kind, &id).await?;
            print_json(&serde_json::json!({ "id": id, "deleted": true }))
        }
        Command::Read { kind, id } => print_json(&provider.read(kind, &id).await?),
        Command::Check { .. } | Command::Diff { .. } => {
            anyhow::bail!("check and diff do not contact SparkPost")
        }
    }
}

/// Read a desired-state file (JSON or YAML) into a mapping.
fn read_state(path: &Path) -> Result<DesiredState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;

    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON state file {}", path.display()))?,
        _ => serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML state file {}", path.display()))?,
    };

    match value {
        Value::Object(state) => Ok(state),
        Value::Null => Ok(DesiredState::new()),
        other => anyhow::bail!(
            "State file {} must contain a mapping, found {other}",
            path.display()
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
