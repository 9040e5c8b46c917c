//! Tienda CLI and server binary
//!
//! Wires configuration, logging and metrics around the inventory service and
//! serves its HTTP API.

use anyhow::{Context, Result};
use cli::{Cli, Commands, LogFormatArg};
use config::{
    generate_default_config, load_and_validate, load_config, save_config, validate_config,
    TiendaConfig,
};
use inventory::api::{inventory_routes, InventoryApiState};
use inventory::InventoryService;
use observability::{init_logging, init_metrics, LogFormat};
use server::{HttpServer, ServerConfig, ServerExt};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const SERVICE_NAME: &str = "tienda";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            http,
            host,
            log_format,
        } => start_command(&config, http, host, log_format).await,
        Commands::Validate { config } => {
            init_logging(SERVICE_NAME, LogFormat::Pretty, "warn")?;
            validate_command(&config)
        }
        Commands::Init { output, force } => {
            init_logging(SERVICE_NAME, LogFormat::Pretty, "warn")?;
            init_command(&output, force)
        }
    }
}

/// Config file if present, defaults otherwise, with CLI overrides applied.
fn resolve_config(
    path: &Path,
    http: Option<u16>,
    host: Option<String>,
    log_format: Option<LogFormatArg>,
) -> Result<(TiendaConfig, bool)> {
    let from_file = path.exists();
    let mut config = if from_file {
        load_config(path)?
    } else {
        generate_default_config()
    };

    if let Some(port) = http {
        config.server.http_port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(format) = log_format {
        config.logging.format = format.as_str().to_string();
    }

    Ok((config, from_file))
}

async fn start_command(
    config_path: &Path,
    http: Option<u16>,
    host: Option<String>,
    log_format: Option<LogFormatArg>,
) -> Result<()> {
    let (config, from_file) = resolve_config(config_path, http, host, log_format)?;

    let format = config
        .logging
        .format
        .parse::<LogFormat>()
        .map_err(anyhow::Error::msg)?;
    init_logging(SERVICE_NAME, format, &config.logging.level)?;

    if from_file {
        info!(path = ?config_path, "Configuration loaded");
    } else {
        warn!(path = ?config_path, "Configuration file not found, using defaults");
    }
    debug!(?config, "Effective configuration");

    let report = validate_config(&config);
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }
    if !report.is_valid() {
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start due to {} configuration error(s)", report.errors.len());
    }

    if config.metrics.enabled {
        init_metrics(&config.server.host, config.metrics.port)
            .context("Failed to start metrics exporter")?;
    }

    let service = InventoryService::in_memory();
    let state = Arc::new(InventoryApiState::new(service));
    let router = inventory_routes(state);

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.http_port);
    info!(
        store = %config.store.name,
        address = %server_config.address(),
        metrics = config.metrics.enabled,
        "Starting inventory service"
    );

    let server = HttpServer::new(server_config, SERVICE_NAME, router);
    server.run_with_ctrl_c().await?;

    info!("Inventory service stopped");
    Ok(())
}

fn validate_command(config_path: &Path) -> Result<()> {
    let (config, report) = load_and_validate(config_path)?;

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Store: {}", config.store.name);
    println!("HTTP: {}:{}", config.server.host, config.server.http_port);
    println!("Logging: {} ({})", config.logging.level, config.logging.format);
    if config.metrics.enabled {
        println!("Metrics: enabled on port {}", config.metrics.port);
    } else {
        println!("Metrics: disabled");
    }

    Ok(())
}

fn init_command(output_path: &Path, force: bool) -> Result<()> {
    if output_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        );
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&generate_default_config(), output_path)?;

    println!("[ok] Configuration file created: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Edit the file; ${{VAR}} placeholders are read from the environment");
    println!("  2. Run 'tienda validate --config {:?}'", output_path);
    println!("  3. Run 'tienda start --config {:?}'", output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let (config, from_file) = resolve_config(
            &path,
            Some(3000),
            Some("127.0.0.1".to_string()),
            Some(LogFormatArg::Compact),
        )
        .unwrap();

        assert!(!from_file);
        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.store.name, generate_default_config().store.name);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("tienda.yaml");

        init_command(&path, false).unwrap();
        assert!(init_command(&path, false).is_err());
        init_command(&path, true).unwrap();

        let (config, from_file) = resolve_config(&path, None, None, None).unwrap();
        assert!(from_file);
        assert_eq!(config, generate_default_config());
    }
}
