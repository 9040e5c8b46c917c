use crate::validator::{validate_config, ValidationReport};
use crate::{substitution, TiendaConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Top-level sections, in file order.
pub const SECTIONS: [&str; 4] = ["store", "server", "logging", "metrics"];

/// Parse configuration text after environment substitution.
pub fn parse_config(content: &str) -> Result<TiendaConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    if substituted.trim().is_empty() {
        return Ok(TiendaConfig::default());
    }
    serde_yaml::from_str(&substituted).with_context(|| "Failed to parse YAML configuration")
}

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TiendaConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    debug!("Config file content length: {} bytes", content.len());

    let config = parse_config(&content)?;
    info!("Configuration loaded successfully");
    Ok(config)
}

/// Load and validate a file, noting every section filled in from defaults.
pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<(TiendaConfig, ValidationReport)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = parse_config(&content)?;

    let raw: serde_yaml::Value = serde_yaml::from_str(&content).unwrap_or(serde_yaml::Value::Null);
    let mut report = validate_config(&config);
    for section in SECTIONS {
        if raw.get(section).is_none() {
            report.add_default(section, "section omitted");
        }
    }

    Ok((config, report))
}

pub fn generate_default_config() -> TiendaConfig {
    TiendaConfig::default()
}

#[instrument(skip(config))]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &TiendaConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
