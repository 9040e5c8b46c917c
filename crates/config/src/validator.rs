use crate::defaults::{LOG_FORMATS, LOG_LEVELS};
use crate::substitution::has_unresolved_env_vars;
use crate::*;
use regex::Regex;
use std::net::IpAddr;
use thiserror::Error;

const HOSTNAME_PATTERN: &str = r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Store name is required")]
    MissingStoreName,

    #[error("Invalid host: {0}. Must be an IP address or a hostname")]
    InvalidHost(String),

    #[error("{field} must not be 0")]
    ZeroPort { field: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("metrics.port {0} is already used by server.http_port")]
    PortCollision(u16),

    #[error("Environment variable placeholder left unresolved in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

pub fn validate_config(config: &TiendaConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_store(&config.store, &mut report);
    validate_server(&config.server, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_metrics(&config.metrics, &config.server, &mut report);

    report
}

fn check_placeholder(field: &str, value: &str, report: &mut ValidationReport) -> bool {
    if has_unresolved_env_vars(value) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: field.to_string(),
            value: value.to_string(),
        });
        return true;
    }
    false
}

fn validate_store(store: &StoreConfig, report: &mut ValidationReport) {
    if store.name.trim().is_empty() {
        report.add_error(ValidationError::MissingStoreName);
        return;
    }
    check_placeholder("store.name", &store.name, report);
}

fn validate_server(server: &ServerConfig, report: &mut ValidationReport) {
    if !check_placeholder("server.host", &server.host, report) && !is_valid_host(&server.host) {
        report.add_error(ValidationError::InvalidHost(server.host.clone()));
    }

    check_port("server.http_port", server.http_port, report);
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let level = logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        report.add_error(ValidationError::InvalidLogLevel(logging.level.clone()));
    } else if level == "trace" {
        report.add_warning("logging.level", "trace level is very verbose; use it for debugging only");
    }

    if !LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_metrics(metrics: &MetricsConfig, server: &ServerConfig, report: &mut ValidationReport) {
    if !metrics.enabled {
        return;
    }

    check_port("metrics.port", metrics.port, report);
    if metrics.port != 0 && metrics.port == server.http_port {
        report.add_error(ValidationError::PortCollision(metrics.port));
    }
}

fn check_port(field: &str, port: u16, report: &mut ValidationReport) {
    if port == 0 {
        report.add_error(ValidationError::ZeroPort {
            field: field.to_string(),
        });
    } else if port < 1024 {
        report.add_warning(field, "privileged port; binding may require elevated permissions");
    }
}

fn is_valid_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    Regex::new(HOSTNAME_PATTERN)
        .map(|re| re.is_match(host))
        .unwrap_or(false)
}
