use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Configuration file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "tienda.yaml";

#[derive(Parser, Debug)]
#[command(name = "tienda")]
#[command(about = "Tienda - in-memory musical instrument inventory service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service
    Start {
        /// Path to the configuration file; defaults are used if it does not exist
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the HTTP port
        #[arg(long, env = "TIENDA_HTTP_PORT")]
        http: Option<u16>,

        /// Override the bind host
        #[arg(long, env = "TIENDA_HOST")]
        host: Option<String>,

        /// Override the log format
        #[arg(long, value_enum)]
        log_format: Option<LogFormatArg>,
    },

    /// Validate a configuration file without starting the service
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with every default filled in
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable, with colors
    Pretty,
    /// One JSON object per line
    Json,
    /// Single-line
    Compact,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Json => "json",
            LogFormatArg::Compact => "compact",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_with_overrides() {
        let cli = Cli::try_parse_from([
            "tienda", "start", "--config", "custom.yaml", "--http", "3000", "--host", "127.0.0.1",
            "--log-format", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Start {
                config,
                http,
                host,
                log_format,
            } => {
                assert_eq!(config, PathBuf::from("custom.yaml"));
                assert_eq!(http, Some(3000));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(log_format, Some(LogFormatArg::Json));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tienda", "init"]).unwrap();
        match cli.command {
            Commands::Init { output, force } => {
                assert_eq!(output, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["tienda", "validate"]).unwrap();
        match cli.command {
            Commands::Validate { config } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["tienda", "start"]).unwrap();
        match cli.command {
            Commands::Start { config, .. } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["tienda", "start", "--http", "70000"]).is_err());
    }
}
