//! Server and API configuration.
//!
//! Raw values come from the CLI (which also reads `FIRECRAWL_*` environment
//! variables). Every field is validated before use; a failing configuration is
//! reported in full so the caller can log it and fall back to defaults.

use std::fmt;
use std::str::FromStr;

use crate::cli::Cli;

/// Default Firecrawl Simple API endpoint (self-hosted)
pub const DEFAULT_API_URL: &str = "http://localhost:3002/v1";

/// Default scrape timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default port for the HTTP transport
pub const DEFAULT_PORT: u16 = 3003;

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub version: String,
    pub api: ApiConfig,
    pub server: ServerConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:3002/v1`
    pub url: String,
    /// Optional bearer credential
    pub key: Option<String>,
    /// Default `timeout` applied to scrape requests
    pub timeout_ms: u64,
}

/// Hosting settings for the MCP server itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub transport: TransportType,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportType {
    #[default]
    Stdio,
    /// Streamable HTTP; `sse` is accepted as an alias
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Configuration rejected during validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Configuration validation errors:\n{}", format_violations(.violations))]
pub struct ConfigError {
    /// `(dotted.path, message)` pairs, one per rejected field
    pub violations: Vec<(String, String)>,
}

fn format_violations(violations: &[(String, String)]) -> String {
    violations
        .iter()
        .map(|(path, message)| format!("  - {path}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            transport: TransportType::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api: ApiConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Build and validate the configuration from parsed CLI arguments.
    ///
    /// All fields are checked; the error lists every violation.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        let url = match validate_api_url(&cli.api_url) {
            Ok(url) => url,
            Err(message) => {
                violations.push(("api.url".to_string(), message));
                String::new()
            }
        };

        let timeout_ms = match parse_positive(&cli.api_timeout) {
            Ok(value) => value,
            Err(message) => {
                violations.push(("api.timeout".to_string(), message));
                0
            }
        };

        let port = match parse_positive(&cli.port).and_then(|value| {
            u16::try_from(value).map_err(|_| "Number must be less than or equal to 65535".to_string())
        }) {
            Ok(value) => value,
            Err(message) => {
                violations.push(("server.port".to_string(), message));
                0
            }
        };

        let transport = cli.transport.parse::<TransportType>().unwrap_or_else(|message| {
            violations.push(("server.transportType".to_string(), message));
            TransportType::default()
        });

        let log_level = cli.log_level.parse::<LogLevel>().unwrap_or_else(|message| {
            violations.push(("server.logLevel".to_string(), message));
            LogLevel::default()
        });

        if !violations.is_empty() {
            return Err(ConfigError { violations });
        }

        let key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api: ApiConfig {
                url,
                key,
                timeout_ms,
            },
            server: ServerConfig {
                port,
                transport,
                log_level,
            },
        })
    }
}

fn validate_api_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() => Ok(trimmed.to_string()),
        _ => Err("Invalid url".to_string()),
    }
}

fn parse_positive(raw: &str) -> Result<u64, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("Expected integer, received '{raw}'"))?;
    if value <= 0 {
        return Err("Number must be greater than 0".to_string());
    }
    Ok(value as u64)
}

impl FromStr for TransportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "sse" => Ok(Self::Http),
            other => Err(format!(
                "Invalid enum value. Expected 'stdio' | 'http' | 'sse', received '{other}'"
            )),
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            other => Err(format!(
                "Invalid enum value. Expected 'DEBUG' | 'INFO' | 'WARN' | 'ERROR', received '{other}'"
            )),
        }
    }
}

impl LogLevel {
    /// Default filter string handed to `env_logger`
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}
