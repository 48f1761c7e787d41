//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream OpenAI API configuration
    pub upstream: UpstreamConfig,
    /// Client-side call helper configuration
    pub client: ClientConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream OpenAI API configuration
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API key. Absent when the server is deployed without one, in which
    /// case completion requests fail before any upstream call is made.
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Defaults merged into requests that omit them
    pub defaults: CompletionDefaults,
}

/// App-wide completion defaults
#[derive(Debug, Clone)]
pub struct CompletionDefaults {
    /// Model used when the caller does not pick one
    pub model: String,
    /// Sampling temperature used when the caller does not pick one
    pub temperature: f32,
}

/// Configuration for the in-process call helper
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the helper posts to. Falls back to this server's own
    /// listen address when unset.
    pub base_url: Option<String>,
}

/// Request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "127.0.0.1"),
                port: get_env_or_default("SERVER_PORT", "8082")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                // An empty value counts as unset so a blank line in .env
                // does not masquerade as a configured key.
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: get_env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                defaults: CompletionDefaults {
                    model: get_env_or_default("OPENAI_DEFAULT_MODEL", "gpt-4o-mini"),
                    temperature: get_env_or_default("OPENAI_DEFAULT_TEMPERATURE", "0.7")
                        .parse()
                        .context("Invalid default temperature")?,
                },
            },
            client: ClientConfig {
                base_url: env::var("APP_BASE_URL").ok().filter(|u| !u.is_empty()),
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // A key may be absent, but when present it must look like one.
        // Never echo the value itself in an error message.
        if let Some(key) = &self.upstream.api_key {
            if key.contains(char::is_whitespace) {
                anyhow::bail!("OpenAI API key cannot contain whitespace characters");
            }

            if key.len() < 8 {
                anyhow::bail!("OpenAI API key must be at least 8 characters long");
            }
        }

        // Validate URL format
        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid OpenAI base URL format, should start with 'http'");
        }

        // Validate timeout value
        if self.upstream.timeout == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }

        // Validate default temperature range
        if !(0.0..=2.0).contains(&self.upstream.defaults.temperature) {
            anyhow::bail!("Default temperature must be between 0.0 and 2.0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether an upstream API key is available
    pub fn upstream_configured(&self) -> bool {
        self.upstream.api_key.is_some()
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
