//! Configuration management module
//!
//! Responsible for loading and managing application configuration from
//! environment variables and an optional .env file.

pub mod settings;

pub use settings::{
    ClientConfig, CompletionDefaults, LoggingConfig, RequestConfig, SecurityConfig, ServerConfig,
    Settings, UpstreamConfig,
};
