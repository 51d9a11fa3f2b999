//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use uuid::Uuid;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub endpoint: EndpointConfig,
    pub event_bus: EventBusConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    /// Emit logs as JSON
    pub log_json: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Remote JSON-RPC endpoint the client connects to
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// WebSocket URL, e.g. `ws://localhost:8080/api/ws`
    pub url: String,
    /// Identifier handed to handlers for messages from this endpoint
    pub endpoint_id: String,
}

/// In-process event bus settings
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Broadcast buffer size for async subscribers
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_bus_capacity(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "pom-reconcile-client".to_string()
}

fn default_endpoint_id() -> String {
    format!("client-{}", Uuid::new_v4())
}

fn default_bus_capacity() -> usize {
    256
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let log_json = match lookup("LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("LOG_JSON", raw))?,
            None => env.is_production(),
        };

        let url = lookup("RPC_ENDPOINT_URL").ok_or(ConfigError::MissingVar("RPC_ENDPOINT_URL"))?;
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ConfigError::InvalidValue("RPC_ENDPOINT_URL", url));
        }

        let capacity = match lookup("EVENT_BUS_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("EVENT_BUS_CAPACITY", raw)),
            },
            None => EventBusConfig::default().capacity,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_json,
            },
            endpoint: EndpointConfig {
                url,
                endpoint_id: lookup("RPC_ENDPOINT_ID").unwrap_or_else(default_endpoint_id),
            },
            event_bus: EventBusConfig { capacity },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
