//! Configuration management for velto
//!
//! This module handles loading, validation, and management of
//! velto configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Which authentication provider backs sign-in and sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    /// Accepts any non-empty credentials after a short delay
    #[default]
    Mock,
    /// Checks credentials against the configured user list
    Credentials,
}

impl std::str::FromStr for AuthProviderKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(AuthProviderKind::Mock),
            "credentials" => Ok(AuthProviderKind::Credentials),
            _ => Err(format!("Invalid auth provider: {}", s)),
        }
    }
}

impl std::fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthProviderKind::Mock => write!(f, "mock"),
            AuthProviderKind::Credentials => write!(f, "credentials"),
        }
    }
}

/// A user known to the credentials provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Provider selected at startup
    #[serde(default)]
    pub provider: AuthProviderKind,
    /// Simulated round-trip to the identity service, in milliseconds
    #[serde(default = "default_auth_latency")]
    pub latency_ms: u64,
    /// Name of the session cookie
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Lifetime of a session, in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Upper bound on concurrent sessions; the oldest is evicted beyond it
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Accounts for the credentials provider
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProviderKind::default(),
            latency_ms: default_auth_latency(),
            session_cookie: default_session_cookie(),
            session_ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
            users: vec![],
        }
    }
}

fn default_auth_latency() -> u64 {
    1000
}

fn default_session_cookie() -> String {
    "velto_session".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

/// Payment request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestsConfig {
    /// Prefix of every generated payment link
    #[serde(default = "default_link_base_url")]
    pub link_base_url: String,
    /// Simulated delay before a new link is handed out, in milliseconds
    #[serde(default = "default_creation_latency")]
    pub creation_latency_ms: u64,
    /// Length of the random code appended to the link
    #[serde(default = "default_link_code_length")]
    pub link_code_length: usize,
}

impl Default for RequestsConfig {
    fn default() -> Self {
        Self {
            link_base_url: default_link_base_url(),
            creation_latency_ms: default_creation_latency(),
            link_code_length: default_link_code_length(),
        }
    }
}

fn default_link_base_url() -> String {
    "https://velto.app/pay/".to_string()
}

fn default_creation_latency() -> u64 {
    2000
}

fn default_link_code_length() -> usize {
    6
}

/// Seed data configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// YAML file with `requests` and `payments`; built-in sample data when unset
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO currency code
    #[serde(default = "default_currency")]
    pub code: String,
    /// Symbol shown next to amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default = "default_symbol_position")]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: default_symbol_position(),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_symbol() -> String {
    "€".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

fn default_symbol_position() -> SymbolPosition {
    SymbolPosition::Before
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

/// Sharing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Base of the messaging deep link; the message goes in `?text=`
    #[serde(default = "default_whatsapp_base")]
    pub whatsapp_base_url: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            whatsapp_base_url: default_whatsapp_base(),
        }
    }
}

fn default_whatsapp_base() -> String {
    "https://wa.me/".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Payment request settings
    #[serde(default)]
    pub requests: RequestsConfig,
    /// Seed data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Sharing settings
    #[serde(default)]
    pub sharing: SharingConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: PathBuf) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.auth.session_cookie.is_empty()
            || !self
                .auth
                .session_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_cookie".to_string(),
                reason: "Cookie name must be non-empty and use only letters, digits, '_' or '-'"
                    .to_string(),
            });
        }

        if self.auth.session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_ttl_secs".to_string(),
                reason: "Session lifetime must be greater than 0".to_string(),
            });
        }

        if self.auth.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.max_sessions".to_string(),
                reason: "Session limit must be greater than 0".to_string(),
            });
        }

        for (i, user) in self.auth.users.iter().enumerate() {
            if user.email.trim().is_empty() || user.password.is_empty() {
                return Err(ConfigError::MissingField {
                    field: format!("auth.users[{}].email/password", i),
                });
            }
        }

        if !self.requests.link_base_url.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "requests.link_base_url".to_string(),
                reason: "Link base URL must end with '/'".to_string(),
            });
        }

        if !(4..=32).contains(&self.requests.link_code_length) {
            return Err(ConfigError::InvalidValue {
                field: "requests.link_code_length".to_string(),
                reason: "Link code length must be between 4 and 32".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Copy of the configuration that is safe to expose over the API
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for user in &mut config.auth.users {
            user.password = String::new();
        }
        config
    }
}
