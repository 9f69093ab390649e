//! Directory configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DIRECTORY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `COURT_SECURITY_CODE` - Shared code for the court portal (portal mode only)
//! - `CLOUDINARY_CLOUD_NAME` - Cloudinary cloud hosting the headshots
//!
//! ## Optional
//! - `DIRECTORY_MODE` - `portal` (default) or `internal`
//! - `DIRECTORY_HOST` - Bind address (default: 127.0.0.1)
//! - `DIRECTORY_PORT` - Listen port (default: 3000)
//! - `DIRECTORY_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `COURT_ALLOWED_DOMAINS` - Comma-separated domain markers (default: `@courts.mo.gov,@jacksongov.org`)
//! - `POLICE_SECURITY_CODE` - Enables the police portal
//! - `POLICE_ALLOWED_DOMAINS` - Required when `POLICE_SECURITY_CODE` is set
//! - `CLOUDINARY_FOLDER` - Headshot folder (default: `JCPAO_headshots`)
//! - `DIRECTORY_PHONE_EXTENSION_PREFIX` - Office exchange prefix (default: 816881)
//! - `DIRECTORY_ROSTER_CACHE_TTL_SECS` - Roster cache lifetime (default: process lifetime)
//! - `DIRECTORY_TRUST_FORWARDED_FOR` - Take the client IP from `X-Forwarded-For` (default: false)
//! - `DIRECTORY_LOG_FORMAT` - `json` for JSON log lines (read by the binary)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use jcpao_directory_core::{DEFAULT_EXTENSION_PREFIX, Portal, VerificationGate};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SECURITY_CODE_LENGTH: usize = 8;

const DEFAULT_COURT_DOMAINS: &str = "@courts.mo.gov,@jacksongov.org";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which surface a deployment serves.
///
/// The two never share a server: the internal directory has no gate, so a
/// portal deployment must not mount it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServeMode {
    /// Staff directory at `/`, reachable only on the office network.
    Internal,
    /// Verified external portals under `/{portal}`.
    #[default]
    Portal,
}

impl ServeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Portal => "portal",
        }
    }
}

impl fmt::Display for ServeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "portal" => Ok(Self::Portal),
            other => Err(format!("expected `internal` or `portal`, got `{other}`")),
        }
    }
}

/// Directory application configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Internal directory or external portals
    pub mode: ServeMode,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Verification gates, one per enabled portal; empty in internal mode
    pub portals: Vec<VerificationGate>,
    /// Headshot image store
    pub images: ImageStoreConfig,
    /// Phone prefix whose numbers carry a desk extension
    pub phone_extension_prefix: String,
    /// Roster cache lifetime; `None` keeps the roster for the process lifetime
    pub roster_cache_ttl: Option<Duration>,
    /// Whether to trust `X-Forwarded-For` for the access log IP
    pub trust_forwarded_for: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Cloudinary image store configuration.
#[derive(Debug, Clone)]
pub struct ImageStoreConfig {
    pub cloud_name: String,
    pub folder: String,
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if a security code fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("DIRECTORY_DATABASE_URL")?;
        let host = parse_env("DIRECTORY_HOST", "127.0.0.1")?;
        let port = parse_env("DIRECTORY_PORT", "3000")?;
        let base_url = get_env_or_default("DIRECTORY_BASE_URL", "http://localhost:3000");

        let mode = parse_env("DIRECTORY_MODE", ServeMode::Portal.as_str())?;
        let portals = match mode {
            ServeMode::Internal => Vec::new(),
            ServeMode::Portal => load_portal_gates()?,
        };

        let images = ImageStoreConfig {
            cloud_name: get_required_env("CLOUDINARY_CLOUD_NAME")?,
            folder: get_env_or_default("CLOUDINARY_FOLDER", "JCPAO_headshots"),
        };

        let phone_extension_prefix =
            get_env_or_default("DIRECTORY_PHONE_EXTENSION_PREFIX", DEFAULT_EXTENSION_PREFIX);
        let roster_cache_ttl = get_optional_env("DIRECTORY_ROSTER_CACHE_TTL_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "DIRECTORY_ROSTER_CACHE_TTL_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;
        let trust_forwarded_for = parse_env("DIRECTORY_TRUST_FORWARDED_FOR", "false")?;

        Ok(Self {
            mode,
            database_url,
            host,
            port,
            base_url,
            portals,
            images,
            phone_extension_prefix,
            roster_cache_ttl,
            trust_forwarded_for,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the session cookie should be marked secure.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// The gate for `portal`, if that portal is enabled.
    #[must_use]
    pub fn gate(&self, portal: Portal) -> Option<&VerificationGate> {
        self.portals.iter().find(|gate| gate.portal() == portal)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Court gate, plus the police gate when its code is set.
fn load_portal_gates() -> Result<Vec<VerificationGate>, ConfigError> {
    let mut portals = vec![VerificationGate::new(
        Portal::Court,
        parse_domain_list(
            "COURT_ALLOWED_DOMAINS",
            &get_env_or_default("COURT_ALLOWED_DOMAINS", DEFAULT_COURT_DOMAINS),
        )?,
        get_security_code("COURT_SECURITY_CODE")?,
    )];
    if get_optional_env("POLICE_SECURITY_CODE").is_some() {
        portals.push(VerificationGate::new(
            Portal::Police,
            parse_domain_list(
                "POLICE_ALLOWED_DOMAINS",
                &get_required_env("POLICE_ALLOWED_DOMAINS")?,
            )?,
            get_security_code("POLICE_SECURITY_CODE")?,
        ));
    }
    Ok(portals)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated list of domain markers.
fn parse_domain_list(key: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let domains: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_owned)
        .collect();

    if domains.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "at least one domain is required".to_string(),
        ));
    }
    Ok(domains)
}

/// Validate that a portal security code is long enough and not a placeholder.
fn validate_security_code(code: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = code.expose_secret();
    if value.chars().count() < MIN_SECURITY_CODE_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_SECURITY_CODE_LENGTH} characters"),
        ));
    }

    let lower = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }
    Ok(())
}

/// Load and validate a portal security code from environment.
fn get_security_code(key: &str) -> Result<SecretString, ConfigError> {
    let code = SecretString::from(get_required_env(key)?);
    validate_security_code(&code, key)?;
    Ok(code)
}
