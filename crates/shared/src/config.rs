//! Application configuration management.

use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Dashboard engine configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Dashboard engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// IANA timezone that defines local days and hours for bucketing.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Deadline applied to every dashboard assembly.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Time-to-live of memoised reports; 0 disables the cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Maximum number of memoised reports.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Roles whose data access is pinned to their assigned province.
    #[serde(default = "default_restricted_roles")]
    pub restricted_roles: Vec<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_restricted_roles() -> Vec<String> {
    vec!["ASM".to_string(), "Supervisor".to_string()]
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            request_timeout_secs: default_request_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
            restricted_roles: default_restricted_roles(),
        }
    }
}

impl ReportingConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA timezone.
    pub fn tz(&self) -> Result<Tz, config::ConfigError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid reporting.timezone '{}': {e}",
                self.timezone
            ))
        })
    }

    /// Returns the dashboard deadline.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns true if the role is pinned to a single province.
    #[must_use]
    pub fn is_restricted_role(&self, role: &str) -> bool {
        self.restricted_roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(role))
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SALESDASH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("reporting.restricted_roles")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.reporting.tz()?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(
            [
                ("SALESDASH__DATABASE__URL", Some("postgres://localhost/salesdash")),
                ("SALESDASH__JWT__SECRET", Some("secret")),
                ("SALESDASH__REPORTING__TIMEZONE", Some("Africa/Kinshasa")),
                ("RUN_MODE", Some("test-missing")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.url, "postgres://localhost/salesdash");
                assert_eq!(config.reporting.tz().unwrap(), chrono_tz::Africa::Kinshasa);
                assert_eq!(config.reporting.request_timeout(), Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let reporting = ReportingConfig {
            timezone: "Mars/Olympus".to_string(),
            ..ReportingConfig::default()
        };
        assert!(reporting.tz().is_err());
    }

    #[test]
    fn test_restricted_role_matching_ignores_case() {
        let reporting = ReportingConfig::default();
        assert!(reporting.is_restricted_role("asm"));
        assert!(reporting.is_restricted_role("Supervisor"));
        assert!(!reporting.is_restricted_role("Admin"));
    }
}
