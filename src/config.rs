use std::env;
use std::fmt;
use std::time::Duration;

/// Where stock records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    /// Parse from the `STORE_BACKEND` value
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!(
                "Invalid STORE_BACKEND: {}. Must be one of: [\"postgres\", \"memory\"]",
                s
            )),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
    pub migrations_path: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    /// Present only for the postgres backend
    pub database: Option<DatabaseConfig>,
    pub log_level: String,
    pub http_port: u16,
    pub environment: String,
}

/// Read `name`, falling back to `default` only when it is unset
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    parse_value(name, env::var(name).ok(), default)
}

fn parse_value<T: std::str::FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, String> {
    match raw {
        Some(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid {}: {}", name, s)),
        None => Ok(default),
    }
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required")?;

        let config = Self {
            url,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
            idle_timeout_secs: parse_var("DATABASE_IDLE_TIMEOUT_SECS", 600)?, // 10 minutes
            max_lifetime_secs: parse_var("DATABASE_MAX_LIFETIME_SECS", 1800)?, // 30 minutes
            test_before_acquire: parse_var("DATABASE_TEST_BEFORE_ACQUIRE", true)?,
            migrations_path: env::var("MIGRATIONS_PATH")
                .unwrap_or_else(|_| "./migrations".to_string()),
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if self.acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/mandacaru_broker".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
            migrations_path: "./migrations".to_string(),
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let store = match env::var("STORE_BACKEND") {
            Ok(s) => StoreBackend::parse(&s)?,
            Err(_) => StoreBackend::Postgres,
        };

        let database = match store {
            StoreBackend::Postgres => Some(DatabaseConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self::build(store, database, log_level, parse_var("HTTP_PORT", 8080)?, environment)
    }

    fn build(
        store: StoreBackend,
        database: Option<DatabaseConfig>,
        log_level: String,
        http_port: u16,
        environment: String,
    ) -> Result<Self, String> {
        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            store,
            database,
            log_level: log_level.to_lowercase(),
            http_port,
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Postgres,
            database: Some(DatabaseConfig::default()),
            log_level: "info".to_string(),
            http_port: 8080,
            environment: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_rejects_empty_pool() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.store, StoreBackend::Postgres);
        assert!(config.is_development());
        assert!(!config.is_production());
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value::<u16>("HTTP_PORT", None, 8080), Ok(8080));
        assert_eq!(parse_value::<u16>("HTTP_PORT", Some("9000".to_string()), 8080), Ok(9000));
        assert_eq!(
            parse_value::<u16>("HTTP_PORT", Some("abc".to_string()), 8080),
            Err("Invalid HTTP_PORT: abc".to_string())
        );
        assert!(parse_value::<u32>("DATABASE_MAX_CONNECTIONS", Some("ten".to_string()), 10).is_err());
        assert!(parse_value::<bool>("DATABASE_TEST_BEFORE_ACQUIRE", Some("yes".to_string()), true).is_err());
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(StoreBackend::parse("memory"), Ok(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("Postgres"), Ok(StoreBackend::Postgres));
        assert!(StoreBackend::parse("redis").is_err());
    }

    #[test]
    fn test_build_normalizes_and_validates() {
        let config = AppConfig::build(
            StoreBackend::Memory,
            None,
            "DEBUG".to_string(),
            9000,
            "Production".to_string(),
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.is_production());

        assert!(AppConfig::build(
            StoreBackend::Memory,
            None,
            "verbose".to_string(),
            9000,
            "development".to_string(),
        )
        .is_err());

        assert!(AppConfig::build(
            StoreBackend::Memory,
            None,
            "info".to_string(),
            9000,
            "qa".to_string(),
        )
        .is_err());
    }
}
