use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest accepted token lifetime (ten years).
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct PasswordConfig {
    pub salt: String,
}

impl fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("salt", &"[redacted]")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, PASSWORD__SALT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("jwt.expiration_hours", 720)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service cannot start safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        if self.password.salt.is_empty() {
            return Err(ConfigError::Message("password.salt must be set".to_string()));
        }
        if self.jwt.expiration_hours <= 0 || self.jwt.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}",
                MAX_EXPIRATION_HOURS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, salt: &str, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/gateway".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours,
            },
            password: PasswordConfig {
                salt: salt.to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config("signing-secret", "salt", 720).validate().is_ok());
    }

    #[test]
    fn test_validate_requires_secrets() {
        assert!(config("", "salt", 720).validate().is_err());
        assert!(config("   ", "salt", 720).validate().is_err());
        assert!(config("signing-secret", "", 720).validate().is_err());
    }

    #[test]
    fn test_validate_requires_positive_lifetime() {
        assert!(config("signing-secret", "salt", 0).validate().is_err());
    }

    #[test]
    fn test_validate_bounds_lifetime() {
        assert!(config("signing-secret", "salt", MAX_EXPIRATION_HOURS)
            .validate()
            .is_ok());
        assert!(config("signing-secret", "salt", MAX_EXPIRATION_HOURS + 1)
            .validate()
            .is_err());
        assert!(config("signing-secret", "salt", 10_000_000_000)
            .validate()
            .is_err());
        assert!(config("signing-secret", "salt", i64::MAX).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", config("signing-secret", "pepper", 720));
        assert!(!rendered.contains("signing-secret"));
        assert!(!rendered.contains("pepper"));
        assert!(rendered.contains("720"));
    }
}
