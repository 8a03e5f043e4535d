//! Database configuration read from the environment
//!
//! Variables:
//!   DATABASE_NAME      # database to connect to
//!   DATABASE_USER      # role name
//!   DATABASE_PASSWORD  # role password
//!   DATABASE_HOST      # server host
//!   DATABASE_PORT      # optional, defaults to 5432

use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 5432;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the relational store
#[derive(Clone)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl DatabaseConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = match lookup("DATABASE_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            name: required("DATABASE_NAME")?,
            user: required("DATABASE_USER")?,
            password: required("DATABASE_PASSWORD")?,
            host: required("DATABASE_HOST")?,
            port,
        })
    }

    /// Build sqlx connect options for this configuration.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_all_variables() {
        let vars = env(&[
            ("DATABASE_NAME", "shop"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "secret"),
            ("DATABASE_HOST", "db.internal"),
            ("DATABASE_PORT", "6543"),
        ]);
        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.name, "shop");
        assert_eq!(config.user, "app");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);

        let options = config.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("shop"));
    }

    #[test]
    fn port_defaults_to_5432() {
        let vars = env(&[
            ("DATABASE_NAME", "shop"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "secret"),
            ("DATABASE_HOST", "localhost"),
        ]);
        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn missing_variable_is_reported() {
        let vars = env(&[("DATABASE_NAME", "shop"), ("DATABASE_USER", "app")]);
        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_PASSWORD")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let vars = env(&[
            ("DATABASE_NAME", "shop"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "secret"),
            ("DATABASE_HOST", "localhost"),
            ("DATABASE_PORT", "not-a-port"),
        ]);
        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DATABASE_PORT", .. }));
    }

    #[test]
    fn debug_hides_password() {
        let vars = env(&[
            ("DATABASE_NAME", "shop"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "secret"),
            ("DATABASE_HOST", "localhost"),
        ]);
        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
