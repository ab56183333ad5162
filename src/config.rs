use std::env;
use std::fmt;

const DEFAULT_DATABASE_URL: &str = "sqlite://todosapp.db";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 20;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                value: jwt_secret,
            });
        }

        let bcrypt_cost = parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let token_ttl_minutes = parsed_or("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_MINUTES",
                value: token_ttl_minutes.to_string(),
            });
        }

        let database_max_connections = parsed_or("DATABASE_MAX_CONNECTIONS", 5)?;
        if database_max_connections < 1 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: database_max_connections.to_string(),
            });
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections,
            server_port: parsed_or("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            token_ttl_minutes,
            bcrypt_cost,
        })
    }

    /// Lifetime of tokens minted by the login endpoint.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide; keep every env-mutating
    // assertion in this one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("JWT_SECRET");
        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );

        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("TOKEN_TTL_MINUTES");
        env::remove_var("BCRYPT_COST");
        env::remove_var("DATABASE_MAX_CONNECTIONS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.token_ttl(), chrono::Duration::minutes(20));
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("TOKEN_TTL_MINUTES", "5");
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.token_ttl_minutes, 5);

        env::set_var("SERVER_PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "SERVER_PORT", .. })
        ));
        env::remove_var("SERVER_PORT");

        env::set_var("BCRYPT_COST", "2");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));

        env::remove_var("BCRYPT_COST");

        env::set_var("DATABASE_MAX_CONNECTIONS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. })
        ));
        env::remove_var("DATABASE_MAX_CONNECTIONS");

        env::remove_var("SERVER_HOST");
        env::remove_var("TOKEN_TTL_MINUTES");
        env::remove_var("JWT_SECRET");
    }
}
