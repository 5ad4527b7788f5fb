//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Create the demo account on start-up.
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `AURA_ADDR` | Server bind address | `127.0.0.1:5000` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:aura.db?mode=rwc` |
    /// | `AURA_SEED_DEMO` | Seed the demo account (`1`/`true`) | off |
    ///
    /// The language model is configured separately through `OPENAI_*`
    /// variables; without `OPENAI_API_KEY` the assistant uses keyword
    /// extraction.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("AURA_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:aura.db?mode=rwc".to_string());

        let seed_demo = env::var("AURA_SEED_DEMO")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            addr,
            database_url,
            seed_demo,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid AURA_ADDR format")]
    InvalidAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn test_from_env_scenarios() {
        env::remove_var("AURA_ADDR");
        env::remove_var("SQLITE_PATH");
        env::remove_var("AURA_SEED_DEMO");

        let config = Config::from_env().unwrap();
        assert_eq!(config.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite:aura.db?mode=rwc");
        assert!(!config.seed_demo);

        env::set_var("AURA_ADDR", "0.0.0.0:8080");
        env::set_var("SQLITE_PATH", "sqlite::memory:");
        env::set_var("AURA_SEED_DEMO", "true");
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(config.seed_demo);

        env::set_var("AURA_ADDR", "not an address");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        env::remove_var("AURA_ADDR");
        env::remove_var("SQLITE_PATH");
        env::remove_var("AURA_SEED_DEMO");
    }
}
