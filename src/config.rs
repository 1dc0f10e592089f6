use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:kanban.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL` and `BIND_ADDR`, falling back to local defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("BIND_ADDR").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, bind_addr: Option<String>) -> anyhow::Result<Self> {
        let database_url = database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = Config::from_vars(None, Some("localhost".to_string())).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
