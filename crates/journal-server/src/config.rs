use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub op_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables take their
    /// defaults; set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("JOURNAL_DB_PATH").unwrap_or_else(|| "journal.db".into());
        let host = lookup("JOURNAL_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "10000".into())
            .parse()
            .context("PORT must be a port number")?;
        let op_timeout_ms: u64 = lookup("JOURNAL_OP_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("JOURNAL_OP_TIMEOUT_MS must be a whole number of milliseconds")?;

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            op_timeout: Duration::from_millis(op_timeout_ms),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("journal.db"));
        assert_eq!(config.port, 10000);
        assert_eq!(config.op_timeout, Duration::from_secs(5));
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:10000");
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("JOURNAL_DB_PATH", "/tmp/j.db"),
            ("JOURNAL_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("JOURNAL_OP_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/j.db"));
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.op_timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
    }
}
