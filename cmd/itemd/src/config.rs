//! Service configuration.
//!
//! Loaded from an optional YAML file; every field has a default so an
//! empty file is a valid config:
//!
//! ```yaml
//! listen: ":8080"
//! log_level: info
//! ```

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default listen address (all interfaces).
pub const DEFAULT_LISTEN: &str = ":8080";
/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address to listen on, e.g. `:8080` or `127.0.0.1:9000`.
    pub listen: String,

    /// Tracing filter directive, e.g. `info` or `itemkv=debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("parse config {}", path.display()))
    }

    /// Parse YAML config text. Blank text yields the defaults.
    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr(&self.listen)
    }
}

/// Parse address string to SocketAddr. A leading `:` binds all interfaces.
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    addr.parse()
        .with_context(|| format!("invalid listen address {addr:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen, ":8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.listen_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("listen: 127.0.0.1:9000\n").unwrap();
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(Config::parse("port: 80\n").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen: \":7070\"").unwrap();
        writeln!(file, "log_level: debug").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen, ":7070");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr(":80").unwrap().port(), 80);
        assert!(parse_addr("127.0.0.1:0").unwrap().ip().is_loopback());
        assert!(parse_addr("not an address").is_err());
    }
}
