//! Backend health and record-count reporting.
//!
//! [`Diagnostics::report`] never fails: a backend that cannot be queried
//! is reported as [`Status::Error`] with the error message, so callers can
//! always answer the info request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::store::ItemStore;

/// Placeholder for properties the backend did not report.
pub const UNKNOWN: &str = "unknown";

/// Server name reported when the backend does not name itself.
pub const DEFAULT_SERVER_NAME: &str = "itemkv";

/// Probe queries the backing service for its server properties.
pub trait Probe: Send + Sync {
    /// Backend identifier, e.g. the type name of the connection.
    fn name(&self) -> &str;

    /// Server properties keyed like `version`, `mode`, `os`, `tcp_port`,
    /// `uptime_in_seconds` and `server_name`. Missing keys are allowed.
    fn server_info(&self) -> Result<HashMap<String, String>>;
}

/// EmbeddedProbe describes the in-process store.
#[derive(Debug, Clone)]
pub struct EmbeddedProbe {
    started: Instant,
    port: Option<u16>,
}

impl EmbeddedProbe {
    /// Create a probe whose uptime starts now.
    pub fn new(port: Option<u16>) -> Self {
        Self {
            started: Instant::now(),
            port,
        }
    }
}

impl Probe for EmbeddedProbe {
    fn name(&self) -> &str {
        "EmbeddedProbe"
    }

    fn server_info(&self) -> Result<HashMap<String, String>> {
        let mut info = HashMap::new();
        info.insert("version".into(), env!("CARGO_PKG_VERSION").into());
        info.insert("mode".into(), "embedded".into());
        info.insert("os".into(), std::env::consts::OS.into());
        if let Some(port) = self.port {
            info.insert("tcp_port".into(), port.to_string());
        }
        info.insert(
            "uptime_in_seconds".into(),
            self.started.elapsed().as_secs().to_string(),
        );
        info.insert("server_name".into(), DEFAULT_SERVER_NAME.into());
        Ok(info)
    }
}

/// Connection state reported by [`Diagnostics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Connected,
    Error,
}

/// Report is the diagnostic object served by the info endpoint.
///
/// On [`Status::Error`] only `status` and `error` are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_port: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_in_seconds: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    fn error(message: String) -> Self {
        Self {
            status: Status::Error,
            backend: None,
            version: None,
            mode: None,
            os: None,
            tcp_port: None,
            uptime_in_seconds: None,
            server_name: None,
            item_count: None,
            error: Some(message),
        }
    }
}

/// Diagnostics combines a backend probe with the store's record count.
pub struct Diagnostics {
    store: Arc<ItemStore>,
    probe: Box<dyn Probe>,
}

impl Diagnostics {
    pub fn new(store: Arc<ItemStore>, probe: Box<dyn Probe>) -> Self {
        Self { store, probe }
    }

    /// Build a report. Probe failures become a [`Status::Error`] report.
    pub fn report(&self) -> Report {
        let mut info = match self.probe.server_info() {
            Ok(info) => info,
            Err(e) => {
                warn!(backend = self.probe.name(), error = %e, "diagnostics probe failed");
                return Report::error(e.to_string());
            }
        };
        let mut take = |key: &str| info.remove(key).unwrap_or_else(|| UNKNOWN.to_string());

        Report {
            status: Status::Connected,
            backend: Some(self.probe.name().to_string()),
            version: Some(take("version")),
            mode: Some(take("mode")),
            os: Some(take("os")),
            tcp_port: Some(take("tcp_port")),
            uptime_in_seconds: Some(take("uptime_in_seconds")),
            server_name: Some(
                info.remove("server_name")
                    .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            ),
            item_count: Some(self.store.count()),
            error: None,
        }
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("backend", &self.probe.name())
            .finish_non_exhaustive()
    }
}
