//! Log collector configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Where structured log records are forwarded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogCollectorConfig {
    /// Forward records at all (disabled = records are dropped)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Collector base URL; records are posted to `{base_url}/log`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound on a single forwarding call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://logging-service.shared-ns.svc.cluster.local:5000".to_string()
}

const fn default_timeout() -> u64 {
    2
}

impl Default for LogCollectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl LogCollectorConfig {
    /// Full URL of the ingestion endpoint
    #[must_use]
    pub fn log_endpoint(&self) -> String {
        format!("{}/log", self.base_url.trim_end_matches('/'))
    }
}
