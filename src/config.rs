//! Persisted publisher configuration.
//!
//! A flat JSON file carrying the identity, broker endpoint and last metric
//! values, so an operator can park a session and pick it up later. The
//! password is stored in plain text; treat the file accordingly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::publisher::BrokerConfig;
use crate::topic::EdgeIdentity;
use crate::types::MetricSnapshot;

fn default_port() -> u16 {
    1883
}

/// The on-disk configuration: identity, broker endpoint and metric values.
///
/// Missing fields take their defaults on load (`port` falls back to 1883,
/// strings to empty, booleans to false, metric values to 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Sparkplug group ID.
    #[serde(default)]
    pub group: String,
    /// Edge node identifier.
    #[serde(default)]
    pub node: String,
    /// Device identifier.
    #[serde(default)]
    pub device: String,
    /// Broker hostname or IP address.
    #[serde(default)]
    pub broker: String,
    /// Broker port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username, empty when unauthenticated.
    #[serde(default)]
    pub username: String,
    /// Password, empty when unauthenticated. Stored in plain text.
    #[serde(default)]
    pub password: String,
    /// Whether to connect over TLS.
    #[serde(default)]
    pub use_tls: bool,
    /// Last pressure value.
    #[serde(default)]
    pub pressure: i32,
    /// Last temperature value.
    #[serde(default)]
    pub temperature: i32,
    /// Last flow rate value.
    #[serde(default)]
    pub flowrate: i32,
}

impl StoredConfig {
    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: StoredConfig = serde_json::from_str(&contents)?;
        if config.port == 0 {
            return Err(Error::InvalidPort(config.port));
        }
        Ok(config)
    }

    /// Writes the configuration to a JSON file, pretty-printed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The edge identity described by this configuration.
    pub fn identity(&self) -> EdgeIdentity {
        EdgeIdentity::new(&self.group, &self.node, &self.device)
    }

    /// The broker configuration described by this configuration.
    ///
    /// Empty username or password means no credentials, matching the form
    /// semantics the file mirrors.
    pub fn broker_config(&self) -> BrokerConfig {
        let mut broker = BrokerConfig::new(&self.broker, self.port);
        if !self.username.is_empty() && !self.password.is_empty() {
            broker = broker.credentials(&self.username, &self.password);
        }
        if self.use_tls {
            broker = broker.with_tls();
        }
        broker
    }

    /// The metric values described by this configuration.
    pub fn metrics(&self) -> MetricSnapshot {
        MetricSnapshot::new(self.pressure, self.temperature, self.flowrate)
    }
}
