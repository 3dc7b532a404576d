//! Sparkplug B edge node birth publisher.
//!
//! This library announces a simulated edge node and its device to an MQTT
//! broker with Sparkplug B birth certificates (NBIRTH, DBIRTH), for
//! operators who need to exercise a Sparkplug-speaking host without real
//! field equipment.
//!
//! # Features
//!
//! - **One connection per identity**: a publisher holds a single broker
//!   session serviced by a background thread and reuses it across sends
//! - **Spec-shaped payloads**: Sparkplug B protobuf encoding, fixed metric
//!   order, shared timestamps, retained QoS-1 delivery
//! - **Auto-publish loop**: a periodic DBIRTH scheduler with immediate,
//!   channel-based cancellation
//! - **Persisted sessions**: JSON save/load of identity, broker and metric
//!   values
//!
//! # Example
//!
//! ```no_run
//! use sparkplug_edge::{BrokerConfig, EdgeIdentity, EdgePublisher, MetricSnapshot};
//!
//! # fn main() -> Result<(), sparkplug_edge::Error> {
//! let identity = EdgeIdentity::new("Plant1", "NodeA", "Dev1");
//! let broker = BrokerConfig::new("localhost", 1883);
//!
//! let publisher = EdgePublisher::connect(identity, &broker)?;
//! publisher.publish_node_birth()?;
//! publisher.publish_device_birth(&MetricSnapshot::new(10, 50, 100))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod payload;
pub mod proto;
pub mod publisher;
pub mod scheduler;
pub mod topic;
pub mod types;

pub use config::StoredConfig;
pub use error::{Error, Result};
pub use payload::{decode, preview_json, BirthBuilder, PublishEnvelope, Qos};
pub use publisher::{BrokerConfig, EdgePublisher, DEFAULT_CONNECT_TIMEOUT, DEFAULT_KEEP_ALIVE};
pub use scheduler::{AutoPublisher, DEFAULT_INTERVAL};
pub use topic::{EdgeIdentity, MessageType, NAMESPACE};
pub use types::{DataType, Metric, MetricSnapshot, MetricValue};
