//! Error types for the edge publisher.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for edge publisher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when publishing Sparkplug birth messages.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to reach the MQTT broker (network or TLS failure).
    #[error("Failed to connect to broker: {0}")]
    ConnectionFailed(String),

    /// The broker accepted the TCP session but refused the MQTT connection,
    /// typically bad credentials or an unacceptable protocol version.
    #[error("Broker refused connection: {reason}")]
    ConnectionRefused {
        /// The CONNACK return code reported by the broker.
        reason: String,
    },

    /// An operation did not complete within its deadline.
    #[error("Timed out waiting for {operation} after {timeout:?}")]
    Timeout {
        /// The operation that timed out.
        operation: &'static str,
        /// The deadline that expired.
        timeout: Duration,
    },

    /// Failed to hand a message to the transport.
    #[error("Failed to publish {message_type}: {details}")]
    PublishFailed {
        /// The type of message that failed to publish.
        message_type: &'static str,
        /// Additional details about the failure.
        details: String,
    },

    /// Port outside the valid 1-65535 range.
    #[error("Invalid broker port: {0} (must be 1-65535)")]
    InvalidPort(u16),

    /// Failed to read or write a persisted configuration file.
    #[error("Config file error for {path}: {source}")]
    ConfigIo {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A persisted configuration file did not parse as the expected JSON.
    #[error("Malformed config file: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    /// Failed to parse a payload as Sparkplug B protobuf data.
    #[error("Failed to decode payload: {0}")]
    DecodeFailed(#[from] prost::DecodeError),

    /// Not a message kind this crate publishes.
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(String),
}
