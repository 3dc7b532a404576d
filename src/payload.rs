//! Birth payload construction and inspection.
//!
//! Builders produce ready-to-publish [`PublishEnvelope`]s: the Sparkplug B
//! protobuf bytes paired with the topic, QoS and retain flag the birth
//! messages require. The decode path exists for tests and debugging tools
//! that want to look inside a payload again.

use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message as _;

use crate::error::Result;
use crate::proto;
use crate::topic::{EdgeIdentity, MessageType};
use crate::types::{DataType, Metric, MetricSnapshot, MetricValue};

/// MQTT quality-of-service levels, kept transport-free so payload code does
/// not depend on the MQTT client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qos {
    /// At-most-once delivery.
    AtMostOnce,
    /// At-least-once delivery. Births use this level.
    AtLeastOnce,
    /// Exactly-once delivery.
    ExactlyOnce,
}

/// A fully constructed message, ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct PublishEnvelope {
    /// Destination topic.
    pub topic: String,
    /// Encoded Sparkplug B payload.
    pub payload: Vec<u8>,
    /// Delivery guarantee requested from the broker.
    pub qos: Qos,
    /// Whether the broker should retain the message for late subscribers.
    pub retain: bool,
}

/// Builds NBIRTH and DBIRTH envelopes for one edge identity.
///
/// # Example
///
/// ```
/// use sparkplug_edge::{BirthBuilder, EdgeIdentity, MetricSnapshot};
///
/// let identity = EdgeIdentity::new("Plant1", "NodeA", "Dev1");
/// let builder = BirthBuilder::new(identity);
///
/// let nbirth = builder.node_birth();
/// assert_eq!(nbirth.topic, "spBv1.0/Plant1/NBIRTH/NodeA");
///
/// let dbirth = builder.device_birth(&MetricSnapshot::new(10, 50, 100));
/// assert_eq!(dbirth.topic, "spBv1.0/Plant1/DBIRTH/NodeA/Dev1");
/// ```
#[derive(Debug, Clone)]
pub struct BirthBuilder {
    identity: EdgeIdentity,
}

impl BirthBuilder {
    /// Creates a builder for the given identity.
    pub fn new(identity: EdgeIdentity) -> Self {
        Self { identity }
    }

    /// The identity this builder constructs messages for.
    pub fn identity(&self) -> &EdgeIdentity {
        &self.identity
    }

    /// Builds an NBIRTH envelope stamped with the current time.
    ///
    /// The payload carries sequence number 0 and an empty metric list.
    /// Retained at QoS 1 so late subscribers see the node's presence.
    pub fn node_birth(&self) -> PublishEnvelope {
        self.node_birth_at(epoch_millis())
    }

    /// Builds an NBIRTH envelope with an explicit timestamp.
    pub fn node_birth_at(&self, timestamp: u64) -> PublishEnvelope {
        let payload = proto::Payload {
            timestamp: Some(timestamp),
            metrics: Vec::new(),
            seq: Some(0),
            uuid: None,
            body: None,
        };

        PublishEnvelope {
            topic: self.identity.topic(MessageType::NBirth),
            payload: payload.encode_to_vec(),
            qos: Qos::AtLeastOnce,
            retain: true,
        }
    }

    /// Builds a DBIRTH envelope from the given snapshot, stamped with the
    /// current time.
    ///
    /// The payload carries exactly three INT32 metrics in fixed order -
    /// `Pressure`, `Temperature`, `FlowRate` - sharing one timestamp and
    /// flagged non-historical. Consumers that index metrics positionally
    /// rely on that order.
    pub fn device_birth(&self, metrics: &MetricSnapshot) -> PublishEnvelope {
        self.device_birth_at(metrics, epoch_millis())
    }

    /// Builds a DBIRTH envelope with an explicit timestamp.
    pub fn device_birth_at(&self, metrics: &MetricSnapshot, timestamp: u64) -> PublishEnvelope {
        let metrics = vec![
            int32_metric("Pressure", metrics.pressure, timestamp),
            int32_metric("Temperature", metrics.temperature, timestamp),
            int32_metric("FlowRate", metrics.flowrate, timestamp),
        ];

        let payload = proto::Payload {
            timestamp: Some(timestamp),
            metrics,
            seq: Some(0),
            uuid: None,
            body: None,
        };

        PublishEnvelope {
            topic: self.identity.topic(MessageType::DBirth),
            payload: payload.encode_to_vec(),
            qos: Qos::AtLeastOnce,
            retain: true,
        }
    }
}

/// Renders a snapshot as pretty-printed JSON for human inspection.
///
/// A debugging aid only; the result is never published.
pub fn preview_json(metrics: &MetricSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(metrics)?)
}

/// Parses Sparkplug B protobuf bytes back into a payload.
pub fn decode(data: &[u8]) -> Result<proto::Payload> {
    Ok(proto::Payload::decode(data)?)
}

/// Returns milliseconds since the Unix epoch.
pub(crate) fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn int32_metric(name: &str, value: i32, timestamp: u64) -> proto::Metric {
    proto::Metric {
        name: Some(name.to_string()),
        alias: None,
        timestamp: Some(timestamp),
        datatype: Some(DataType::Int32 as u32),
        is_historical: Some(false),
        is_transient: None,
        is_null: None,
        // Sparkplug carries signed 32-bit values as their two's-complement
        // bit pattern in the uint32 int_value field.
        value: Some(proto::metric::Value::IntValue(value as u32)),
    }
}

impl Metric {
    /// Converts a decoded protobuf metric into the typed read-side view.
    pub fn from_proto(metric: &proto::Metric) -> Self {
        let datatype = DataType::from(metric.datatype.unwrap_or(0));

        let value = if metric.is_null.unwrap_or(false) {
            MetricValue::Null
        } else {
            match (&metric.value, datatype) {
                (Some(proto::metric::Value::IntValue(v)), DataType::Int8) => {
                    MetricValue::Int32(*v as i8 as i32)
                }
                (Some(proto::metric::Value::IntValue(v)), DataType::Int16) => {
                    MetricValue::Int32(*v as i16 as i32)
                }
                (Some(proto::metric::Value::IntValue(v)), DataType::Int32) => {
                    MetricValue::Int32(*v as i32)
                }
                (Some(proto::metric::Value::IntValue(v)), _) => MetricValue::UInt32(*v),
                (Some(proto::metric::Value::LongValue(v)), DataType::Int64) => {
                    MetricValue::Int64(*v as i64)
                }
                (Some(proto::metric::Value::LongValue(v)), _) => MetricValue::UInt64(*v),
                (Some(proto::metric::Value::FloatValue(v)), _) => MetricValue::Float(*v),
                (Some(proto::metric::Value::DoubleValue(v)), _) => MetricValue::Double(*v),
                (Some(proto::metric::Value::BooleanValue(v)), _) => MetricValue::Boolean(*v),
                (Some(proto::metric::Value::StringValue(v)), _) => {
                    MetricValue::String(v.clone())
                }
                (Some(proto::metric::Value::BytesValue(_)), _) | (None, _) => MetricValue::Null,
            }
        };

        Metric {
            name: metric.name.clone(),
            timestamp: metric.timestamp,
            datatype,
            is_historical: metric.is_historical.unwrap_or(false),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_round_trip() {
        let snapshot = MetricSnapshot::new(25, 60, 200);
        let json = preview_json(&snapshot).unwrap();
        let back: MetricSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_preview_uses_metric_names() {
        let json = preview_json(&MetricSnapshot::new(1, 2, 3)).unwrap();
        assert!(json.contains("\"Pressure\""));
        assert!(json.contains("\"Temperature\""));
        assert!(json.contains("\"FlowRate\""));
    }
}
