//! Sparkplug B payload protobuf messages.
//!
//! Hand-written `prost` definitions for the subset of the Eclipse Tahu
//! `org.eclipse.tahu.protobuf.Payload` schema that birth messages use. Field
//! numbers match the published `sparkplug_b.proto` exactly, so payloads
//! produced here decode with any conforming Sparkplug B consumer.

/// A Sparkplug B payload: a timestamp, a sequence number and a list of
/// metrics.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Payload {
    /// Payload-level timestamp in milliseconds since the Unix epoch.
    #[prost(uint64, optional, tag = "1")]
    pub timestamp: Option<u64>,
    /// The metrics carried by this payload.
    #[prost(message, repeated, tag = "2")]
    pub metrics: Vec<Metric>,
    /// Message sequence number (0 on births).
    #[prost(uint64, optional, tag = "3")]
    pub seq: Option<u64>,
    /// Optional payload UUID.
    #[prost(string, optional, tag = "4")]
    pub uuid: Option<String>,
    /// Optional opaque body.
    #[prost(bytes = "vec", optional, tag = "5")]
    pub body: Option<Vec<u8>>,
}

/// A single Sparkplug B metric.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metric {
    /// Metric name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// Metric alias, if names were traded for aliases at birth.
    #[prost(uint64, optional, tag = "2")]
    pub alias: Option<u64>,
    /// Metric timestamp in milliseconds since the Unix epoch.
    #[prost(uint64, optional, tag = "3")]
    pub timestamp: Option<u64>,
    /// Sparkplug data type discriminant (see [`crate::DataType`]).
    #[prost(uint32, optional, tag = "4")]
    pub datatype: Option<u32>,
    /// Whether this value is a historical backfill rather than the
    /// current value.
    #[prost(bool, optional, tag = "5")]
    pub is_historical: Option<bool>,
    /// Whether this value is transient (not to be stored).
    #[prost(bool, optional, tag = "6")]
    pub is_transient: Option<bool>,
    /// Whether the value is explicitly null.
    #[prost(bool, optional, tag = "7")]
    pub is_null: Option<bool>,
    /// The metric value. Integer types up to 32 bits travel in
    /// `IntValue`, 64-bit integers in `LongValue`, per the Tahu schema.
    #[prost(oneof = "metric::Value", tags = "10, 11, 12, 13, 14, 15, 16")]
    pub value: Option<metric::Value>,
}

/// Nested types for [`Metric`].
pub mod metric {
    /// The value oneof of a Sparkplug B metric.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        /// 8/16/32-bit integer value. Signed values are stored as their
        /// two's-complement bit pattern.
        #[prost(uint32, tag = "10")]
        IntValue(u32),
        /// 64-bit integer value, same two's-complement convention.
        #[prost(uint64, tag = "11")]
        LongValue(u64),
        /// 32-bit floating point value.
        #[prost(float, tag = "12")]
        FloatValue(f32),
        /// 64-bit floating point value.
        #[prost(double, tag = "13")]
        DoubleValue(f64),
        /// Boolean value.
        #[prost(bool, tag = "14")]
        BooleanValue(bool),
        /// String or Text value.
        #[prost(string, tag = "15")]
        StringValue(String),
        /// Raw bytes value.
        #[prost(bytes = "vec", tag = "16")]
        BytesValue(Vec<u8>),
    }
}
