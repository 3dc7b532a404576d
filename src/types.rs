//! Common types for the edge publisher.

use serde::{Deserialize, Serialize};

/// Sparkplug data types.
///
/// Discriminants are the wire values from the Sparkplug B specification's
/// `DataType` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DataType {
    /// Unknown or unsupported type
    Unknown = 0,
    /// Signed 8-bit integer
    Int8 = 1,
    /// Signed 16-bit integer
    Int16 = 2,
    /// Signed 32-bit integer
    Int32 = 3,
    /// Signed 64-bit integer
    Int64 = 4,
    /// Unsigned 8-bit integer
    UInt8 = 5,
    /// Unsigned 16-bit integer
    UInt16 = 6,
    /// Unsigned 32-bit integer
    UInt32 = 7,
    /// Unsigned 64-bit integer
    UInt64 = 8,
    /// 32-bit floating point
    Float = 9,
    /// 64-bit floating point
    Double = 10,
    /// Boolean value
    Boolean = 11,
    /// String value
    String = 12,
    /// DateTime value (milliseconds since the Unix epoch)
    DateTime = 13,
    /// Text value
    Text = 14,
}

impl From<u32> for DataType {
    fn from(value: u32) -> Self {
        match value {
            1 => DataType::Int8,
            2 => DataType::Int16,
            3 => DataType::Int32,
            4 => DataType::Int64,
            5 => DataType::UInt8,
            6 => DataType::UInt16,
            7 => DataType::UInt32,
            8 => DataType::UInt64,
            9 => DataType::Float,
            10 => DataType::Double,
            11 => DataType::Boolean,
            12 => DataType::String,
            13 => DataType::DateTime,
            14 => DataType::Text,
            _ => DataType::Unknown,
        }
    }
}

/// Metric value type.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Signed 32-bit integer value (covers Int8/Int16/Int32 wire types)
    Int32(i32),
    /// Signed 64-bit integer value
    Int64(i64),
    /// Unsigned 32-bit integer value (covers UInt8/UInt16/UInt32 wire types)
    UInt32(u32),
    /// Unsigned 64-bit integer value
    UInt64(u64),
    /// 32-bit floating point value
    Float(f32),
    /// 64-bit floating point value
    Double(f64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Null value
    Null,
}

/// A decoded metric, the read-side counterpart of what the builders emit.
#[derive(Debug, Clone)]
pub struct Metric {
    /// Metric name (if present)
    pub name: Option<String>,
    /// Metric timestamp in milliseconds since the Unix epoch (if present)
    pub timestamp: Option<u64>,
    /// Data type
    pub datatype: DataType,
    /// Whether the value is a historical backfill
    pub is_historical: bool,
    /// Metric value (or Null)
    pub value: MetricValue,
}

/// The device's metric values at the moment of a publish call.
///
/// Captured fresh for every DBIRTH; never a live subscription. Serde field
/// names match the published metric names, so the JSON preview of a snapshot
/// deserializes back into a structurally identical snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Pressure reading.
    #[serde(rename = "Pressure")]
    pub pressure: i32,
    /// Temperature reading.
    #[serde(rename = "Temperature")]
    pub temperature: i32,
    /// Flow rate reading.
    #[serde(rename = "FlowRate")]
    pub flowrate: i32,
}

impl MetricSnapshot {
    /// Creates a new snapshot.
    pub fn new(pressure: i32, temperature: i32, flowrate: i32) -> Self {
        Self {
            pressure,
            temperature,
            flowrate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_round_trip() {
        assert_eq!(DataType::from(DataType::Int32 as u32), DataType::Int32);
        assert_eq!(DataType::from(DataType::Text as u32), DataType::Text);
        assert_eq!(DataType::from(99), DataType::Unknown);
    }
}
