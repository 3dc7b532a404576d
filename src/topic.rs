//! Sparkplug topic construction.
//!
//! Birth topics follow the Sparkplug B namespace:
//! - NBIRTH: `spBv1.0/{group_id}/NBIRTH/{edge_node_id}`
//! - DBIRTH: `spBv1.0/{group_id}/DBIRTH/{edge_node_id}/{device_id}`

use crate::error::{Error, Result};

/// The Sparkplug namespace prefix for all B-revision topics.
pub const NAMESPACE: &str = "spBv1.0";

/// The birth message types this crate publishes.
///
/// Data, death, command and STATE messages are deliberately not represented;
/// this crate only announces an edge node and its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Node Birth - announces the edge node itself
    NBirth,
    /// Device Birth - announces the device and its initial metric set
    DBirth,
}

impl MessageType {
    /// Returns the string representation used in MQTT topics.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::NBirth => "NBIRTH",
            MessageType::DBirth => "DBIRTH",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NBIRTH" => Ok(MessageType::NBirth),
            "DBIRTH" => Ok(MessageType::DBirth),
            _ => Err(Error::UnsupportedMessageType(s.to_string())),
        }
    }
}

/// The fixed identity of the edge node and its single device.
///
/// Immutable for the lifetime of a publisher; all topic strings derive
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeIdentity {
    /// Sparkplug group ID.
    pub group_id: String,
    /// Edge node identifier.
    pub edge_node_id: String,
    /// Device identifier.
    pub device_id: String,
}

impl EdgeIdentity {
    /// Creates a new identity.
    pub fn new(
        group_id: impl Into<String>,
        edge_node_id: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            edge_node_id: edge_node_id.into(),
            device_id: device_id.into(),
        }
    }

    /// Returns the topic string for the given message type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparkplug_edge::{EdgeIdentity, MessageType};
    ///
    /// let identity = EdgeIdentity::new("Plant1", "NodeA", "Dev1");
    /// assert_eq!(identity.topic(MessageType::NBirth), "spBv1.0/Plant1/NBIRTH/NodeA");
    /// assert_eq!(identity.topic(MessageType::DBirth), "spBv1.0/Plant1/DBIRTH/NodeA/Dev1");
    /// ```
    pub fn topic(&self, message_type: MessageType) -> String {
        match message_type {
            MessageType::NBirth => format!(
                "{}/{}/{}/{}",
                NAMESPACE,
                self.group_id,
                message_type.as_str(),
                self.edge_node_id
            ),
            MessageType::DBirth => format!(
                "{}/{}/{}/{}/{}",
                NAMESPACE,
                self.group_id,
                message_type.as_str(),
                self.edge_node_id,
                self.device_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nbirth_topic() {
        let identity = EdgeIdentity::new("Energy", "Gateway01", "Sensor01");
        assert_eq!(
            identity.topic(MessageType::NBirth),
            "spBv1.0/Energy/NBIRTH/Gateway01"
        );
    }

    #[test]
    fn test_dbirth_topic() {
        let identity = EdgeIdentity::new("Energy", "Gateway01", "Sensor01");
        assert_eq!(
            identity.topic(MessageType::DBirth),
            "spBv1.0/Energy/DBIRTH/Gateway01/Sensor01"
        );
    }

    #[test]
    fn test_message_type_display() {
        assert_eq!(MessageType::NBirth.to_string(), "NBIRTH");
        assert_eq!(MessageType::DBirth.to_string(), "DBIRTH");
    }

    #[test]
    fn test_message_type_from_str() {
        use std::str::FromStr;

        assert_eq!(
            MessageType::from_str("NBIRTH").unwrap(),
            MessageType::NBirth
        );
        assert_eq!(
            MessageType::from_str("DBIRTH").unwrap(),
            MessageType::DBirth
        );
        assert!(MessageType::from_str("NDATA").is_err());
    }
}
