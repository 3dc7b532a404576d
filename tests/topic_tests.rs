//! Tests for topic construction

use sparkplug_edge::{EdgeIdentity, MessageType};

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
fn test_concrete_scenario_topics() {
    // Identity = (Plant1, NodeA, Dev1)
    let identity = EdgeIdentity::new("Plant1", "NodeA", "Dev1");
    assert_eq!(
        identity.topic(MessageType::NBirth),
        "spBv1.0/Plant1/NBIRTH/NodeA"
    );
    assert_eq!(
        identity.topic(MessageType::DBirth),
        "spBv1.0/Plant1/DBIRTH/NodeA/Dev1"
    );
}

#[test]
fn test_special_characters_in_ids() {
    let identity = EdgeIdentity::new("Group-1", "Node_01", "Device.2");
    assert_eq!(
        identity.topic(MessageType::DBirth),
        "spBv1.0/Group-1/DBIRTH/Node_01/Device.2"
    );
}

#[test]
fn test_message_type_display() {
    assert_eq!(MessageType::NBirth.to_string(), "NBIRTH");
    assert_eq!(MessageType::DBirth.to_string(), "DBIRTH");
}

#[test]
fn test_unsupported_message_type() {
    use std::str::FromStr;

    assert!(MessageType::from_str("NDATA").is_err());
    assert!(MessageType::from_str("DDEATH").is_err());
    assert!(MessageType::from_str("STATE").is_err());
}

#[test]
fn test_identity_construction() {
    let identity = EdgeIdentity::new(String::from("Plant1"), "NodeA", "Dev1");
    assert_eq!(identity.group_id, "Plant1");
    assert_eq!(identity.edge_node_id, "NodeA");
    assert_eq!(identity.device_id, "Dev1");
}
