//! One-shot birth publisher demo.
//!
//! Publishes an NBIRTH and a DBIRTH, either from a saved config file passed
//! as the first argument or from built-in defaults.

use sparkplug_edge::{
    preview_json, BrokerConfig, EdgeIdentity, EdgePublisher, MetricSnapshot, Result, StoredConfig,
};

fn main() -> Result<()> {
    env_logger::init();

    println!("Sparkplug B Birth Publisher");
    println!("===========================\n");

    let (identity, broker, metrics) = match std::env::args().nth(1) {
        Some(path) => {
            let config = StoredConfig::load(&path)?;
            println!("[OK] Loaded config from {}", path);
            (config.identity(), config.broker_config(), config.metrics())
        }
        None => (
            EdgeIdentity::new("SolutionsPT", "Production", "Mixer1"),
            BrokerConfig::new("localhost", 1883),
            MetricSnapshot::new(25, 60, 200),
        ),
    };

    println!("DBIRTH preview:\n{}\n", preview_json(&metrics)?);

    let publisher = EdgePublisher::connect(identity, &broker)?;
    println!("[OK] Connected to {}:{}", broker.host, broker.port);

    publisher.publish_node_birth()?;
    println!("[OK] Published NBIRTH");

    publisher.publish_device_birth(&metrics)?;
    println!("[OK] Published DBIRTH");

    Ok(())
}
