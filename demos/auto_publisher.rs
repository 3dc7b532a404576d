//! Auto-publish demo.
//!
//! Announces the node, then republishes a DBIRTH every 5 seconds with
//! jittered metric values until Ctrl-C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use sparkplug_edge::{
    AutoPublisher, BrokerConfig, EdgeIdentity, EdgePublisher, MetricSnapshot, Result,
};

fn main() -> Result<()> {
    env_logger::init();

    println!("Sparkplug B Auto Publisher");
    println!("==========================\n");

    let identity = EdgeIdentity::new("SolutionsPT", "Production", "Mixer1");
    let broker = BrokerConfig::new("localhost", 1883);

    let publisher = Arc::new(EdgePublisher::connect(identity, &broker)?);
    println!("[OK] Connected to {}:{}", broker.host, broker.port);

    publisher.publish_node_birth()?;
    println!("[OK] Published NBIRTH");

    let mut auto = AutoPublisher::new();
    let worker = Arc::clone(&publisher);
    auto.start(move || {
        let mut rng = rand::rng();
        let metrics = MetricSnapshot::new(
            25 + rng.random_range(-3..=3),
            60 + rng.random_range(-5..=5),
            200 + rng.random_range(-20..=20),
        );
        worker.publish_device_birth(&metrics)
    });
    println!("[OK] Auto DBIRTH started (5s interval), Ctrl-C to stop");

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .expect("failed to install Ctrl-C handler");

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(200));
    }

    auto.stop();
    println!("\n[OK] Auto DBIRTH stopped");

    Ok(())
}
