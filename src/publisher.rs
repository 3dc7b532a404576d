//! Edge publisher: one long-lived MQTT connection per identity.
//!
//! The publisher owns a synchronous `rumqttc` client and a background thread
//! that services the connection for the publisher's whole lifetime. A
//! connection is established once and reused across sends; the event loop
//! reconnects on its own when the session drops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};
use rumqttc::{Client, ConnectReturnCode, Connection, Event, MqttOptions, Packet, Transport};

use crate::error::{Error, Result};
use crate::payload::{BirthBuilder, PublishEnvelope, Qos};
use crate::topic::EdgeIdentity;
use crate::types::MetricSnapshot;

/// MQTT keep-alive interval for broker sessions.
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// How long `connect` waits for the broker's CONNACK before giving up.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request-channel capacity between the client handle and the event loop.
const CHANNEL_CAPACITY: usize = 16;

/// Broker endpoint configuration.
///
/// Credentials apply only when both username and password are set. TLS uses
/// the platform's default trust store; there is no certificate pinning or
/// mutual TLS.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker hostname or IP address.
    pub host: String,
    /// Broker port (1-65535).
    pub port: u16,
    /// Optional username.
    pub username: Option<String>,
    /// Optional password.
    pub password: Option<String>,
    /// Whether to connect over TLS with default trust settings.
    pub use_tls: bool,
    /// MQTT keep-alive interval.
    pub keep_alive: Duration,
    /// Deadline for the initial CONNACK.
    pub connect_timeout: Duration,
}

impl BrokerConfig {
    /// Creates a configuration for a plain connection to `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
            use_tls: false,
            keep_alive: DEFAULT_KEEP_ALIVE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Sets username/password authentication.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Enables TLS with the default trust store.
    pub fn with_tls(mut self) -> Self {
        self.use_tls = true;
        self
    }
}

/// A Sparkplug birth publisher for one edge node and its device.
///
/// # Example
///
/// ```no_run
/// use sparkplug_edge::{BrokerConfig, EdgeIdentity, EdgePublisher, MetricSnapshot};
///
/// # fn main() -> Result<(), sparkplug_edge::Error> {
/// let identity = EdgeIdentity::new("Plant1", "NodeA", "Dev1");
/// let broker = BrokerConfig::new("localhost", 1883);
///
/// let publisher = EdgePublisher::connect(identity, &broker)?;
/// publisher.publish_node_birth()?;
/// publisher.publish_device_birth(&MetricSnapshot::new(10, 50, 100))?;
/// # Ok(())
/// # }
/// ```
pub struct EdgePublisher {
    builder: BirthBuilder,
    client: Client,
    connected: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    loop_handle: Option<thread::JoinHandle<()>>,
}

impl EdgePublisher {
    /// Connects to the broker and starts the background event loop.
    ///
    /// Blocks until the broker acknowledges the session or
    /// `broker.connect_timeout` expires. A refused CONNACK (bad credentials,
    /// unacceptable protocol version) and a transport failure surface as
    /// distinct errors.
    pub fn connect(identity: EdgeIdentity, broker: &BrokerConfig) -> Result<Self> {
        if broker.port == 0 {
            return Err(Error::InvalidPort(broker.port));
        }

        let client_id = format!("sparkplug-edge-{}", identity.edge_node_id);
        let mut options = MqttOptions::new(client_id, &broker.host, broker.port);
        options.set_keep_alive(broker.keep_alive);
        if let (Some(username), Some(password)) = (&broker.username, &broker.password) {
            options.set_credentials(username.clone(), password.clone());
        }
        if broker.use_tls {
            options.set_transport(Transport::tls_with_default_config());
        }

        let (client, connection) = Client::new(options, CHANNEL_CAPACITY);
        let connected = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel();

        let loop_handle = {
            let connected = Arc::clone(&connected);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || event_loop(connection, connected, shutdown, ready_tx))
        };

        match ready_rx.recv_timeout(broker.connect_timeout) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                // The event loop breaks after reporting a startup failure.
                let _ = loop_handle.join();
                return Err(err);
            }
            Err(_) => {
                // Leave the thread to wind itself down; joining here could
                // block on a hung TCP attempt.
                shutdown.store(true, Ordering::Relaxed);
                let _ = client.disconnect();
                return Err(Error::Timeout {
                    operation: "connect",
                    timeout: broker.connect_timeout,
                });
            }
        }

        Ok(Self {
            builder: BirthBuilder::new(identity),
            client,
            connected,
            shutdown,
            loop_handle: Some(loop_handle),
        })
    }

    /// The identity this publisher announces.
    pub fn identity(&self) -> &EdgeIdentity {
        self.builder.identity()
    }

    /// The builder used to construct this publisher's envelopes.
    pub fn builder(&self) -> &BirthBuilder {
        &self.builder
    }

    /// Whether the broker session is currently established.
    ///
    /// Maintained by the event loop; goes false on session loss and true
    /// again once the automatic reconnect succeeds.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Publishes an NBIRTH stamped with the current time.
    pub fn publish_node_birth(&self) -> Result<()> {
        let envelope = self.builder.node_birth();
        self.send("NBIRTH", &envelope)
    }

    /// Publishes a DBIRTH carrying the given snapshot, stamped with the
    /// current time.
    pub fn publish_device_birth(&self, metrics: &MetricSnapshot) -> Result<()> {
        let envelope = self.builder.device_birth(metrics);
        self.send("DBIRTH", &envelope)
    }

    /// Publishes a pre-built envelope.
    ///
    /// The message is handed to the transport at the envelope's QoS; no
    /// acknowledgement is awaited beyond that delivery contract.
    pub fn publish(&self, envelope: &PublishEnvelope) -> Result<()> {
        self.send("message", envelope)
    }

    fn send(&self, message_type: &'static str, envelope: &PublishEnvelope) -> Result<()> {
        debug!(
            "publishing {} to {} ({} bytes)",
            message_type,
            envelope.topic,
            envelope.payload.len()
        );
        self.client
            .publish(
                envelope.topic.as_str(),
                envelope.qos.into(),
                envelope.retain,
                envelope.payload.clone(),
            )
            .map_err(|err| Error::PublishFailed {
                message_type,
                details: err.to_string(),
            })
    }
}

impl Drop for EdgePublisher {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.client.disconnect();
        if let Some(handle) = self.loop_handle.take() {
            let _ = handle.join();
        }
    }
}

impl From<Qos> for rumqttc::QoS {
    fn from(qos: Qos) -> Self {
        match qos {
            Qos::AtMostOnce => rumqttc::QoS::AtMostOnce,
            Qos::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
            Qos::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
        }
    }
}

/// Services the MQTT connection until shutdown.
///
/// Reports the outcome of the initial connection attempt through `ready`
/// exactly once; after that, session loss is logged and left to the
/// iterator's automatic reconnect.
fn event_loop(
    mut connection: Connection,
    connected: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    ready: mpsc::Sender<Result<()>>,
) {
    let mut ready = Some(ready);
    for event in connection.iter() {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }
        match event {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => match ack.code {
                ConnectReturnCode::Success => {
                    connected.store(true, Ordering::Relaxed);
                    debug!("broker session established");
                    if let Some(tx) = ready.take() {
                        let _ = tx.send(Ok(()));
                    }
                }
                code => {
                    connected.store(false, Ordering::Relaxed);
                    if let Some(tx) = ready.take() {
                        let _ = tx.send(Err(Error::ConnectionRefused {
                            reason: format!("{code:?}"),
                        }));
                        break;
                    }
                    warn!("broker refused reconnection: {code:?}");
                }
            },
            Ok(event) => trace!("mqtt event: {event:?}"),
            Err(err) => {
                connected.store(false, Ordering::Relaxed);
                if let Some(tx) = ready.take() {
                    let _ = tx.send(Err(Error::ConnectionFailed(err.to_string())));
                    break;
                }
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                warn!("mqtt connection lost: {err}");
                // The iterator retries the connection on its next pass;
                // don't spin while the broker stays down.
                thread::sleep(Duration::from_secs(1));
            }
        }
    }
    connected.store(false, Ordering::Relaxed);
}
