//! Broker connection: a rumqttc event loop forwarding publishes.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, Publish, QoS};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use myhome_app::ports::BrokerGateway;
use myhome_domain::channel::{BrokerEndpoint, ChannelMessage};
use myhome_domain::error::MyHomeError;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// A running connection. Dropping it leaves the event loop running until the
/// receiving side of the channel is dropped; [`ChannelConnection::close`]
/// stops it right away.
pub struct ChannelConnection {
    client: AsyncClient,
    task: JoinHandle<()>,
}

impl ChannelConnection {
    /// Disconnect from the broker and stop the event loop.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::EventLoop`] when the event loop task panicked.
    pub async fn close(self) -> Result<(), MqttError> {
        if let Err(err) = self.client.try_disconnect() {
            tracing::debug!(error = %err, "disconnect request not queued");
        }
        self.task.abort();
        match self.task.await {
            Err(err) if err.is_panic() => Err(MqttError::EventLoop(err)),
            _ => Ok(()),
        }
    }
}

/// Connect to `endpoint` and forward every publish on `topics` to `sink`.
///
/// The connection is driven by a spawned task that re-subscribes after each
/// reconnect and ends once `sink` is closed.
pub fn connect(
    config: &MqttConfig,
    endpoint: &BrokerEndpoint,
    topics: Vec<String>,
    sink: mpsc::Sender<ChannelMessage>,
) -> ChannelConnection {
    let (client, event_loop) = AsyncClient::new(options(config, endpoint), config.capacity);
    tracing::info!(host = %endpoint.host, port = endpoint.port, "connecting to broker");
    let task = tokio::spawn(run(
        client.clone(),
        event_loop,
        topics,
        sink,
        config.reconnect_delay(),
    ));
    ChannelConnection { client, task }
}

/// Ask the dashboard where its broker lives and connect to it.
///
/// A `localhost` broker is resolved against `dashboard_host`, then the
/// configured host and port overrides apply.
///
/// # Errors
///
/// Returns the gateway error when the broker settings are unavailable.
pub async fn bootstrap<G: BrokerGateway>(
    gateway: &G,
    config: &MqttConfig,
    dashboard_host: &str,
    topics: Vec<String>,
    sink: mpsc::Sender<ChannelMessage>,
) -> Result<ChannelConnection, MyHomeError> {
    let announced = gateway.broker_endpoint().await?;
    let endpoint = config.endpoint(announced.resolve(dashboard_host));
    Ok(connect(config, &endpoint, topics, sink))
}

fn options(config: &MqttConfig, endpoint: &BrokerEndpoint) -> MqttOptions {
    let mut options = MqttOptions::new(&config.client_id, &endpoint.host, endpoint.port);
    options.set_keep_alive(config.keep_alive());
    options
}

fn to_message(publish: Publish) -> ChannelMessage {
    ChannelMessage::new(publish.topic, publish.payload.to_vec())
}

async fn run(
    client: AsyncClient,
    mut event_loop: EventLoop,
    topics: Vec<String>,
    sink: mpsc::Sender<ChannelMessage>,
    reconnect_delay: Duration,
) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!("connected to broker");
                subscribe(&client, &topics);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if sink.send(to_message(publish)).await.is_err() {
                    tracing::debug!("channel receiver dropped, leaving the broker");
                    return;
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "broker connection lost");
                if sink.is_closed() {
                    return;
                }
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

/// Queue subscriptions without waiting: the event loop that would drain the
/// request queue is the caller.
fn subscribe(client: &AsyncClient, topics: &[String]) {
    for topic in topics {
        match client.try_subscribe(topic, QoS::AtMostOnce) {
            Ok(()) => tracing::debug!(%topic, "subscribed"),
            Err(err) => tracing::warn!(%topic, error = %err, "subscription not queued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myhome_domain::channel::DEVICE_UPDATED_TOPIC;

    fn endpoint() -> BrokerEndpoint {
        BrokerEndpoint {
            host: "alice.local".to_string(),
            port: 1884,
        }
    }

    #[test]
    fn should_build_options_from_config() {
        let options = options(&MqttConfig::default(), &endpoint());
        assert_eq!(options.client_id(), "ProjectAliceInterface");
        assert_eq!(options.broker_address(), ("alice.local".to_string(), 1884));
        assert_eq!(options.keep_alive(), Duration::from_secs(30));
    }

    #[test]
    fn should_convert_publish_to_channel_message() {
        let publish = Publish::new(
            DEVICE_UPDATED_TOPIC,
            QoS::AtMostOnce,
            br#"{"type":"status","id":7}"#.to_vec(),
        );
        let message = to_message(publish);
        assert_eq!(message.topic, DEVICE_UPDATED_TOPIC);
        assert_eq!(message.payload, br#"{"type":"status","id":7}"#.to_vec());
    }

    struct FakeBroker(Option<BrokerEndpoint>);

    impl BrokerGateway for FakeBroker {
        async fn broker_endpoint(&self) -> Result<BrokerEndpoint, MyHomeError> {
            self.0.clone().ok_or_else(|| {
                myhome_domain::error::RejectedError::new("MQTT settings unavailable").into()
            })
        }
    }

    #[tokio::test]
    async fn should_resolve_announced_localhost_broker() {
        let (sink, _receiver) = mpsc::channel(4);
        let gateway = FakeBroker(Some(BrokerEndpoint {
            host: "localhost".to_string(),
            port: 9,
        }));
        let connection = bootstrap(&gateway, &MqttConfig::default(), "127.0.0.1", Vec::new(), sink)
            .await
            .unwrap();
        connection.close().await.unwrap();
    }

    #[tokio::test]
    async fn should_fail_bootstrap_without_broker_settings() {
        let (sink, _receiver) = mpsc::channel(4);
        let result = bootstrap(&FakeBroker(None), &MqttConfig::default(), "alice.local", Vec::new(), sink).await;
        assert!(matches!(result, Err(MyHomeError::Rejected(_))));
    }

    #[tokio::test]
    async fn should_stop_cleanly_without_broker() {
        let (sink, _receiver) = mpsc::channel(4);
        let config = MqttConfig {
            reconnect_delay_secs: 0,
            ..MqttConfig::default()
        };
        let unreachable = BrokerEndpoint {
            host: "127.0.0.1".to_string(),
            port: 9,
        };
        let connection = connect(
            &config,
            &unreachable,
            vec![DEVICE_UPDATED_TOPIC.to_string()],
            sink,
        );
        tokio::task::yield_now().await;
        connection.close().await.unwrap();
    }
}
