//! Broker connection through the module's built-in MQTT client.

use crate::command::mqtt::types::{MqttParameter, QoS};
use crate::command::mqtt::{Connect, Disconnect, GetMqttParameters, GetMqttState, PublishMessage};
use crate::error::Error;
use crate::modem::Modem;
use crate::traits::{Clock, Transport};

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    /// Bring the module's MQTT parameters in line with the configured ones.
    ///
    /// Only parameters that differ from what the module reports are written.
    /// Returns how many were.
    pub fn mqtt_sync_parameters(&mut self) -> Result<usize, Error> {
        let current = self.client.send(&GetMqttParameters)?;
        let wanted = self.config.mqtt.clone();
        let mut changes = heapless::Vec::<MqttParameter<'_>, 9>::new();

        // Capacity covers every parameter below
        if current.client_id != wanted.client_id {
            let _ = changes.push(MqttParameter::ClientId(&wanted.client_id));
        }
        if current.url != wanted.broker_url || current.port != wanted.port {
            let _ = changes.push(MqttParameter::Url {
                host: &wanted.broker_url,
                port: wanted.port,
            });
        }
        if current.username != wanted.username {
            let _ = changes.push(MqttParameter::Username(&wanted.username));
        }
        if current.password != wanted.password {
            let _ = changes.push(MqttParameter::Password(&wanted.password));
        }
        if current.keepalive != wanted.keepalive {
            let _ = changes.push(MqttParameter::KeepAlive(wanted.keepalive));
        }
        if current.clean_session != wanted.clean_session {
            let _ = changes.push(MqttParameter::CleanSession(wanted.clean_session));
        }
        if current.qos != wanted.qos {
            let _ = changes.push(MqttParameter::Qos(wanted.qos));
        }
        if current.retain != wanted.retain {
            let _ = changes.push(MqttParameter::Retain(wanted.retain));
        }
        if current.async_mode != wanted.async_mode {
            let _ = changes.push(MqttParameter::AsyncMode(wanted.async_mode));
        }

        for param in &changes {
            debug!("Updating MQTT parameter {}", param.tag());
            self.set_mqtt_parameter(*param)?;
        }

        self.mqtt_ready = true;
        Ok(changes.len())
    }

    /// Sync parameters and connect to the broker, unless already connected.
    pub fn mqtt_connect(&mut self) -> Result<(), Error> {
        let written = self.mqtt_sync_parameters()?;

        if self.client.send(&GetMqttState)?.is_connected() {
            if written > 0 {
                warn!("MQTT parameters changed while connected, reconnect to apply them");
            }
            debug!("MQTT already connected");
            return Ok(());
        }

        info!(
            "Connecting to MQTT broker {}:{}",
            self.config.mqtt.broker_url.as_str(),
            self.config.mqtt.port
        );
        self.client.send(&Connect)?;
        Ok(())
    }

    /// Publish `payload` on `topic`. The topic must be 1 to 128 bytes and the
    /// payload at most 1024 bytes.
    pub fn mqtt_publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Error> {
        let msg = PublishMessage {
            topic,
            payload,
            qos,
            retain,
        };
        msg.validate()?;
        self.client.publish(&msg)
    }

    /// Disconnect from the broker, if connected.
    pub fn mqtt_disconnect(&mut self) -> Result<(), Error> {
        if !self.client.send(&GetMqttState)?.is_connected() {
            return Ok(());
        }
        info!("Disconnecting from MQTT broker");
        self.client.send(&Disconnect)?;
        Ok(())
    }
}
