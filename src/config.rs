//! Application facing configuration of the modem.
//!
//! Values are plain data; nothing here talks to the module. String fields are
//! bounded and setters fail with [`Error::InvalidArgument`] instead of
//! truncating.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::command::mqtt::types::QoS;
use crate::command::psn::types::{AuthenticationType, CnIpType, PdpType};
use crate::error::Error;

pub const BROKER_URL_MAX_LEN: usize = 128;
pub const CLIENT_ID_MAX_LEN: usize = 32;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MAX_LEN: usize = 32;

/// Copy `value` into a bounded string that will later be sent quoted.
fn bounded<const N: usize>(value: &str) -> Result<String<N>, Error> {
    if value.contains('"') {
        return Err(Error::InvalidArgument);
    }
    String::try_from(value).map_err(|_| Error::InvalidArgument)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub uart: UartConfig,
    pub mqtt: MqttConfig,
}

impl Config {
    pub fn new(uart: UartConfig, mqtt: MqttConfig) -> Self {
        Self { uart, mqtt }
    }
}

/// Serial port the module is wired to.
///
/// TX and RX are named from the module's side, so they are swapped from the
/// host's point of view. The driver itself never opens the port; this only
/// describes it for the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    pub port: u8,
    pub tx_pin: u8,
    pub rx_pin: u8,
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            port: 1,
            tx_pin: 17,
            rx_pin: 16,
            baud_rate: 115_200,
        }
    }
}

impl UartConfig {
    pub fn new(port: u8, tx_pin: u8, rx_pin: u8) -> Self {
        Self {
            port,
            tx_pin,
            rx_pin,
            ..Self::default()
        }
    }

    pub fn with_baud_rate(self, baud_rate: u32) -> Self {
        Self { baud_rate, ..self }
    }
}

/// Broker connection of the module's built-in MQTT client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttConfig {
    /// Host only, without `mqtt://` scheme or port
    pub broker_url: String<BROKER_URL_MAX_LEN>,
    pub port: u16,
    pub client_id: String<CLIENT_ID_MAX_LEN>,
    pub username: String<USERNAME_MAX_LEN>,
    pub password: String<PASSWORD_MAX_LEN>,
    /// Keep alive in seconds
    pub keepalive: u16,
    pub clean_session: bool,
    pub qos: QoS,
    pub retain: bool,
    pub async_mode: bool,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_url: String::new(),
            port: 1883,
            client_id: String::new(),
            username: String::new(),
            password: String::new(),
            keepalive: 60,
            clean_session: false,
            qos: QoS::AtMostOnce,
            retain: false,
            async_mode: false,
        }
    }
}

impl MqttConfig {
    pub fn new(broker_url: &str, port: u16) -> Result<Self, Error> {
        if broker_url.is_empty() || broker_url.contains("://") {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            broker_url: bounded(broker_url)?,
            port,
            ..Self::default()
        })
    }

    pub fn with_client_id(self, client_id: &str) -> Result<Self, Error> {
        Ok(Self {
            client_id: bounded(client_id)?,
            ..self
        })
    }

    pub fn with_credentials(self, username: &str, password: &str) -> Result<Self, Error> {
        Ok(Self {
            username: bounded(username)?,
            password: bounded(password)?,
            ..self
        })
    }

    pub fn with_keepalive(self, keepalive: u16) -> Self {
        Self { keepalive, ..self }
    }

    pub fn with_clean_session(self, clean_session: bool) -> Self {
        Self {
            clean_session,
            ..self
        }
    }

    pub fn with_qos(self, qos: QoS) -> Result<Self, Error> {
        if qos == QoS::Unknown {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { qos, ..self })
    }

    pub fn with_retain(self, retain: bool) -> Self {
        Self { retain, ..self }
    }

    pub fn with_async_mode(self, async_mode: bool) -> Self {
        Self { async_mode, ..self }
    }
}

/// Data bearer brought up by
/// [`Modem::connect_to_network_bearer`](crate::modem::Modem::connect_to_network_bearer).
///
/// `cid` selects the +CGDCONT context the network attaches with, `pdp_idx` the
/// APP context of the internal IP stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BearerConfig {
    pub cid: u8,
    pub pdp_type: PdpType,
    pub pdp_idx: u8,
    pub ip_type: CnIpType,
    pub apn: String<100>,
    pub username: String<64>,
    pub password: String<64>,
    pub auth: AuthenticationType,
}

impl Default for BearerConfig {
    fn default() -> Self {
        Self {
            cid: 1,
            pdp_type: PdpType::Ip,
            pdp_idx: 0,
            ip_type: CnIpType::Ipv4,
            apn: String::new(),
            username: String::new(),
            password: String::new(),
            auth: AuthenticationType::None,
        }
    }
}

impl BearerConfig {
    pub fn new(apn: &str) -> Result<Self, Error> {
        Ok(Self {
            apn: bounded(apn)?,
            ..Self::default()
        })
    }

    pub fn with_cid(self, cid: u8) -> Result<Self, Error> {
        if !(1..=15).contains(&cid) {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { cid, ..self })
    }

    pub fn with_pdp_idx(self, pdp_idx: u8) -> Result<Self, Error> {
        if pdp_idx > 3 {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { pdp_idx, ..self })
    }

    pub fn with_pdp_type(self, pdp_type: PdpType, ip_type: CnIpType) -> Self {
        Self {
            pdp_type,
            ip_type,
            ..self
        }
    }

    pub fn with_credentials(
        self,
        username: &str,
        password: &str,
        auth: AuthenticationType,
    ) -> Result<Self, Error> {
        Ok(Self {
            username: bounded(username)?,
            password: bounded(password)?,
            auth,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mqtt_builder() {
        let config = MqttConfig::new("broker.example.com", 8883)
            .and_then(|c| c.with_client_id("sensor-01"))
            .and_then(|c| c.with_credentials("user", "secret"))
            .unwrap()
            .with_keepalive(120);
        assert_eq!(config.broker_url.as_str(), "broker.example.com");
        assert_eq!(config.port, 8883);
        assert_eq!(config.client_id.as_str(), "sensor-01");
        assert_eq!(config.keepalive, 120);
        assert!(!config.clean_session);
    }

    #[test]
    fn mqtt_rejects_bad_input() {
        assert_eq!(
            MqttConfig::new("mqtt://broker.example.com", 1883),
            Err(Error::InvalidArgument)
        );
        let long = "x".repeat(CLIENT_ID_MAX_LEN + 1);
        assert_eq!(
            MqttConfig::default().with_client_id(&long),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            MqttConfig::default().with_credentials("a\"b", ""),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn bearer_bounds() {
        let bearer = BearerConfig::new("iot.1nce.net").unwrap();
        assert_eq!(bearer.cid, 1);
        assert_eq!(bearer.pdp_idx, 0);
        assert_eq!(bearer.clone().with_cid(0), Err(Error::InvalidArgument));
        assert_eq!(bearer.with_pdp_idx(4), Err(Error::InvalidArgument));
    }
}
