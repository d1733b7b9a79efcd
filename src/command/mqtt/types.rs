//! Argument and parameter types used by MQTT Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum QoS {
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
    #[at_arg(default)]
    Unknown = 255,
}

/// `<status>` of +SMSTATE
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MqttConnectionStatus {
    Disconnected = 0,
    Connected = 1,
    /// Connected, and the broker still held a session for this client
    ConnectedSessionPresent = 2,
    #[at_arg(default)]
    Unknown = 255,
}

impl MqttConnectionStatus {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::ConnectedSessionPresent)
    }
}

/// A single `AT+SMCONF` parameter and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MqttParameter<'a> {
    ClientId(&'a str),
    /// Broker host without scheme, and port
    Url { host: &'a str, port: u16 },
    /// Keep alive in seconds
    KeepAlive(u16),
    CleanSession(bool),
    Username(&'a str),
    Password(&'a str),
    Qos(QoS),
    /// Will topic
    Topic(&'a str),
    /// Will message
    Message(&'a str),
    Retain(bool),
    /// Incoming payloads reported in hex
    SubHex(bool),
    AsyncMode(bool),
}

impl MqttParameter<'_> {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ClientId(_) => "CLIENTID",
            Self::Url { .. } => "URL",
            Self::KeepAlive(_) => "KEEPTIME",
            Self::CleanSession(_) => "CLEANSS",
            Self::Username(_) => "USERNAME",
            Self::Password(_) => "PASSWORD",
            Self::Qos(_) => "QOS",
            Self::Topic(_) => "TOPIC",
            Self::Message(_) => "MESSAGE",
            Self::Retain(_) => "RETAIN",
            Self::SubHex(_) => "SUBHEX",
            Self::AsyncMode(_) => "ASYNCMODE",
        }
    }
}
