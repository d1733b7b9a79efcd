//! ### 17 - MQTT Commands
//!
//! The SIM7080 carries its own MQTT client, bound to APP PDP context 0. It is
//! configured one parameter at a time with +SMCONF, after which +SMCONN opens
//! the broker connection with whatever configuration is stored.

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{MqttParameters, MqttState};
use types::QoS;

use super::{quotable, AtResponse, CommandType, NoResponse};
use crate::error::Error;

/// Longest topic the module accepts.
pub const MAX_TOPIC_LEN: usize = 128;
/// Longest payload a single +SMPUB carries.
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// 17.2.1 AT+SMCONF Set MQTT Parameter
///
/// The report spans one line per parameter, so it is not a single record.
#[derive(Debug, Clone)]
pub struct GetMqttParameters;

impl atat::AtatCmd for GetMqttParameters {
    type Response = MqttParameters;

    const MAX_LEN: usize = b"AT+SMCONF?\r\n".len();

    const MAX_TIMEOUT_MS: u32 = 5000;

    fn write(&self, buf: &mut [u8]) -> usize {
        let cmd = b"AT+SMCONF?\r\n";
        buf[..cmd.len()].copy_from_slice(cmd);
        cmd.len()
    }

    fn parse(
        &self,
        resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        let raw = resp
            .ok()
            .and_then(|r| core::str::from_utf8(r).ok())
            .ok_or(atat::Error::Parse)?;
        MqttParameters::parse(raw, CommandType::Read, None).map_err(|_| atat::Error::Parse)
    }
}

/// 17.2.1 AT+SMCONF Set MQTT Parameter
///
/// String valued parameters: `CLIENTID`, `USERNAME`, `PASSWORD`, `TOPIC` and
/// `MESSAGE`.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMCONF", NoResponse, timeout_ms = 5000)]
pub struct SetMqttText<'a> {
    #[at_arg(position = 0, len = 16)]
    pub tag: &'a str,
    #[at_arg(position = 1, len = 128)]
    pub value: &'a str,
}

/// 17.2.1 AT+SMCONF Set MQTT Parameter
///
/// `URL` takes the broker host and port.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMCONF", NoResponse, timeout_ms = 5000)]
pub struct SetMqttUrl<'a> {
    #[at_arg(position = 0, len = 16)]
    pub tag: &'a str,
    #[at_arg(position = 1, len = 128)]
    pub host: &'a str,
    #[at_arg(position = 2)]
    pub port: u16,
}

/// 17.2.1 AT+SMCONF Set MQTT Parameter
///
/// Numeric parameters, flags included as 0/1.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMCONF", NoResponse, timeout_ms = 5000)]
pub struct SetMqttNumber<'a> {
    #[at_arg(position = 0, len = 16)]
    pub tag: &'a str,
    #[at_arg(position = 1)]
    pub value: u16,
}

/// 17.2.2 AT+SMCONN MQTT Connection
///
/// Connects with the parameters stored through +SMCONF. Can take up to the
/// broker connect timeout to answer.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMCONN", NoResponse, timeout_ms = 60000)]
pub struct Connect;

/// 17.2.4 AT+SMDISC Disconnection MQTT
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMDISC", NoResponse, timeout_ms = 5000)]
pub struct Disconnect;

/// 17.2.7 AT+SMSTATE Inquire MQTT Connection Status
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMSTATE?", MqttState, timeout_ms = 5000)]
pub struct GetMqttState;

/// 17.2.3 AT+SMPUB Send Packet
///
/// Only the header goes out as the command line. The module answers with a
/// `>` prompt and then expects exactly `payload.len()` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishMessage<'a> {
    pub topic: &'a str,
    pub payload: &'a [u8],
    pub qos: QoS,
    pub retain: bool,
}

impl<'a> PublishMessage<'a> {
    pub fn validate(&self) -> Result<(), Error> {
        if self.topic.is_empty()
            || self.topic.len() > MAX_TOPIC_LEN
            || self.payload.len() > MAX_PAYLOAD_LEN
            || self.qos == QoS::Unknown
        {
            return Err(Error::InvalidArgument);
        }
        quotable(self.topic)?;
        Ok(())
    }

    pub(crate) fn header(&self) -> Result<PublishHeader<'a>, Error> {
        self.validate()?;
        Ok(PublishHeader {
            topic: self.topic,
            // Bounded by MAX_PAYLOAD_LEN
            len: self.payload.len() as u16,
            qos: self.qos,
            retain: u8::from(self.retain),
        })
    }
}

/// Command line of the first +SMPUB phase.
///
/// Only [`AtClient::publish`](crate::client::AtClient::publish) sends it: it
/// ends on the `>` prompt and has to be followed by the payload.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+SMPUB", NoResponse, timeout_ms = 5000)]
pub(crate) struct PublishHeader<'a> {
    #[at_arg(position = 0, len = 128)]
    pub topic: &'a str,
    #[at_arg(position = 1)]
    pub len: u16,
    #[at_arg(position = 2)]
    pub qos: QoS,
    #[at_arg(position = 3)]
    pub retain: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atat::AtatCmd;

    fn encoded<A: AtatCmd>(cmd: &A) -> std::string::String {
        let mut buf = [0u8; 512];
        let n = cmd.write(&mut buf);
        std::string::String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn parameter_lines() {
        assert_eq!(
            encoded(&SetMqttUrl {
                tag: "URL",
                host: "broker.example.com",
                port: 1883
            }),
            "AT+SMCONF=\"URL\",\"broker.example.com\",1883\r\n"
        );
        assert_eq!(
            encoded(&SetMqttNumber {
                tag: "KEEPTIME",
                value: 60
            }),
            "AT+SMCONF=\"KEEPTIME\",60\r\n"
        );
        assert_eq!(
            encoded(&SetMqttText {
                tag: "CLIENTID",
                value: "dev"
            }),
            "AT+SMCONF=\"CLIENTID\",\"dev\"\r\n"
        );
        assert_eq!(encoded(&GetMqttParameters), "AT+SMCONF?\r\n");
    }

    #[test]
    fn publish_header() {
        let msg = PublishMessage {
            topic: "sensors/t",
            payload: b"21.5",
            qos: QoS::AtLeastOnce,
            retain: false,
        };
        assert_eq!(
            encoded(&msg.header().unwrap()),
            "AT+SMPUB=\"sensors/t\",4,1,0\r\n"
        );
        let msg = PublishMessage {
            qos: QoS::Unknown,
            ..msg
        };
        assert_eq!(msg.header().err(), Some(Error::InvalidArgument));
    }

    #[test]
    fn publish_bounds() {
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        let msg = PublishMessage {
            topic: "t",
            payload: &payload,
            qos: QoS::AtMostOnce,
            retain: false,
        };
        assert_eq!(msg.validate(), Err(Error::InvalidArgument));
        assert_eq!(
            PublishMessage {
                topic: "",
                payload: &[],
                ..msg
            }
            .validate(),
            Err(Error::InvalidArgument)
        );
        assert!(PublishMessage {
            payload: &payload[..MAX_PAYLOAD_LEN],
            ..msg
        }
        .validate()
        .is_ok());
    }
}
