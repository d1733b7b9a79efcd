//! Responses for MQTT Commands
use atat::atat_derive::AtatResp;
use heapless::String;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType};
use crate::error::ParseError;

/// Value of the `URL:` line
#[derive(Debug, AtatResp)]
struct UrlRecord {
    #[at_arg(position = 0)]
    host: String<128>,
    #[at_arg(position = 1)]
    port: Option<u16>,
}

/// 17.2.1 AT+SMCONF Set MQTT Parameter
///
/// The read command reports one `TAG: value` line per parameter after a bare
/// `+SMCONF:` header. Tags that are not reported keep their default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttParameters {
    pub client_id: String<128>,
    pub url: String<128>,
    pub port: u16,
    pub keepalive: u16,
    pub username: String<64>,
    pub password: String<64>,
    pub clean_session: bool,
    pub qos: QoS,
    pub topic: String<128>,
    pub message: String<128>,
    pub retain: bool,
    pub sub_hex: bool,
    pub async_mode: bool,
}

impl atat::AtatResp for MqttParameters {}

impl Default for MqttParameters {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            url: String::new(),
            port: 0,
            keepalive: 0,
            username: String::new(),
            password: String::new(),
            clean_session: false,
            qos: QoS::AtMostOnce,
            topic: String::new(),
            message: String::new(),
            retain: false,
            sub_hex: false,
            async_mode: false,
        }
    }
}

impl MqttParameters {
    fn apply(&mut self, tag: &str, value: &str) -> Result<(), ParseError> {
        match tag {
            "CLIENTID" => self.client_id = parser::decode(value)?,
            "URL" => {
                parser::expect_fields(value, 1..=2)?;
                let url: UrlRecord = parser::decode(value)?;
                self.url = url.host;
                if let Some(port) = url.port {
                    self.port = port;
                }
            }
            "KEEPTIME" => self.keepalive = parser::decode(value)?,
            "CLEANSS" => self.clean_session = parser::flag(parser::decode(value)?)?,
            "USERNAME" => self.username = parser::decode(value)?,
            "PASSWORD" => self.password = parser::decode(value)?,
            "QOS" => self.qos = parser::decode(value)?,
            "TOPIC" => self.topic = parser::decode(value)?,
            "MESSAGE" => self.message = parser::decode(value)?,
            "RETAIN" => self.retain = parser::flag(parser::decode(value)?)?,
            "SUBHEX" => self.sub_hex = parser::flag(parser::decode(value)?)?,
            "ASYNCMODE" => self.async_mode = parser::flag(parser::decode(value)?)?,
            _ => {}
        }
        Ok(())
    }
}

impl AtResponse for MqttParameters {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        let mut res = Self::default();
        if ty != CommandType::Read {
            return Ok(res);
        }

        let (_, report) = raw.split_once("+SMCONF:").ok_or(ParseError::MissingPrefix)?;
        for line in report.split(['\r', '\n']) {
            if let Some((tag, value)) = line.split_once(':') {
                res.apply(tag.trim(), value.trim())?;
            }
        }
        Ok(res)
    }
}

/// 17.2.7 AT+SMSTATE Inquire MQTT Connection Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttState {
    #[at_arg(position = 0)]
    pub status: MqttConnectionStatus,
}

impl Default for MqttState {
    fn default() -> Self {
        Self {
            status: MqttConnectionStatus::Unknown,
        }
    }
}

impl MqttState {
    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}

impl AtResponse for MqttState {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        if ty != CommandType::Read {
            return Ok(Self::default());
        }
        let line = parser::data_line(raw, "+SMSTATE:")?;
        parser::expect_fields(line, 1..=1)?;
        parser::decode(line)
    }
}
