//! Responses for Packet Switched Data Services Commands
use core::str::FromStr;

use atat::atat_derive::AtatResp;
use heapless::{String, Vec};
use no_std_net::IpAddr;
use serde::Deserialize;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType};
use crate::error::ParseError;

/// One context of the +CGDCONT read command
#[derive(Debug, Clone, PartialEq, Eq, Default, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PdpContext {
    #[at_arg(position = 0)]
    pub cid: u8,
    #[at_arg(position = 1)]
    pub pdp_type: PdpType,
    #[at_arg(position = 2)]
    pub apn: String<100>,
    #[at_arg(position = 3)]
    pub address: String<64>,
    #[at_arg(position = 4)]
    pub d_comp: u8,
    #[at_arg(position = 5)]
    pub h_comp: u8,
}

impl PdpContext {
    /// Fields past `<h_comp>` are reported by some firmware and ignored.
    fn from_line(line: &str) -> Result<Self, ParseError> {
        if parser::field_count(line) < 6 {
            return Err(ParseError::FieldCountMismatch);
        }
        let ctx: Self = parser::decode(parser::leading_fields(line, 6))?;
        parser::bounded(ctx.cid, 1..=15)?;
        parser::bounded(ctx.d_comp, 0..=2)?;
        parser::bounded(ctx.h_comp, 0..=4)?;
        Ok(ctx)
    }
}

/// `<cid>,<PDP_type>,<APN>` as sent with the write command
#[derive(Debug, AtatResp)]
struct DefinedContext {
    #[at_arg(position = 0)]
    cid: u8,
    #[at_arg(position = 1)]
    pdp_type: Option<PdpType>,
    #[at_arg(position = 2)]
    apn: Option<String<100>>,
}

/// 18.4 AT+CGDCONT Define PDP Context
///
/// On write the requested `<cid>,<PDP_type>,<APN>` is reported back as the
/// single record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "PdpContext")]
pub struct PdpContextDefinitions {
    pub contexts: Vec<PdpContext, 8>,
}

impl atat::AtatResp for PdpContextDefinitions {}

impl From<PdpContext> for PdpContextDefinitions {
    fn from(ctx: PdpContext) -> Self {
        let mut contexts = Vec::new();
        // Capacity is at least one
        let _ = contexts.push(ctx);
        Self { contexts }
    }
}

impl PdpContextDefinitions {
    pub fn context(&self, cid: u8) -> Option<&PdpContext> {
        self.contexts.iter().find(|c| c.cid == cid)
    }
}

impl AtResponse for PdpContextDefinitions {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let mut contexts = Vec::new();
                for line in parser::data_lines(raw, "+CGDCONT:") {
                    contexts
                        .push(PdpContext::from_line(line)?)
                        .map_err(|_| ParseError::OutOfRange)?;
                }
                Ok(Self { contexts })
            }
            CommandType::Write => Ok(args
                .and_then(|a| parser::decode::<DefinedContext>(a).ok())
                .filter(|d| (1..=15).contains(&d.cid))
                .map(|d| {
                    Self::from(PdpContext {
                        cid: d.cid,
                        pdp_type: d.pdp_type.unwrap_or_default(),
                        apn: d.apn.unwrap_or_default(),
                        ..PdpContext::default()
                    })
                })
                .unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

/// 18.13 AT+CGATT Attach or Detach from GPRS Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GprsAttached {
    #[at_arg(position = 0)]
    pub state: GprsAttachedState,
}

impl Default for GprsAttached {
    fn default() -> Self {
        Self {
            state: GprsAttachedState::Unknown,
        }
    }
}

impl GprsAttached {
    pub fn is_attached(&self) -> bool {
        self.state == GprsAttachedState::Attached
    }
}

impl AtResponse for GprsAttached {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let line = parser::data_line(raw, "+CGATT:")?;
                parser::expect_fields(line, 1..=1)?;
                parser::decode(line)
            }
            CommandType::Write => Ok(parser::echoed(args).unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, AtatResp)]
struct ApnRecord {
    #[at_arg(position = 0)]
    valid: u8,
    #[at_arg(position = 1)]
    apn: Option<String<100>>,
}

/// 5.2.4 AT+CGNAPN Get Network APN in CAT-M or NB-IOT
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "ApnRecord")]
pub struct NetworkApn {
    /// Whether the network provided an APN at all
    pub valid: bool,
    pub apn: String<100>,
}

impl atat::AtatResp for NetworkApn {}

impl TryFrom<ApnRecord> for NetworkApn {
    type Error = ParseError;

    fn try_from(r: ApnRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            valid: parser::flag(r.valid)?,
            apn: r.apn.unwrap_or_default(),
        })
    }
}

impl AtResponse for NetworkApn {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        if ty != CommandType::Execute {
            return Ok(Self::default());
        }

        let line = parser::data_line(raw, "+CGNAPN:")?;
        parser::expect_fields(line, 1..=2)?;
        Self::try_from(parser::decode::<ApnRecord>(line)?)
    }
}

/// One PDP configuration of the +CNCFG read command
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PdpConfig {
    #[at_arg(position = 0)]
    pub pdp_idx: u8,
    #[at_arg(position = 1)]
    pub ip_type: CnIpType,
    #[at_arg(position = 2)]
    pub apn: String<100>,
    #[at_arg(position = 3)]
    pub username: String<64>,
    #[at_arg(position = 4)]
    pub password: String<64>,
    #[at_arg(position = 5)]
    pub auth: AuthenticationType,
}

impl PdpConfig {
    fn from_line(line: &str) -> Result<Self, ParseError> {
        parser::expect_fields(line, 6..=6)?;
        let config: Self = parser::decode(line)?;
        parser::bounded(config.pdp_idx, 0..=3)?;
        Ok(config)
    }
}

/// 5.2.2 AT+CNCFG PDP Configure
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "PdpConfig")]
pub struct PdpConfigurations {
    pub configs: Vec<PdpConfig, 4>,
}

impl atat::AtatResp for PdpConfigurations {}

impl From<PdpConfig> for PdpConfigurations {
    fn from(config: PdpConfig) -> Self {
        let mut configs = Vec::new();
        let _ = configs.push(config);
        Self { configs }
    }
}

impl PdpConfigurations {
    pub fn config(&self, pdp_idx: u8) -> Option<&PdpConfig> {
        self.configs.iter().find(|c| c.pdp_idx == pdp_idx)
    }
}

impl AtResponse for PdpConfigurations {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let mut lines = parser::data_lines(raw, "+CNCFG:").peekable();
                if lines.peek().is_none() {
                    return Err(ParseError::MissingPrefix);
                }
                let mut configs = Vec::new();
                for line in lines {
                    configs
                        .push(PdpConfig::from_line(line)?)
                        .map_err(|_| ParseError::OutOfRange)?;
                }
                Ok(Self { configs })
            }
            CommandType::Write => Ok(args
                .and_then(|a| PdpConfig::from_line(a).ok())
                .map(Self::from)
                .unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

/// One context of the +CNACT read command
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppNetworkContext {
    #[at_arg(position = 0)]
    pub pdp_idx: u8,
    #[at_arg(position = 1)]
    pub status: ContextStatus,
    #[at_arg(position = 2)]
    pub address: String<46>,
}

impl AppNetworkContext {
    /// Non-empty and not the unspecified `0.0.0.0`.
    pub fn has_address(&self) -> bool {
        !self.address.is_empty() && self.address != "0.0.0.0"
    }

    pub fn ip(&self) -> Option<IpAddr> {
        IpAddr::from_str(&self.address).ok()
    }

    pub fn is_active(&self) -> bool {
        self.status == ContextStatus::Activated && self.has_address()
    }

    fn from_line(line: &str) -> Result<Self, ParseError> {
        parser::expect_fields(line, 3..=3)?;
        let ctx: Self = parser::decode(line)?;
        parser::bounded(ctx.pdp_idx, 0..=3)?;
        Ok(ctx)
    }
}

/// 5.2.3 AT+CNACT APP Network Active
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "AppNetworkContext")]
pub struct AppNetworkStatus {
    pub contexts: Vec<AppNetworkContext, 4>,
}

impl atat::AtatResp for AppNetworkStatus {}

impl From<AppNetworkContext> for AppNetworkStatus {
    fn from(ctx: AppNetworkContext) -> Self {
        let mut contexts = Vec::new();
        let _ = contexts.push(ctx);
        Self { contexts }
    }
}

impl AppNetworkStatus {
    pub fn context(&self, pdp_idx: u8) -> Option<&AppNetworkContext> {
        self.contexts.iter().find(|c| c.pdp_idx == pdp_idx)
    }

    /// First context that is activated and holds an address.
    pub fn active_context(&self) -> Option<&AppNetworkContext> {
        self.contexts.iter().find(|c| c.is_active())
    }
}

impl AtResponse for AppNetworkStatus {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        if ty != CommandType::Read {
            return Ok(Self::default());
        }

        let mut lines = parser::data_lines(raw, "+CNACT:").peekable();
        if lines.peek().is_none() {
            return Err(ParseError::MissingPrefix);
        }
        let mut contexts = Vec::new();
        for line in lines {
            contexts
                .push(AppNetworkContext::from_line(line)?)
                .map_err(|_| ParseError::OutOfRange)?;
        }
        Ok(Self { contexts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use no_std_net::Ipv4Addr;

    #[test]
    fn pdp_contexts() {
        let raw = "+CGDCONT: 1,\"IP\",\"iot.1nce.net\",\"0.0.0.0\",0,0,0,0\r\n\
                   +CGDCONT: 2,\"IPV4V6\",\"ims\",\"\",0,0\r\n\r\nOK\r\n";
        let res = PdpContextDefinitions::parse(raw, CommandType::Read, None).unwrap();
        assert_eq!(res.contexts.len(), 2);
        let ctx = res.context(1).unwrap();
        assert_eq!(ctx.pdp_type, PdpType::Ip);
        assert_eq!(ctx.apn.as_str(), "iot.1nce.net");
        assert_eq!(res.context(2).unwrap().pdp_type, PdpType::Ipv4v6);
    }

    #[test]
    fn pdp_context_too_short() {
        assert_eq!(
            PdpContextDefinitions::parse(
                "+CGDCONT: 1,\"IP\",\"apn\"\r\n\r\nOK\r\n",
                CommandType::Read,
                None
            ),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn pdp_context_write_echo() {
        let res =
            PdpContextDefinitions::parse("\r\nOK\r\n", CommandType::Write, Some("1,\"IP\",\"apn\""))
                .unwrap();
        assert_eq!(res.contexts.len(), 1);
        assert_eq!(res.contexts[0].cid, 1);
        assert_eq!(res.contexts[0].apn.as_str(), "apn");
    }

    #[test]
    fn network_apn() {
        let res = NetworkApn::parse(
            "+CGNAPN: 1,\"iot.1nce.net\"\r\n\r\nOK\r\n",
            CommandType::Execute,
            None,
        )
        .unwrap();
        assert!(res.valid);
        assert_eq!(res.apn.as_str(), "iot.1nce.net");
    }

    #[test]
    fn pdp_configurations() {
        let raw = "+CNCFG: 0,1,\"iot.1nce.net\",\"\",\"\",0\r\n\
                   +CNCFG: 1,0,\"\",\"\",\"\",0\r\n\r\nOK\r\n";
        let res = PdpConfigurations::parse(raw, CommandType::Read, None).unwrap();
        assert_eq!(res.configs.len(), 2);
        assert_eq!(res.config(0).unwrap().ip_type, CnIpType::Ipv4);
        assert_eq!(res.config(1).unwrap().ip_type, CnIpType::Dual);

        assert_eq!(
            PdpConfigurations::parse("+CNCFG: 0,1,\"apn\"\r\n\r\nOK\r\n", CommandType::Read, None),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn app_network_two_contexts() {
        let raw = "+CNACT: 0,1,\"10.1.2.3\"\r\n+CNACT: 1,0,\"0.0.0.0\"\r\n\r\nOK\r\n";
        let res = AppNetworkStatus::parse(raw, CommandType::Read, None).unwrap();
        assert_eq!(res.contexts.len(), 2);

        let active = res.active_context().unwrap();
        assert_eq!(active.pdp_idx, 0);
        assert_eq!(active.ip(), Some(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3))));

        let idle = res.context(1).unwrap();
        assert_eq!(idle.status, ContextStatus::Deactivated);
        assert!(!idle.has_address());
    }

    #[test]
    fn pdp_context_ranges() {
        assert_eq!(
            PdpContextDefinitions::parse(
                "+CGDCONT: 16,\"IP\",\"apn\",\"\",0,0\r\n\r\nOK\r\n",
                CommandType::Read,
                None
            ),
            Err(ParseError::OutOfRange)
        );
        assert_eq!(
            PdpContextDefinitions::parse(
                "+CGDCONT: 1,\"IP\",\"apn\",\"\",3,0\r\n\r\nOK\r\n",
                CommandType::Read,
                None
            ),
            Err(ParseError::OutOfRange)
        );
    }

    #[test]
    fn long_address_does_not_fit() {
        let raw = format!("+CNACT: 0,1,\"{}\"\r\n\r\nOK\r\n", "1".repeat(47));
        assert_eq!(
            AppNetworkStatus::parse(&raw, CommandType::Read, None),
            Err(ParseError::BufferTooSmall)
        );
    }

    #[test]
    fn app_network_in_operation_is_not_active() {
        let raw = "+CNACT: 0,2,\"10.1.2.3\"\r\n\r\nOK\r\n";
        let res = AppNetworkStatus::parse(raw, CommandType::Read, None).unwrap();
        assert_eq!(res.contexts[0].status, ContextStatus::InOperation);
        assert!(res.active_context().is_none());
    }

    #[test]
    fn app_network_too_many_records() {
        let raw = "+CNACT: 0,0,\"\"\r\n+CNACT: 1,0,\"\"\r\n+CNACT: 2,0,\"\"\r\n\
                   +CNACT: 3,0,\"\"\r\n+CNACT: 3,0,\"\"\r\n\r\nOK\r\n";
        assert_eq!(
            AppNetworkStatus::parse(raw, CommandType::Read, None),
            Err(ParseError::OutOfRange)
        );
    }
}
