//! Responses for General Commands
use serde::Deserialize;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType, NoResponse};
use crate::error::ParseError;

/// AT - Test communication with the device
///
/// A bare `OK` carries no fields, so a decoded acknowledgement means `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "NoResponse")]
pub struct AtTest {
    pub status: TestStatus,
}

impl atat::AtatResp for AtTest {}

impl From<NoResponse> for AtTest {
    fn from(_: NoResponse) -> Self {
        Self {
            status: TestStatus::Ok,
        }
    }
}

impl AtResponse for AtTest {
    fn parse(raw: &str, _ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        let status = if raw.contains("OK") {
            TestStatus::Ok
        } else if raw.contains("ERROR") {
            TestStatus::Error
        } else {
            TestStatus::Unknown
        };
        Ok(Self { status })
    }
}

/// 2.2.5 ATE Set command echo mode
///
/// The module does not report its echo mode, so the mode that was sent is
/// echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "NoResponse")]
pub struct CommandEcho {
    pub mode: EchoMode,
}

impl atat::AtatResp for CommandEcho {}

impl From<NoResponse> for CommandEcho {
    fn from(_: NoResponse) -> Self {
        Self {
            mode: EchoMode::Unknown,
        }
    }
}

impl AtResponse for CommandEcho {
    fn parse(_raw: &str, _ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        let mode = parser::echoed(args).unwrap_or(EchoMode::Unknown);
        Ok(Self { mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_ok() {
        let res = AtTest::parse("AT\r\r\nOK\r\n", CommandType::Execute, None).unwrap();
        assert_eq!(res.status, TestStatus::Ok);
    }

    #[test]
    fn echo_mode_follows_argument() {
        let res = CommandEcho::parse("ATE0\r\r\nOK\r\n", CommandType::Execute, Some("0")).unwrap();
        assert_eq!(res.mode, EchoMode::Disabled);
        let res = CommandEcho::parse("\r\nOK\r\n", CommandType::Execute, None).unwrap();
        assert_eq!(res.mode, EchoMode::Unknown);
    }
}
