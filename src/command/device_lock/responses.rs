//! Responses for SIM PIN Commands
use atat::atat_derive::AtatResp;
use serde::Deserialize;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType};
use crate::error::ParseError;

#[derive(Debug, AtatResp)]
struct PinRecord {
    #[at_arg(position = 0)]
    code: PinStatusCode,
}

/// 3.2.1 AT+CPIN Enter PIN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "PinRecord")]
pub struct PinStatus {
    pub code: PinStatusCode,
    /// A PUK is pending, so a new PIN has to be supplied along with it
    pub requires_new_pin: bool,
}

impl atat::AtatResp for PinStatus {}

impl From<PinRecord> for PinStatus {
    fn from(PinRecord { code }: PinRecord) -> Self {
        Self {
            code,
            requires_new_pin: matches!(code, PinStatusCode::SimPuk | PinStatusCode::SimPuk2),
        }
    }
}

impl PinStatus {
    pub fn is_ready(&self) -> bool {
        self.code == PinStatusCode::Ready
    }
}

impl AtResponse for PinStatus {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        if ty != CommandType::Read {
            return Ok(Self::default());
        }

        let line = parser::data_line(raw, "+CPIN:")?;
        parser::expect_fields(line, 1..=1)?;
        parser::decode::<PinRecord>(line).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready() {
        let res = PinStatus::parse("+CPIN: READY\r\n\r\nOK\r\n", CommandType::Read, None).unwrap();
        assert_eq!(
            res,
            PinStatus {
                code: PinStatusCode::Ready,
                requires_new_pin: false
            }
        );
    }

    #[test]
    fn puk_requires_new_pin() {
        let res = PinStatus::parse("+CPIN: SIM PUK\r\n\r\nOK\r\n", CommandType::Read, None).unwrap();
        assert_eq!(res.code, PinStatusCode::SimPuk);
        assert!(res.requires_new_pin);

        let res = PinStatus::parse("+CPIN: SIM PUK2\r\n\r\nOK\r\n", CommandType::Read, None).unwrap();
        assert!(res.requires_new_pin);

        let res = PinStatus::parse("+CPIN: SIM PIN2\r\n\r\nOK\r\n", CommandType::Read, None).unwrap();
        assert!(!res.requires_new_pin);
    }

    #[test]
    fn unknown_code_maps_to_sentinel() {
        let res = PinStatus::parse("+CPIN: NOT INSERTED\r\n\r\nOK\r\n", CommandType::Read, None)
            .unwrap();
        assert_eq!(res.code, PinStatusCode::Unknown);
        assert!(!res.is_ready());
    }

    #[test]
    fn missing_prefix() {
        assert_eq!(
            PinStatus::parse("\r\nOK\r\n", CommandType::Read, None),
            Err(ParseError::MissingPrefix)
        );
    }
}
