//! Responses for Network service Commands
use atat::atat_derive::AtatResp;
use heapless::String;
use serde::Deserialize;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType};
use crate::error::ParseError;

/// Records a single `+CEREG:` read may report, one per line.
const MAX_REGISTRATION_LINES: usize = 4;

#[derive(Debug, AtatResp)]
struct CsqRecord {
    #[at_arg(position = 0)]
    rssi: u8,
    #[at_arg(position = 1)]
    ber: u8,
}

/// 3.2.21 AT+CSQ Signal Quality Report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "CsqRecord")]
pub struct SignalQuality {
    /// Raw `<rssi>` code, 0-31 or [`NOT_DETECTABLE`]
    pub rssi: u8,
    /// Raw `<ber>` code, 0-7 or [`NOT_DETECTABLE`]
    pub ber: u8,
    pub rssi_dbm: Option<i8>,
    pub category: SignalCategory,
}

impl atat::AtatResp for SignalQuality {}

impl Default for SignalQuality {
    fn default() -> Self {
        Self {
            rssi: NOT_DETECTABLE,
            ber: NOT_DETECTABLE,
            rssi_dbm: None,
            category: SignalCategory::NotDetectable,
        }
    }
}

impl SignalQuality {
    pub fn is_detectable(&self) -> bool {
        self.rssi_dbm.is_some()
    }
}

impl TryFrom<CsqRecord> for SignalQuality {
    type Error = ParseError;

    fn try_from(CsqRecord { rssi, ber }: CsqRecord) -> Result<Self, Self::Error> {
        if rssi > 31 && rssi != NOT_DETECTABLE {
            return Err(ParseError::OutOfRange);
        }
        if ber > 7 && ber != NOT_DETECTABLE {
            return Err(ParseError::OutOfRange);
        }

        let rssi_dbm = rssi_to_dbm(rssi);
        Ok(Self {
            rssi,
            ber,
            rssi_dbm,
            category: SignalCategory::from_dbm(rssi_dbm),
        })
    }
}

impl AtResponse for SignalQuality {
    fn parse(raw: &str, ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        if ty != CommandType::Execute {
            return Ok(Self::default());
        }

        let line = parser::data_line(raw, "+CSQ:")?;
        parser::expect_fields(line, 2..=2)?;
        Self::try_from(parser::decode::<CsqRecord>(line)?)
    }
}

#[derive(Debug, AtatResp)]
struct OpsRecord {
    #[at_arg(position = 0)]
    mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    format: Option<OperatorFormat>,
    #[at_arg(position = 2)]
    oper: Option<String<32>>,
    #[at_arg(position = 3)]
    act: Option<AccessTechnology>,
}

/// 3.2.13 AT+COPS Operator Selection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "OpsRecord")]
pub struct OperatorSelection {
    pub mode: OperatorSelectionMode,
    pub format: OperatorFormat,
    pub oper: String<32>,
    pub act: AccessTechnology,
}

impl atat::AtatResp for OperatorSelection {}

impl Default for OperatorSelection {
    fn default() -> Self {
        Self {
            mode: OperatorSelectionMode::Unknown,
            format: OperatorFormat::Unknown,
            oper: String::new(),
            act: AccessTechnology::Unknown,
        }
    }
}

impl From<OpsRecord> for OperatorSelection {
    fn from(r: OpsRecord) -> Self {
        Self {
            mode: r.mode,
            format: r.format.unwrap_or(OperatorFormat::Unknown),
            oper: r.oper.unwrap_or_default(),
            act: r.act.unwrap_or(AccessTechnology::Unknown),
        }
    }
}

impl AtResponse for OperatorSelection {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let line = parser::data_line(raw, "+COPS:")?;
                // <format> and <oper> come as a pair
                if !matches!(parser::field_count(line), 1 | 3 | 4) {
                    return Err(ParseError::FieldCountMismatch);
                }
                parser::decode::<OpsRecord>(line).map(Self::from)
            }
            CommandType::Write => Ok(args
                .and_then(|a| parser::decode::<OpsRecord>(a).ok())
                .map(Self::from)
                .unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, AtatResp)]
struct CeregRecord {
    #[at_arg(position = 0)]
    n: RegistrationUrc,
    #[at_arg(position = 1)]
    stat: RegistrationStatus,
    #[at_arg(position = 2)]
    tac: Option<String<4>>,
    #[at_arg(position = 3)]
    rac: Option<String<2>>,
    #[at_arg(position = 4)]
    ci: Option<String<8>>,
    #[at_arg(position = 5)]
    act: Option<AccessTechnology>,
    #[at_arg(position = 6)]
    cause_type: Option<u8>,
    #[at_arg(position = 7)]
    reject_cause: Option<u8>,
    #[at_arg(position = 8)]
    active_time: Option<String<8>>,
    #[at_arg(position = 9)]
    periodic_tau: Option<String<8>>,
}

/// 5.2.1 AT+CEREG EPS Network Registration Status
///
/// Location fields are present when `<n>` is 2 or 4 and the module has them;
/// the PSM timers only when `<n>` is 4.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "CeregRecord")]
pub struct EpsRegistration {
    pub n: RegistrationUrc,
    pub stat: RegistrationStatus,
    /// Two byte tracking area code in hexadecimal format
    pub tac: Option<String<4>>,
    /// One byte routing area code in hexadecimal format
    pub rac: Option<String<2>>,
    /// Four byte E-UTRAN cell ID in hexadecimal format
    pub ci: Option<String<8>>,
    pub act: AccessTechnology,
    pub cause_type: Option<u8>,
    pub reject_cause: Option<u8>,
    /// Active Time value (T3324), one byte in 8 bit format
    pub active_time: Option<String<8>>,
    /// Extended periodic TAU value (T3412), one byte in 8 bit format
    pub periodic_tau: Option<String<8>>,
}

impl atat::AtatResp for EpsRegistration {}

impl Default for EpsRegistration {
    fn default() -> Self {
        Self {
            n: RegistrationUrc::Unknown,
            stat: RegistrationStatus::Unknown,
            tac: None,
            rac: None,
            ci: None,
            act: AccessTechnology::Unknown,
            cause_type: None,
            reject_cause: None,
            active_time: None,
            periodic_tau: None,
        }
    }
}

impl EpsRegistration {
    pub fn is_registered(&self) -> bool {
        self.stat.is_registered()
    }
}

/// An empty quoted field reads as absent.
fn present<const N: usize>(field: Option<String<N>>) -> Option<String<N>> {
    field.filter(|s| !s.is_empty())
}

impl From<CeregRecord> for EpsRegistration {
    fn from(r: CeregRecord) -> Self {
        Self {
            n: r.n,
            stat: r.stat,
            tac: present(r.tac),
            rac: present(r.rac),
            ci: present(r.ci),
            act: r.act.unwrap_or(AccessTechnology::Unknown),
            cause_type: r.cause_type,
            reject_cause: r.reject_cause,
            active_time: present(r.active_time),
            periodic_tau: present(r.periodic_tau),
        }
    }
}

impl AtResponse for EpsRegistration {
    /// Every `+CEREG:` line of a read is decoded; the last one reported wins.
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {}
            CommandType::Write => {
                return Ok(Self {
                    n: parser::echoed(args).unwrap_or(RegistrationUrc::Unknown),
                    ..Self::default()
                });
            }
            _ => return Ok(Self::default()),
        }

        let mut latest = None;
        for (i, line) in parser::data_lines(raw, "+CEREG:").enumerate() {
            if i == MAX_REGISTRATION_LINES {
                return Err(ParseError::OutOfRange);
            }
            if !matches!(parser::field_count(line), 2 | 6 | 8 | 10) {
                return Err(ParseError::FieldCountMismatch);
            }
            latest = Some(parser::decode::<CeregRecord>(line)?);
        }

        latest.map(Self::from).ok_or(ParseError::MissingPrefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_quality() {
        let res = SignalQuality::parse("+CSQ: 17,99\r\n\r\nOK\r\n", CommandType::Execute, None)
            .unwrap();
        assert_eq!(res.rssi, 17);
        assert_eq!(res.ber, NOT_DETECTABLE);
        assert_eq!(res.rssi_dbm, Some(-80));
        assert_eq!(res.category, SignalCategory::Good);
    }

    #[test]
    fn signal_not_detectable() {
        let res = SignalQuality::parse("+CSQ: 99,99\r\n\r\nOK\r\n", CommandType::Execute, None)
            .unwrap();
        assert_eq!(res.rssi_dbm, None);
        assert_eq!(res.category, SignalCategory::NotDetectable);
        assert!(!res.is_detectable());
    }

    #[test]
    fn signal_out_of_range() {
        assert_eq!(
            SignalQuality::parse("+CSQ: 32,0\r\n\r\nOK\r\n", CommandType::Execute, None),
            Err(ParseError::OutOfRange)
        );
        assert_eq!(
            SignalQuality::parse("+CSQ: 20,8\r\n\r\nOK\r\n", CommandType::Execute, None),
            Err(ParseError::OutOfRange)
        );
        assert_eq!(
            SignalQuality::parse("+CSQ: 20\r\n\r\nOK\r\n", CommandType::Execute, None),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn rssi_mapping() {
        assert_eq!(rssi_to_dbm(0), Some(-115));
        assert_eq!(rssi_to_dbm(1), Some(-111));
        assert_eq!(rssi_to_dbm(2), Some(-110));
        assert_eq!(rssi_to_dbm(30), Some(-54));
        assert_eq!(rssi_to_dbm(31), Some(-52));
        assert_eq!(rssi_to_dbm(99), None);
    }

    #[test]
    fn category_thresholds() {
        assert_eq!(SignalCategory::from_dbm(Some(-70)), SignalCategory::Excellent);
        assert_eq!(SignalCategory::from_dbm(Some(-71)), SignalCategory::Good);
        assert_eq!(SignalCategory::from_dbm(Some(-85)), SignalCategory::Good);
        assert_eq!(SignalCategory::from_dbm(Some(-86)), SignalCategory::Fair);
        assert_eq!(SignalCategory::from_dbm(Some(-99)), SignalCategory::Fair);
        assert_eq!(SignalCategory::from_dbm(Some(-100)), SignalCategory::Poor);
    }

    #[test]
    fn operator_selection() {
        let res = OperatorSelection::parse(
            "+COPS: 0,0,\"Telia\",9\r\n\r\nOK\r\n",
            CommandType::Read,
            None,
        )
        .unwrap();
        assert_eq!(res.mode, OperatorSelectionMode::Automatic);
        assert_eq!(res.format, OperatorFormat::Long);
        assert_eq!(res.oper.as_str(), "Telia");
        assert_eq!(res.act, AccessTechnology::LteNb);

        let res = OperatorSelection::parse("+COPS: 2\r\n\r\nOK\r\n", CommandType::Read, None)
            .unwrap();
        assert_eq!(res.mode, OperatorSelectionMode::Deregister);
        assert!(res.oper.is_empty());
    }

    #[test]
    fn registration_plain() {
        let res = EpsRegistration::parse("+CEREG: 0,5\r\n\r\nOK\r\n", CommandType::Read, None)
            .unwrap();
        assert_eq!(res.stat, RegistrationStatus::RegisteredRoaming);
        assert!(res.is_registered());
        assert_eq!(res.tac, None);
    }

    #[test]
    fn registration_with_location_and_psm() {
        let res = EpsRegistration::parse(
            "+CEREG: 4,1,\"00C3\",\"\",\"0A1B2C3D\",7,,,\"00100001\",\"00000110\"\r\n\r\nOK\r\n",
            CommandType::Read,
            None,
        )
        .unwrap();
        assert_eq!(res.n, RegistrationUrc::LocationPsm);
        assert_eq!(res.stat, RegistrationStatus::RegisteredHome);
        assert_eq!(res.tac.as_deref(), Some("00C3"));
        assert_eq!(res.rac, None);
        assert_eq!(res.ci.as_deref(), Some("0A1B2C3D"));
        assert_eq!(res.act, AccessTechnology::LteM1);
        assert_eq!(res.cause_type, None);
        assert_eq!(res.active_time.as_deref(), Some("00100001"));
        assert_eq!(res.periodic_tau.as_deref(), Some("00000110"));
    }

    #[test]
    fn registration_field_count() {
        assert_eq!(
            EpsRegistration::parse("+CEREG: 2,1,\"00C3\"\r\n\r\nOK\r\n", CommandType::Read, None),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn registration_last_line_wins() {
        let res = EpsRegistration::parse(
            "+CEREG: 0,2\r\n+CEREG: 0,1\r\n\r\nOK\r\n",
            CommandType::Read,
            None,
        )
        .unwrap();
        assert_eq!(res.stat, RegistrationStatus::RegisteredHome);
    }

    #[test]
    fn registration_every_line_is_checked() {
        assert_eq!(
            EpsRegistration::parse(
                "+CEREG: 0,1\r\n+CEREG: 0,1,\"00C3\"\r\n\r\nOK\r\n",
                CommandType::Read,
                None,
            ),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn registration_line_limit() {
        let raw = "+CEREG: 0,1\r\n".repeat(MAX_REGISTRATION_LINES + 1) + "\r\nOK\r\n";
        assert_eq!(
            EpsRegistration::parse(&raw, CommandType::Read, None),
            Err(ParseError::OutOfRange)
        );
        let raw = "+CEREG: 0,1\r\n".repeat(MAX_REGISTRATION_LINES) + "\r\nOK\r\n";
        assert!(EpsRegistration::parse(&raw, CommandType::Read, None).is_ok());
    }

    #[test]
    fn registration_write_echoes_mode() {
        let res = EpsRegistration::parse("\r\nOK\r\n", CommandType::Write, Some("2")).unwrap();
        assert_eq!(res.n, RegistrationUrc::Location);
        assert_eq!(res.stat, RegistrationStatus::Unknown);
    }
}
