//! AT Commands for the SIMCom SIM7080 series
//!
//! Following the SIM7070_SIM7080_SIM7090 Series AT Command Manual. Every
//! command the driver knows is a member of [`Command`]; its wire strings live
//! in the static [`catalog`], and its response grammar in the matching
//! `responses` module. Requests are `atat` derived commands; the client
//! recognises which command and variant an encoded request is by its line.

use atat::atat_derive::AtatResp;

use crate::error::{Error, ParseError};

pub mod catalog;
pub mod device_lock;
pub mod general;
pub mod mobile_control;
pub mod mqtt;
pub mod network_service;
pub(crate) mod parser;
pub mod psn;

pub use catalog::{CommandDescriptor, NoSuchVariant, VariantRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandType {
    /// `AT+CMD=?`
    Test,
    /// `AT+CMD?`
    Read,
    /// `AT+CMD=<args>`
    Write,
    /// `AT+CMD`
    Execute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    At,
    Cpin,
    Cfun,
    Csq,
    Ate,
    Cmee,
    Cgdcont,
    Cgatt,
    Cops,
    Cgnapn,
    Cncfg,
    Cnact,
    Smconf,
    Smconn,
    Smpub,
    Smstate,
    Cereg,
    Smdisc,
}

impl Command {
    pub const ALL: [Command; 18] = [
        Command::At,
        Command::Cpin,
        Command::Cfun,
        Command::Csq,
        Command::Ate,
        Command::Cmee,
        Command::Cgdcont,
        Command::Cgatt,
        Command::Cops,
        Command::Cgnapn,
        Command::Cncfg,
        Command::Cnact,
        Command::Smconf,
        Command::Smconn,
        Command::Smpub,
        Command::Smstate,
        Command::Cereg,
        Command::Smdisc,
    ];

    pub fn descriptor(self) -> &'static CommandDescriptor {
        catalog::descriptor(self)
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Find a command by its descriptor name, e.g. `"AT+CSQ"`.
    pub fn lookup(name: &str) -> Option<Command> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.descriptor().name.eq_ignore_ascii_case(name))
    }

    /// Parse a completed response with the parser belonging to this command.
    pub fn parse(
        self,
        raw: &str,
        ty: CommandType,
        args: Option<&str>,
    ) -> Result<Response, ParseError> {
        use device_lock::responses::PinStatus;
        use general::responses::{AtTest, CommandEcho};
        use mobile_control::responses::{ModuleFunctionality, ReportMobileTerminationError};
        use mqtt::responses::{MqttParameters, MqttState};
        use network_service::responses::{EpsRegistration, OperatorSelection, SignalQuality};
        use psn::responses::{
            AppNetworkStatus, GprsAttached, NetworkApn, PdpConfigurations, PdpContextDefinitions,
        };

        Ok(match self {
            Command::At => Response::At(AtTest::parse(raw, ty, args)?),
            Command::Cpin => Response::Cpin(PinStatus::parse(raw, ty, args)?),
            Command::Cfun => Response::Cfun(ModuleFunctionality::parse(raw, ty, args)?),
            Command::Csq => Response::Csq(SignalQuality::parse(raw, ty, args)?),
            Command::Ate => Response::Ate(CommandEcho::parse(raw, ty, args)?),
            Command::Cmee => Response::Cmee(ReportMobileTerminationError::parse(raw, ty, args)?),
            Command::Cgdcont => Response::Cgdcont(PdpContextDefinitions::parse(raw, ty, args)?),
            Command::Cgatt => Response::Cgatt(GprsAttached::parse(raw, ty, args)?),
            Command::Cops => Response::Cops(OperatorSelection::parse(raw, ty, args)?),
            Command::Cgnapn => Response::Cgnapn(NetworkApn::parse(raw, ty, args)?),
            Command::Cncfg => Response::Cncfg(PdpConfigurations::parse(raw, ty, args)?),
            Command::Cnact => Response::Cnact(AppNetworkStatus::parse(raw, ty, args)?),
            Command::Smconf => Response::Smconf(MqttParameters::parse(raw, ty, args)?),
            Command::Smconn => Response::Smconn(NoResponse),
            Command::Smpub => Response::Smpub(NoResponse),
            Command::Smstate => Response::Smstate(MqttState::parse(raw, ty, args)?),
            Command::Cereg => Response::Cereg(EpsRegistration::parse(raw, ty, args)?),
            Command::Smdisc => Response::Smdisc(NoResponse),
        })
    }
}

/// Typed result of any command, as produced by [`Command::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    At(general::responses::AtTest),
    Cpin(device_lock::responses::PinStatus),
    Cfun(mobile_control::responses::ModuleFunctionality),
    Csq(network_service::responses::SignalQuality),
    Ate(general::responses::CommandEcho),
    Cmee(mobile_control::responses::ReportMobileTerminationError),
    Cgdcont(psn::responses::PdpContextDefinitions),
    Cgatt(psn::responses::GprsAttached),
    Cops(network_service::responses::OperatorSelection),
    Cgnapn(psn::responses::NetworkApn),
    Cncfg(psn::responses::PdpConfigurations),
    Cnact(psn::responses::AppNetworkStatus),
    Smconf(mqtt::responses::MqttParameters),
    Smconn(NoResponse),
    Smpub(NoResponse),
    Smstate(mqtt::responses::MqttState),
    Cereg(network_service::responses::EpsRegistration),
    Smdisc(NoResponse),
}

/// Parsing contract shared by every typed response.
///
/// `args` is the argument string that was sent, so acknowledgement-only
/// variants can echo it back into the typed result.
pub trait AtResponse: Sized {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError>;
}

/// Result of commands that only acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoResponse;

impl AtResponse for NoResponse {
    fn parse(_raw: &str, _ty: CommandType, _args: Option<&str>) -> Result<Self, ParseError> {
        Ok(NoResponse)
    }
}

/// Quoted string arguments may not contain the quote character itself.
pub(crate) fn quotable(value: &str) -> Result<&str, Error> {
    if value.contains('"') {
        return Err(Error::InvalidArgument);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Command::lookup("AT+CSQ"), Some(Command::Csq));
        assert_eq!(Command::lookup("ATE"), Some(Command::Ate));
        assert_eq!(Command::lookup("AT+SMSUB"), None);
        for command in Command::ALL {
            assert_eq!(Command::lookup(command.name()), Some(command));
        }
    }

    #[test]
    fn dynamic_dispatch_selects_parser() {
        let res = Command::Csq
            .parse("+CSQ: 17,99\r\n\r\nOK\r\n", CommandType::Execute, None)
            .unwrap();
        match res {
            Response::Csq(sq) => assert_eq!(sq.rssi_dbm, Some(-80)),
            other => panic!("unexpected response {:?}", other),
        }
    }
}
