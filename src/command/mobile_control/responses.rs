//! Responses for Mobile equipment control Commands
use atat::atat_derive::AtatResp;

use super::types::*;
use crate::command::{parser, AtResponse, CommandType};
use crate::error::ParseError;

/// 3.2.10 AT+CFUN Set Phone Functionality
///
/// On write the module only acknowledges, so the level that was requested is
/// reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleFunctionality {
    #[at_arg(position = 0)]
    pub functionality: Functionality,
}

impl Default for ModuleFunctionality {
    fn default() -> Self {
        Self {
            functionality: Functionality::Unknown,
        }
    }
}

impl AtResponse for ModuleFunctionality {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let line = parser::data_line(raw, "+CFUN:")?;
                parser::expect_fields(line, 1..=1)?;
                parser::decode(line)
            }
            CommandType::Write => Ok(parser::echoed(args).unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

/// 3.2.20 AT+CMEE Report Mobile Equipment Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportMobileTerminationError {
    #[at_arg(position = 0)]
    pub mode: TerminationErrorMode,
}

impl Default for ReportMobileTerminationError {
    fn default() -> Self {
        Self {
            mode: TerminationErrorMode::Unknown,
        }
    }
}

impl AtResponse for ReportMobileTerminationError {
    fn parse(raw: &str, ty: CommandType, args: Option<&str>) -> Result<Self, ParseError> {
        match ty {
            CommandType::Read => {
                let line = parser::data_line(raw, "+CMEE:")?;
                parser::expect_fields(line, 1..=1)?;
                parser::decode(line)
            }
            CommandType::Write => Ok(parser::echoed(args).unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}
