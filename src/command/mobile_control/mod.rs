//! ### 3 - Mobile equipment control and status Commands

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{ModuleFunctionality, ReportMobileTerminationError};
use types::{Functionality, ResetMode, TerminationErrorMode};

/// 3.2.10 AT+CFUN Set Phone Functionality
///
/// Selects the level of functionality <fun> in the MT.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CFUN", ModuleFunctionality, timeout_ms = 10000)]
pub struct SetModuleFunctionality {
    #[at_arg(position = 0)]
    pub fun: Functionality,
    #[at_arg(position = 1)]
    pub rst: Option<ResetMode>,
}

/// 3.2.10 AT+CFUN Set Phone Functionality
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CFUN?", ModuleFunctionality, timeout_ms = 5000)]
pub struct GetModuleFunctionality;

/// 3.2.20 AT+CMEE Report Mobile Equipment Error
///
/// Configures the formatting of the result code +CME ERROR: <err> as an
/// indication of an error relating to the functionality of the MT.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CMEE", ReportMobileTerminationError, timeout_ms = 5000)]
pub struct SetReportMobileTerminationError {
    #[at_arg(position = 0)]
    pub n: TerminationErrorMode,
}

#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CMEE?", ReportMobileTerminationError, timeout_ms = 5000)]
pub struct GetReportMobileTerminationError;
