//! ### 3 / 5 - Network service Commands
//!
//! Signal quality, operator selection and EPS network registration.

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use heapless::String;
use responses::{EpsRegistration, OperatorSelection, SignalQuality};
use types::{OperatorFormat, OperatorSelectionMode, RegistrationUrc};

/// 3.2.21 AT+CSQ Signal Quality Report
///
/// Returns the received signal strength indication <rssi> and channel bit
/// error rate <ber> from the ME.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CSQ", SignalQuality, timeout_ms = 5000)]
pub struct GetSignalQuality;

/// 3.2.13 AT+COPS Operator Selection
///
/// Returns the current mode and the currently selected operator.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+COPS?", OperatorSelection, timeout_ms = 5000)]
pub struct GetOperatorSelection;

/// 3.2.13 AT+COPS Operator Selection
///
/// Forces an attempt to select and register the network operator. Setting
/// `mode` to automatic hands the selection back to the module. `oper` is only
/// meaningful together with `format`.
#[derive(Debug, Clone, PartialEq, Eq, AtatCmd)]
#[at_cmd("+COPS", OperatorSelection, timeout_ms = 120000)]
pub struct SetOperatorSelection {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    pub format: Option<OperatorFormat>,
    #[at_arg(position = 2)]
    pub oper: Option<String<32>>,
}

/// 5.2.1 AT+CEREG EPS Network Registration Status
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CEREG?", EpsRegistration, timeout_ms = 5000)]
pub struct GetEpsNetworkRegistrationStatus;

/// 5.2.1 AT+CEREG EPS Network Registration Status
///
/// Controls the presentation of the `+CEREG` unsolicited result code and how
/// much detail the read command reports.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CEREG", EpsRegistration, timeout_ms = 5000)]
pub struct SetEpsNetworkRegistrationStatus {
    #[at_arg(position = 0)]
    pub n: RegistrationUrc,
}
