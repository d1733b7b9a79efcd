//! ### 3 - SIM PIN Commands

pub mod impl_;
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use heapless::String;
use responses::PinStatus;

use super::NoResponse;

/// 3.2.1 AT+CPIN Enter PIN
///
/// Read: reports whether some password is required.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CPIN?", PinStatus, timeout_ms = 5000)]
pub struct GetPinStatus;

/// 3.2.1 AT+CPIN Enter PIN
///
/// Write: sends the password to the MT. If the pending password is a PUK, the
/// replacement PIN goes in `new_pin`.
#[derive(Debug, Clone, PartialEq, Eq, AtatCmd)]
#[at_cmd("+CPIN", NoResponse, timeout_ms = 5000)]
pub struct EnterPin {
    #[at_arg(position = 0)]
    pub pin: String<8>,
    #[at_arg(position = 1)]
    pub new_pin: Option<String<8>>,
}
