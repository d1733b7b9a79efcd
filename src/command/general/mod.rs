//! ### 2 - General Commands
//!
//! V.25TER commands controlling the command interface itself.

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{AtTest, CommandEcho};
use types::EchoMode;

/// AT - Test communication with the device
///
/// The module answers a bare `AT` with `OK` once its command interface is up.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("", AtTest, timeout_ms = 5000)]
pub struct At;

/// 2.2.5 ATE Set command echo mode
///
/// The mode is appended directly to the command, e.g. `ATE0`.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("E", CommandEcho, value_sep = false, timeout_ms = 5000)]
pub struct SetEchoMode {
    #[at_arg(position = 0)]
    pub mode: EchoMode,
}
