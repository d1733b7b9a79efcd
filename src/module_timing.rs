use embassy_time::Duration;

use crate::command::{Command, CommandType};

/// Attempts per command before giving up with `CommandFailed`
pub const MAX_RETRIES: u8 = 5;

/// Attempts of the SIM ready and PDP activation polls
pub const POLL_ATTEMPTS: u8 = 10;

/// Time to wait between two attempts of the same command
pub fn retry_delay() -> Duration {
    Duration::from_millis(500)
}

/// Timeout of a single read from the serial port
pub fn read_interval() -> Duration {
    Duration::from_millis(10)
}

/// Back-off when a read returned nothing
pub fn idle_delay() -> Duration {
    Duration::from_millis(1)
}

/// Time between two attempts of a status poll
pub fn poll_interval() -> Duration {
    Duration::from_secs(1)
}

/// Maximum response time of a command, as documented in the AT manual.
///
/// Where the manual does not name one, the module answers well within the
/// default.
pub fn command_timeout(command: Command, ty: CommandType) -> Duration {
    match (command, ty) {
        (Command::Cgatt, _) => Duration::from_secs(75),
        (Command::Cops, CommandType::Write) => Duration::from_secs(120),
        (Command::Cops, CommandType::Test) => Duration::from_secs(45),
        (Command::Cfun, CommandType::Write) => Duration::from_secs(10),
        (Command::Cnact, CommandType::Write) => Duration::from_secs(10),
        (Command::Smconn, _) => Duration::from_secs(60),
        _ => Duration::from_secs(5),
    }
}
