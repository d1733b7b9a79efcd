//! Argument and parameter types used by General Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestStatus {
    Ok,
    Error,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EchoMode {
    /// Echo mode off
    Disabled = 0,
    /// Echo mode on
    Enabled = 1,
    #[at_arg(default)]
    Unknown = 255,
}
