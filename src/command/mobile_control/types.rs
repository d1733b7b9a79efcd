//! Argument and parameter types used by Mobile equipment control Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Functionality {
    /// Minimum functionality
    Minimum = 0,
    /// Full functionality (default)
    Full = 1,
    /// Disable phone both transmit and receive RF circuits
    DisableRf = 4,
    /// Factory Test Mode
    FactoryTest = 5,
    /// Reset
    Reset = 6,
    /// Offline Mode
    Offline = 7,
    #[at_arg(default)]
    Unknown = 255,
}

/// Reset mode. Only valid together with full functionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResetMode {
    /// Do not reset the MT before setting it to the selected <fun>
    DontReset = 0,
    /// Reset the MT before setting it to the selected <fun>
    Reset = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TerminationErrorMode {
    /// +CME ERROR: <err> result code disabled and ERROR used
    Disabled = 0,
    /// +CME ERROR: <err> result code enabled and numeric <err> values used
    Numeric = 1,
    /// +CME ERROR: <err> result code enabled and verbose <err> values used
    Verbose = 2,
    #[at_arg(default)]
    Unknown = 255,
}
