//! Argument and parameter types used by Network service Commands and Responses
use atat::atat_derive::AtatEnum;

/// Raw `<rssi>`/`<ber>` code meaning "not known or not detectable".
pub const NOT_DETECTABLE: u8 = 99;

/// Signal strength bucket derived from the RSSI in dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalCategory {
    /// -70 dBm or better
    Excellent,
    /// -85 dBm up to -70 dBm
    Good,
    /// Above -100 dBm
    Fair,
    /// -100 dBm or worse
    Poor,
    #[default]
    NotDetectable,
}

impl SignalCategory {
    pub fn from_dbm(dbm: Option<i8>) -> Self {
        match dbm {
            None => Self::NotDetectable,
            Some(d) if d >= -70 => Self::Excellent,
            Some(d) if d >= -85 => Self::Good,
            Some(d) if d > -100 => Self::Fair,
            Some(_) => Self::Poor,
        }
    }
}

/// Convert an `<rssi>` code into dBm.
///
/// - 0: -115 dBm or less
/// - 1: -111 dBm
/// - 2..=30: -110 + 2 * (code - 2) dBm
/// - 31: -52 dBm or greater
/// - 99 (or anything else): not detectable
pub fn rssi_to_dbm(rssi: u8) -> Option<i8> {
    match rssi {
        0 => Some(-115),
        1 => Some(-111),
        2..=30 => Some(-110 + 2 * (rssi as i8 - 2)),
        31 => Some(-52),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatorSelectionMode {
    /// Automatic mode; <oper> field is ignored
    Automatic = 0,
    /// Manual; <oper> field shall be present
    Manual = 1,
    /// Deregister from network
    Deregister = 2,
    /// Set only <format>
    FormatOnly = 3,
    /// Manual/automatic; if manual selection fails, automatic mode is entered
    ManualAutomatic = 4,
    #[at_arg(default)]
    Unknown = 255,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatorFormat {
    /// Long format alphanumeric <oper>
    Long = 0,
    /// Short format alphanumeric <oper>
    Short = 1,
    /// Numeric <oper>
    Numeric = 2,
    #[at_arg(default)]
    Unknown = 255,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccessTechnology {
    Gsm = 0,
    GsmCompact = 1,
    GsmEgprs = 3,
    /// LTE M1 A GB
    LteM1 = 7,
    /// LTE NB S1
    LteNb = 9,
    #[at_arg(default)]
    Unknown = 255,
}

/// `<n>` of +CEREG: how much the unsolicited report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RegistrationUrc {
    /// Disable network registration unsolicited result code
    Disabled = 0,
    /// Enable network registration unsolicited result code
    Enabled = 1,
    /// Enable network registration and location information
    Location = 2,
    /// Enable network registration, location and PSM information
    LocationPsm = 4,
    #[at_arg(default)]
    Unknown = 255,
}

/// `<stat>` of +CEREG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RegistrationStatus {
    /// Not registered, MT is not currently searching an operator to register to
    NotRegistered = 0,
    /// Registered, home network
    RegisteredHome = 1,
    /// Not registered, but MT is currently trying to attach or searching
    Searching = 2,
    /// Registration denied
    Denied = 3,
    /// Reported as unknown by the module, e.g. out of E-UTRAN coverage
    OutOfCoverage = 4,
    /// Registered, roaming
    RegisteredRoaming = 5,
    #[at_arg(default)]
    Unknown = 255,
}

impl RegistrationStatus {
    pub fn is_registered(self) -> bool {
        matches!(self, Self::RegisteredHome | Self::RegisteredRoaming)
    }
}
