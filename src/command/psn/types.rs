//! Argument and parameter types used by Packet Switched Data Services Commands
//! and Responses
use atat::atat_derive::AtatEnum;

/// `<PDP_type>` of a +CGDCONT context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PdpType {
    #[default]
    Ip,
    Ipv6,
    Ipv4v6,
    NonIp,
    Unknown,
}

impl PdpType {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Ip => Some("IP"),
            Self::Ipv6 => Some("IPV6"),
            Self::Ipv4v6 => Some("IPV4V6"),
            Self::NonIp => Some("Non-IP"),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GprsAttachedState {
    Detached = 0,
    Attached = 1,
    #[at_arg(default)]
    Unknown = 255,
}

/// `<ip_type>` of a +CNCFG configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CnIpType {
    /// Dual PDN stack
    Dual = 0,
    Ipv4 = 1,
    Ipv6 = 2,
    NonIp = 3,
    /// Extended Non-IP
    ExNonIp = 4,
    #[at_arg(default)]
    Unknown = 255,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AuthenticationType {
    None = 0,
    Pap = 1,
    Chap = 2,
    PapOrChap = 3,
    #[at_arg(default)]
    Unknown = 255,
}

/// `<action>` of +CNACT
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ContextAction {
    Deactivate = 0,
    Activate = 1,
    AutoActivate = 2,
}

/// `<statusx>` of +CNACT
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ContextStatus {
    Deactivated = 0,
    Activated = 1,
    InOperation = 2,
    #[at_arg(default)]
    Unknown = 255,
}
