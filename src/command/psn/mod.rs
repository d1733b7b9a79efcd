//! ### 5 / 18 - Packet Switched Data Services Commands
//!
//! A PDP context defined with +CGDCONT is what the network attaches with. The
//! SIM7080 internal IP stack (and with it the MQTT client) does not use those
//! contexts directly: it runs on its own APP PDP contexts, configured with
//! +CNCFG and activated with +CNACT. Up to four of them exist, indexed 0-3.

pub mod impl_;
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use heapless::String;
use responses::{AppNetworkStatus, GprsAttached, NetworkApn, PdpConfigurations, PdpContextDefinitions};
use types::{AuthenticationType, CnIpType, ContextAction, GprsAttachedState, PdpType};

use super::{quotable, NoResponse};
use crate::error::Error;

/// 18.4 AT+CGDCONT Define PDP Context
///
/// Defines the connection parameters for a PDP context, identified by the local
/// context identification parameter <cid>. Each context is permanently stored
/// so that its definition is persistent over power cycles.
#[derive(Debug, Clone, PartialEq, Eq, AtatCmd)]
#[at_cmd("+CGDCONT", PdpContextDefinitions, timeout_ms = 5000)]
pub struct DefinePdpContext {
    /// 1-15
    #[at_arg(position = 0)]
    pub cid: u8,
    #[at_arg(position = 1)]
    pub pdp_type: PdpType,
    #[at_arg(position = 2)]
    pub apn: String<100>,
}

impl DefinePdpContext {
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=15).contains(&self.cid) || self.pdp_type == PdpType::Unknown {
            return Err(Error::InvalidArgument);
        }
        quotable(&self.apn)?;
        Ok(())
    }
}

/// 18.4 AT+CGDCONT Define PDP Context
///
/// Reports every context that has been defined.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CGDCONT?", PdpContextDefinitions, timeout_ms = 5000)]
pub struct GetPdpContexts;

/// 18.13 AT+CGATT Attach or Detach from GPRS Service
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CGATT?", GprsAttached, timeout_ms = 75000)]
pub struct GetGprsAttached;

/// 18.13 AT+CGATT Attach or Detach from GPRS Service
///
/// Attaching can take up to 75 seconds while the module searches.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CGATT", GprsAttached, timeout_ms = 75000)]
pub struct SetGprsAttached {
    #[at_arg(position = 0)]
    pub state: GprsAttachedState,
}

/// 5.2.4 AT+CGNAPN Get Network APN in CAT-M or NB-IOT
///
/// The APN the network handed out during attach, if any.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CGNAPN", NetworkApn, timeout_ms = 5000)]
pub struct GetNetworkApn;

/// 5.2.2 AT+CNCFG PDP Configure
#[derive(Debug, Clone, PartialEq, Eq, AtatCmd)]
#[at_cmd("+CNCFG", PdpConfigurations, timeout_ms = 5000)]
pub struct SetPdpConfig {
    /// 0-3
    #[at_arg(position = 0)]
    pub pdp_idx: u8,
    #[at_arg(position = 1)]
    pub ip_type: CnIpType,
    #[at_arg(position = 2)]
    pub apn: String<100>,
    #[at_arg(position = 3)]
    pub username: String<64>,
    #[at_arg(position = 4)]
    pub password: String<64>,
    #[at_arg(position = 5)]
    pub auth: AuthenticationType,
}

impl SetPdpConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.pdp_idx > 3
            || self.ip_type == CnIpType::Unknown
            || self.auth == AuthenticationType::Unknown
        {
            return Err(Error::InvalidArgument);
        }
        for value in [&self.apn[..], &self.username[..], &self.password[..]] {
            quotable(value)?;
        }
        Ok(())
    }
}

/// 5.2.2 AT+CNCFG PDP Configure
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CNCFG?", PdpConfigurations, timeout_ms = 5000)]
pub struct GetPdpConfig;

/// 5.2.3 AT+CNACT APP Network Active
///
/// Reports status and local address of every APP PDP context.
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CNACT?", AppNetworkStatus, timeout_ms = 5000)]
pub struct GetAppNetworkStatus;

/// 5.2.3 AT+CNACT APP Network Active
///
/// The module answers `OK` right away; activation completes asynchronously
/// and has to be polled with [`GetAppNetworkStatus`].
#[derive(Debug, Clone, AtatCmd)]
#[at_cmd("+CNACT", NoResponse, timeout_ms = 10000)]
pub struct SetAppNetworkActive {
    #[at_arg(position = 0)]
    pub pdp_idx: u8,
    #[at_arg(position = 1)]
    pub action: ContextAction,
}

impl SetAppNetworkActive {
    pub fn validate(&self) -> Result<(), Error> {
        if self.pdp_idx > 3 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}
