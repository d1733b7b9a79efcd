//! Data bearer bring-up.

use crate::command::device_lock::GetPinStatus;
use crate::command::mobile_control::types::Functionality;
use crate::command::mobile_control::SetModuleFunctionality;
use crate::command::psn::responses::AppNetworkContext;
use crate::command::psn::types::{ContextAction, GprsAttachedState};
use crate::command::psn::{
    DefinePdpContext, GetAppNetworkStatus, GetGprsAttached, SetAppNetworkActive,
    SetGprsAttached, SetPdpConfig,
};
use crate::config::BearerConfig;
use crate::error::{Error, NetworkError};
use crate::modem::Modem;
use crate::module_timing;
use crate::traits::{Clock, Transport};

/// Exchange failures of a poll mean "not yet". Caller errors do not.
fn poll_failed(e: Error) -> Result<(), Error> {
    match e {
        Error::InvalidArgument | Error::NotReady => Err(e),
        _ => Ok(()),
    }
}

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    /// Bring up the APP PDP context described by `bearer`, returning it once
    /// it holds an address.
    ///
    /// Short-circuits when some context is already active. Otherwise the radio
    /// is cycled through minimum functionality around the context definition,
    /// the SIM is waited for, the packet domain attached if needed, and the
    /// context configured, activated and polled until it reports an address.
    pub fn connect_to_network_bearer(
        &mut self,
        bearer: &BearerConfig,
    ) -> Result<AppNetworkContext, Error> {
        let define = DefinePdpContext {
            cid: bearer.cid,
            pdp_type: bearer.pdp_type,
            apn: bearer.apn.clone(),
        };
        let config = SetPdpConfig {
            pdp_idx: bearer.pdp_idx,
            ip_type: bearer.ip_type,
            apn: bearer.apn.clone(),
            username: bearer.username.clone(),
            password: bearer.password.clone(),
            auth: bearer.auth,
        };
        let activate = SetAppNetworkActive {
            pdp_idx: bearer.pdp_idx,
            action: ContextAction::Activate,
        };
        define.validate()?;
        config.validate()?;
        activate.validate()?;

        let status = self.client.send(&GetAppNetworkStatus)?;
        if let Some(active) = status.active_context() {
            info!(
                "PDP context {} already active with {}",
                active.pdp_idx,
                active.address.as_str()
            );
            return Ok(active.clone());
        }

        self.client.send(&SetModuleFunctionality {
            fun: Functionality::Minimum,
            rst: None,
        })?;
        self.client.send(&define)?;
        self.client.send(&SetModuleFunctionality {
            fun: Functionality::Full,
            rst: None,
        })?;

        self.wait_for_sim()?;

        if self.client.send(&GetGprsAttached)?.is_attached() {
            debug!("Already attached");
        } else {
            info!("Attaching to packet domain");
            self.client.send(&SetGprsAttached {
                state: GprsAttachedState::Attached,
            })?;
        }

        self.client.send(&config)?;
        self.client.send(&activate)?;

        self.wait_for_activation(bearer.pdp_idx)
    }

    fn wait_for_sim(&mut self) -> Result<(), Error> {
        for attempt in 0..module_timing::POLL_ATTEMPTS {
            if attempt > 0 {
                self.client.clock().sleep(module_timing::poll_interval());
            }
            match self.poll(&GetPinStatus) {
                Ok(status) if status.is_ready() => {
                    debug!("SIM is ready");
                    return Ok(());
                }
                Ok(status) => debug!("SIM not ready: {}", status.code.description()),
                Err(e) => poll_failed(e)?,
            }
        }

        error!("SIM not ready after {} attempts", module_timing::POLL_ATTEMPTS);
        Err(NetworkError::SimNotReady.into())
    }

    fn wait_for_activation(&mut self, pdp_idx: u8) -> Result<AppNetworkContext, Error> {
        for attempt in 0..module_timing::POLL_ATTEMPTS {
            if attempt > 0 {
                self.client.clock().sleep(module_timing::poll_interval());
            }
            match self.poll(&GetAppNetworkStatus) {
                Ok(status) => {
                    if let Some(ctx) = status.context(pdp_idx).filter(|c| c.is_active()) {
                        info!("PDP context {} active with {}", pdp_idx, ctx.address.as_str());
                        return Ok(ctx.clone());
                    }
                }
                Err(e) => poll_failed(e)?,
            }
        }

        error!("PDP context {} not activated", pdp_idx);
        Err(NetworkError::ActivationFailed.into())
    }
}
