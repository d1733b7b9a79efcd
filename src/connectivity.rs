//! Layered connectivity checks.
//!
//! Each layer is read fresh from the module and evaluated on the spot; nothing
//! is cached between checks, so they can be polled freely. A check that
//! cannot complete one of its reads fails with that read's error rather than
//! reporting the layer as down.

use crate::command::device_lock::responses::PinStatus;
use crate::command::device_lock::GetPinStatus;
use crate::command::mobile_control::responses::ModuleFunctionality;
use crate::command::mobile_control::types::Functionality;
use crate::command::mobile_control::GetModuleFunctionality;
use crate::command::mqtt::responses::MqttState;
use crate::command::mqtt::GetMqttState;
use crate::command::network_service::responses::{
    EpsRegistration, OperatorSelection, SignalQuality,
};
use crate::command::network_service::types::OperatorSelectionMode;
use crate::command::network_service::{
    GetEpsNetworkRegistrationStatus, GetOperatorSelection, GetSignalQuality,
};
use crate::command::psn::responses::{AppNetworkContext, AppNetworkStatus, GprsAttached};
use crate::command::psn::{GetAppNetworkStatus, GetGprsAttached};
use crate::error::Error;
use crate::modem::Modem;
use crate::traits::{Clock, Transport};

/// Signal has to be stronger than this for the physical layer to be up.
pub const SIGNAL_FLOOR_DBM: i8 = -100;

/// SIM, radio signal and functionality.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalLayer {
    pub up: bool,
    pub sim: PinStatus,
    pub signal: SignalQuality,
    pub functionality: ModuleFunctionality,
}

impl PhysicalLayer {
    pub fn evaluate(
        sim: PinStatus,
        signal: SignalQuality,
        functionality: ModuleFunctionality,
    ) -> Self {
        let strong_enough = signal.rssi_dbm.map_or(false, |dbm| dbm > SIGNAL_FLOOR_DBM);
        Self {
            up: sim.is_ready()
                && strong_enough
                && functionality.functionality == Functionality::Full,
            sim,
            signal,
            functionality,
        }
    }
}

/// Packet domain attach, EPS registration and operator selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataLinkLayer {
    pub up: bool,
    pub attached: GprsAttached,
    pub registration: EpsRegistration,
    pub operator: OperatorSelection,
}

impl DataLinkLayer {
    pub fn evaluate(
        attached: GprsAttached,
        registration: EpsRegistration,
        operator: OperatorSelection,
    ) -> Self {
        Self {
            up: attached.is_attached()
                && registration.is_registered()
                && operator.mode != OperatorSelectionMode::Deregister,
            attached,
            registration,
            operator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkLayer {
    pub up: bool,
    pub status: AppNetworkStatus,
}

impl NetworkLayer {
    pub fn evaluate(status: AppNetworkStatus) -> Self {
        Self {
            up: status.active_context().is_some(),
            status,
        }
    }

    pub fn active_context(&self) -> Option<&AppNetworkContext> {
        self.status.active_context()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplicationLayer {
    pub up: bool,
    pub state: MqttState,
}

impl ApplicationLayer {
    pub fn evaluate(state: MqttState) -> Self {
        Self {
            up: state.is_connected(),
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivitySnapshot {
    pub physical: PhysicalLayer,
    pub data_link: DataLinkLayer,
    pub network: NetworkLayer,
    pub application: ApplicationLayer,
}

impl ConnectivitySnapshot {
    pub fn is_fully_connected(&self) -> bool {
        self.physical.up && self.data_link.up && self.network.up && self.application.up
    }
}

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    pub fn check_physical_layer(&mut self) -> Result<PhysicalLayer, Error> {
        let sim = self.client.send(&GetPinStatus)?;
        let signal = self.client.send(&GetSignalQuality)?;
        let functionality = self.client.send(&GetModuleFunctionality)?;
        let layer = PhysicalLayer::evaluate(sim, signal, functionality);
        debug!(
            "Physical layer up: {} (SIM {}, {:?} dBm)",
            layer.up,
            layer.sim.code.description(),
            layer.signal.rssi_dbm
        );
        Ok(layer)
    }

    pub fn check_data_link_layer(&mut self) -> Result<DataLinkLayer, Error> {
        let attached = self.client.send(&GetGprsAttached)?;
        let registration = self.client.send(&GetEpsNetworkRegistrationStatus)?;
        let operator = self.client.send(&GetOperatorSelection)?;
        let layer = DataLinkLayer::evaluate(attached, registration, operator);
        debug!("Data link layer up: {}", layer.up);
        Ok(layer)
    }

    pub fn check_network_layer(&mut self) -> Result<NetworkLayer, Error> {
        let layer = NetworkLayer::evaluate(self.client.send(&GetAppNetworkStatus)?);
        debug!("Network layer up: {}", layer.up);
        Ok(layer)
    }

    pub fn check_application_layer(&mut self) -> Result<ApplicationLayer, Error> {
        let layer = ApplicationLayer::evaluate(self.client.send(&GetMqttState)?);
        debug!("Application layer up: {}", layer.up);
        Ok(layer)
    }

    /// All four layers, bottom up.
    pub fn check_connectivity(&mut self) -> Result<ConnectivitySnapshot, Error> {
        Ok(ConnectivitySnapshot {
            physical: self.check_physical_layer()?,
            data_link: self.check_data_link_layer()?,
            network: self.check_network_layer()?,
            application: self.check_application_layer()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::network_service::types::RegistrationStatus;
    use crate::config::Config;
    use crate::test_helpers::{MockClock, MockTransport};

    fn modem(replies: &[&str]) -> Modem<MockTransport, MockClock> {
        let mut modem = Modem::new(
            MockTransport::new(&["AT\r\r\nOK\r\n"]),
            MockClock::new(),
            Config::default(),
        );
        modem.init().unwrap();
        for reply in replies {
            modem.client.transport_mut().push_reply(reply);
        }
        modem
    }

    const PHYSICAL_UP: [&str; 3] = [
        "+CPIN: READY\r\n\r\nOK\r\n",
        "+CSQ: 17,99\r\n\r\nOK\r\n",
        "+CFUN: 1\r\n\r\nOK\r\n",
    ];

    #[test]
    fn physical_up() {
        let mut modem = modem(&PHYSICAL_UP);
        let layer = modem.check_physical_layer().unwrap();
        assert!(layer.up);
        assert_eq!(layer.signal.rssi_dbm, Some(-80));
    }

    #[test]
    fn physical_down_on_weak_signal() {
        // rssi 5 is -104 dBm
        let mut modem = modem(&[
            "+CPIN: READY\r\n\r\nOK\r\n",
            "+CSQ: 5,0\r\n\r\nOK\r\n",
            "+CFUN: 1\r\n\r\nOK\r\n",
        ]);
        assert!(!modem.check_physical_layer().unwrap().up);
    }

    #[test]
    fn data_link_requires_registration() {
        let mut modem = modem(&[
            "+CGATT: 1\r\n\r\nOK\r\n",
            "+CEREG: 0,2\r\n\r\nOK\r\n",
            "+COPS: 0,0,\"Telia\",7\r\n\r\nOK\r\n",
        ]);
        let layer = modem.check_data_link_layer().unwrap();
        assert_eq!(layer.registration.stat, RegistrationStatus::Searching);
        assert!(!layer.up);
    }

    #[test]
    fn failed_read_is_an_error_not_a_down_layer() {
        let mut modem = modem(&["\r\n+CME ERROR: 4\r\n"; 5]);
        assert_eq!(modem.check_network_layer(), Err(Error::CommandFailed));
    }

    #[test]
    fn full_snapshot() {
        let mut replies = PHYSICAL_UP.to_vec();
        replies.extend_from_slice(&[
            "+CGATT: 1\r\n\r\nOK\r\n",
            "+CEREG: 0,1\r\n\r\nOK\r\n",
            "+COPS: 0,0,\"Telia\",7\r\n\r\nOK\r\n",
            "+CNACT: 0,1,\"10.0.0.5\"\r\n+CNACT: 1,0,\"0.0.0.0\"\r\n\r\nOK\r\n",
            "+SMSTATE: 1\r\n\r\nOK\r\n",
        ]);
        let mut modem = modem(&replies);
        let snapshot = modem.check_connectivity().unwrap();
        assert!(snapshot.is_fully_connected());
        assert_eq!(
            snapshot.network.active_context().unwrap().address.as_str(),
            "10.0.0.5"
        );
    }
}
