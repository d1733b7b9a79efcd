use heapless::String;

use crate::client::{AtClient, HandlerConfig};
use crate::command::device_lock::responses::PinStatus;
use crate::command::device_lock::{EnterPin, GetPinStatus};
use crate::command::general::responses::{AtTest, CommandEcho};
use crate::command::general::types::{EchoMode, TestStatus};
use crate::command::general::{At, SetEchoMode};
use crate::command::mobile_control::responses::{
    ModuleFunctionality, ReportMobileTerminationError,
};
use crate::command::mobile_control::types::{Functionality, TerminationErrorMode};
use crate::command::mobile_control::{
    GetModuleFunctionality, GetReportMobileTerminationError, SetModuleFunctionality,
    SetReportMobileTerminationError,
};
use crate::command::mqtt::responses::{MqttParameters, MqttState};
use crate::command::mqtt::types::{MqttParameter, QoS};
use crate::command::mqtt::{
    GetMqttParameters, GetMqttState, SetMqttNumber, SetMqttText, SetMqttUrl,
};
use crate::command::network_service::responses::{
    EpsRegistration, OperatorSelection, SignalQuality,
};
use crate::command::network_service::types::{OperatorSelectionMode, RegistrationUrc};
use crate::command::network_service::{
    GetEpsNetworkRegistrationStatus, GetOperatorSelection, GetSignalQuality,
    SetEpsNetworkRegistrationStatus, SetOperatorSelection,
};
use crate::command::psn::responses::{
    AppNetworkStatus, GprsAttached, NetworkApn, PdpConfigurations, PdpContextDefinitions,
};
use crate::command::psn::types::{ContextAction, GprsAttachedState, PdpType};
use crate::command::psn::{
    DefinePdpContext, GetAppNetworkStatus, GetGprsAttached, GetNetworkApn, GetPdpConfig,
    GetPdpContexts, SetAppNetworkActive, SetGprsAttached, SetPdpConfig,
};
use crate::command::{quotable, AtResponse};
use crate::config::{BearerConfig, Config, MqttConfig};
use crate::error::Error;
use crate::traits::{Clock, Transport};

/// Handle to one SIM7080 module.
///
/// Owns the serial port through its [`AtClient`], so every exchange with the
/// module is serialized by `&mut self`.
pub struct Modem<T, C> {
    pub(crate) client: AtClient<T, C>,
    pub(crate) config: Config,
    /// MQTT parameters on the module match `config.mqtt`
    pub(crate) mqtt_ready: bool,
}

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    pub fn new(transport: T, clock: C, config: Config) -> Self {
        Self {
            client: AtClient::new(transport, clock),
            config,
            mqtt_ready: false,
        }
    }

    /// Mark the serial port usable and check that the module answers.
    pub fn init(&mut self) -> Result<(), Error> {
        self.client.set_ready(true);
        match self.client.send(&At) {
            Ok(AtTest {
                status: TestStatus::Ok,
            }) => {
                info!("Modem answered on UART{}", self.config.uart.port);
                Ok(())
            }
            Ok(_) => {
                self.client.set_ready(false);
                Err(Error::DeviceError)
            }
            Err(e) => {
                error!("Modem did not answer: {:?}", e);
                self.client.set_ready(false);
                Err(e)
            }
        }
    }

    /// Release the serial port and the clock.
    pub fn deinit(mut self) -> (T, C) {
        self.client.set_ready(false);
        self.mqtt_ready = false;
        self.client.release()
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_ready()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the broker configuration. It is pushed to the module on the next
    /// [`mqtt_connect`](Self::mqtt_connect).
    pub fn set_mqtt_config(&mut self, mqtt: MqttConfig) {
        self.config.mqtt = mqtt;
        self.mqtt_ready = false;
    }

    pub fn is_mqtt_ready(&self) -> bool {
        self.mqtt_ready
    }

    pub fn client(&mut self) -> &mut AtClient<T, C> {
        &mut self.client
    }

    /// Send an AT command to the modem. This is useful for configuration the
    /// driver does not cover, but might break the driver's functionality if
    /// the settings interfere with its own.
    pub fn send<A>(&mut self, cmd: &A) -> Result<A::Response, Error>
    where
        A: atat::AtatCmd,
        A::Response: AtResponse,
    {
        self.client.send(cmd)
    }

    pub fn test_communication(&mut self) -> Result<AtTest, Error> {
        self.client.send(&At)
    }

    pub fn check_sim_status(&mut self) -> Result<PinStatus, Error> {
        self.client.send(&GetPinStatus)
    }

    pub fn enter_pin(&mut self, pin: &str, new_pin: Option<&str>) -> Result<(), Error> {
        let pin = String::try_from(quotable(pin)?).map_err(|_| Error::InvalidArgument)?;
        let new_pin = new_pin
            .map(|p| String::try_from(quotable(p)?).map_err(|_| Error::InvalidArgument))
            .transpose()?;
        self.client.send(&EnterPin { pin, new_pin })?;
        Ok(())
    }

    pub fn set_functionality(&mut self, fun: Functionality) -> Result<ModuleFunctionality, Error> {
        if fun == Functionality::Unknown {
            return Err(Error::InvalidArgument);
        }
        self.client.send(&SetModuleFunctionality { fun, rst: None })
    }

    pub fn get_functionality(&mut self) -> Result<ModuleFunctionality, Error> {
        self.client.send(&GetModuleFunctionality)
    }

    pub fn check_signal_quality(&mut self) -> Result<SignalQuality, Error> {
        self.client.send(&GetSignalQuality)
    }

    pub fn set_echo_mode(&mut self, mode: EchoMode) -> Result<CommandEcho, Error> {
        if mode == EchoMode::Unknown {
            return Err(Error::InvalidArgument);
        }
        self.client.send(&SetEchoMode { mode })
    }

    pub fn set_error_report_mode(
        &mut self,
        n: TerminationErrorMode,
    ) -> Result<ReportMobileTerminationError, Error> {
        if n == TerminationErrorMode::Unknown {
            return Err(Error::InvalidArgument);
        }
        self.client.send(&SetReportMobileTerminationError { n })
    }

    pub fn get_error_report_mode(&mut self) -> Result<ReportMobileTerminationError, Error> {
        self.client.send(&GetReportMobileTerminationError)
    }

    pub fn define_pdp_context(
        &mut self,
        cid: u8,
        pdp_type: PdpType,
        apn: &str,
    ) -> Result<PdpContextDefinitions, Error> {
        let apn = String::try_from(apn).map_err(|_| Error::InvalidArgument)?;
        let cmd = DefinePdpContext { cid, pdp_type, apn };
        cmd.validate()?;
        self.client.send(&cmd)
    }

    pub fn get_pdp_contexts(&mut self) -> Result<PdpContextDefinitions, Error> {
        self.client.send(&GetPdpContexts)
    }

    pub fn get_gprs_attached(&mut self) -> Result<GprsAttached, Error> {
        self.client.send(&GetGprsAttached)
    }

    pub fn set_gprs_attached(&mut self, attached: bool) -> Result<GprsAttached, Error> {
        let state = if attached {
            GprsAttachedState::Attached
        } else {
            GprsAttachedState::Detached
        };
        self.client.send(&SetGprsAttached { state })
    }

    pub fn get_operator_info(&mut self) -> Result<OperatorSelection, Error> {
        self.client.send(&GetOperatorSelection)
    }

    /// Hand operator selection back to the module, e.g. after a deregister.
    pub fn set_automatic_operator_selection(&mut self) -> Result<OperatorSelection, Error> {
        self.client.send(&SetOperatorSelection {
            mode: OperatorSelectionMode::Automatic,
            format: None,
            oper: None,
        })
    }

    pub fn get_network_apn(&mut self) -> Result<NetworkApn, Error> {
        self.client.send(&GetNetworkApn)
    }

    pub fn get_registration(&mut self) -> Result<EpsRegistration, Error> {
        self.client.send(&GetEpsNetworkRegistrationStatus)
    }

    pub fn set_registration_urc(&mut self, n: RegistrationUrc) -> Result<EpsRegistration, Error> {
        if n == RegistrationUrc::Unknown {
            return Err(Error::InvalidArgument);
        }
        self.client.send(&SetEpsNetworkRegistrationStatus { n })
    }

    pub fn set_pdp_config(&mut self, bearer: &BearerConfig) -> Result<PdpConfigurations, Error> {
        let cmd = SetPdpConfig {
            pdp_idx: bearer.pdp_idx,
            ip_type: bearer.ip_type,
            apn: bearer.apn.clone(),
            username: bearer.username.clone(),
            password: bearer.password.clone(),
            auth: bearer.auth,
        };
        cmd.validate()?;
        self.client.send(&cmd)
    }

    pub fn get_pdp_config(&mut self) -> Result<PdpConfigurations, Error> {
        self.client.send(&GetPdpConfig)
    }

    pub fn get_network_status(&mut self) -> Result<AppNetworkStatus, Error> {
        self.client.send(&GetAppNetworkStatus)
    }

    pub fn activate_network(&mut self, pdp_idx: u8, action: ContextAction) -> Result<(), Error> {
        let cmd = SetAppNetworkActive { pdp_idx, action };
        cmd.validate()?;
        self.client.send(&cmd)?;
        Ok(())
    }

    pub fn get_mqtt_parameters(&mut self) -> Result<MqttParameters, Error> {
        self.client.send(&GetMqttParameters)
    }

    /// Write one `AT+SMCONF` parameter. Text values must fit 128 bytes and
    /// carry no `"`.
    pub fn set_mqtt_parameter(&mut self, param: MqttParameter<'_>) -> Result<(), Error> {
        let tag = param.tag();
        match param {
            MqttParameter::ClientId(value)
            | MqttParameter::Username(value)
            | MqttParameter::Password(value)
            | MqttParameter::Topic(value)
            | MqttParameter::Message(value) => {
                let value = smconf_text(value)?;
                self.client.send(&SetMqttText { tag, value })?;
            }
            MqttParameter::Url { host, port } => {
                let host = smconf_text(host)?;
                self.client.send(&SetMqttUrl { tag, host, port })?;
            }
            MqttParameter::KeepAlive(value) => {
                self.client.send(&SetMqttNumber { tag, value })?;
            }
            MqttParameter::Qos(QoS::Unknown) => return Err(Error::InvalidArgument),
            MqttParameter::Qos(qos) => {
                let value = u16::from(qos as u8);
                self.client.send(&SetMqttNumber { tag, value })?;
            }
            MqttParameter::CleanSession(flag)
            | MqttParameter::Retain(flag)
            | MqttParameter::SubHex(flag)
            | MqttParameter::AsyncMode(flag) => {
                let value = u16::from(flag);
                self.client.send(&SetMqttNumber { tag, value })?;
            }
        }
        Ok(())
    }

    pub fn mqtt_state(&mut self) -> Result<MqttState, Error> {
        self.client.send(&GetMqttState)
    }

    /// Single attempt of `cmd`, for status polls that do their own retrying.
    pub(crate) fn poll<A>(&mut self, cmd: &A) -> Result<A::Response, Error>
    where
        A: atat::AtatCmd,
        A::Response: AtResponse,
    {
        let config = HandlerConfig::for_cmd::<A>().single_attempt();
        self.client.send_with(cmd, config)
    }
}

fn smconf_text(value: &str) -> Result<&str, Error> {
    if value.len() > 128 {
        return Err(Error::InvalidArgument);
    }
    quotable(value)
}
