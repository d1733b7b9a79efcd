//! Argument and parameter types used by SIM PIN Commands and Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatusCode {
    /// MT is not pending for any password
    Ready,
    /// MT is waiting SIM PIN to be given
    SimPin,
    /// MT is waiting SIM PUK to be given
    SimPuk,
    /// ME is waiting phone to SIM card (antitheft)
    PhSimPin,
    /// ME is waiting SIM PUK (antitheft)
    PhSimPuk,
    /// ME is waiting network personalization password
    PhNetPin,
    /// PIN2 is required (for FDN)
    SimPin2,
    /// PUK2 is required
    SimPuk2,
    #[default]
    Unknown,
}

impl PinStatusCode {
    pub fn description(self) -> &'static str {
        match self {
            Self::Ready => "Ready - No password required",
            Self::SimPin => "Waiting for SIM PIN",
            Self::SimPuk => "Waiting for SIM PUK",
            Self::PhSimPin => "Waiting for Phone-to-SIM password",
            Self::PhSimPuk => "Waiting for Phone-to-SIM PUK",
            Self::PhNetPin => "Waiting for Network personalization password",
            Self::SimPin2 => "Waiting for SIM PIN2",
            Self::SimPuk2 => "Waiting for SIM PUK2",
            Self::Unknown => "Unknown status",
        }
    }
}
