#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod command;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod modem;
mod module_timing;
mod mqtt;
mod network;
pub mod traits;

#[cfg(test)]
mod test_helpers;

pub use client::AtClient;
pub use config::{BearerConfig, Config, MqttConfig, UartConfig};
pub use connectivity::ConnectivitySnapshot;
pub use error::Error;
pub use modem::Modem;
pub use traits::{Clock, Transport};
