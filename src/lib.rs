// src/lib.rs

//! Platform-agnostic driver for the ScioSense ENS160 digital multi-gas
//! sensor (AQI-UBA, TVOC, eCO2) over a register-addressed I2C-style bus.
//!
//! The core is transport-agnostic: implement [`Ens160Bus`] and
//! [`Ens160Timer`] for your platform, or enable the `impl-ehal` feature
//! for a ready-made `embedded-hal` 1.0 adapter. Everything is synchronous
//! and blocking; the only waits are the mode-entry settling delays and the
//! bounded data-ready poll, both visible to the caller.

#![no_std] // Specify no_std at the crate root

#[cfg(test)]
extern crate std;

pub mod common;
pub mod device;

#[cfg(feature = "impl-ehal")]
pub mod adapters;

// Re-export key types for convenience
pub use common::{DecodeError, Ens160Error};
pub use common::{Ens160Bus, Ens160Instant, Ens160Timer};
pub use common::{AirQuality, OperatingMode, Reading, Validity};
pub use device::Ens160;
