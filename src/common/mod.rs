// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod codec;
pub mod error;
pub mod hal_traits;
pub mod misr;
pub mod registers;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

// From error.rs
pub use error::{DecodeError, Ens160Error};

// From hal_traits.rs
pub use hal_traits::{Ens160Bus, Ens160Instant, Ens160Timer, MAX_WRITE_PAYLOAD};

// From registers.rs
pub use registers::{
    CommandCode, Register, DEFAULT_I2C_ADDRESS, ENS160_PART_ID, SECONDARY_I2C_ADDRESS,
};

// From types.rs
pub use types::{
    AirQuality, CompensationInputs, DeviceStatus, FirmwareVersion, InterruptConfig, OperatingMode,
    PinDrive, PinPolarity, Reading, Validity,
};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.
