// src/common/registers.rs

//! ENS160 register map, taken from the datasheet register overview
//! (section 16, Table 14).

/// Factory-default 7-bit bus address (ADDR pin low).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x52;
/// Alternate 7-bit bus address selected by pulling the ADDR pin high.
pub const SECONDARY_I2C_ADDRESS: u8 = 0x53;

/// Value of the PART_ID register for an ENS160.
pub const ENS160_PART_ID: u16 = 0x0160;

/// OPMODE code triggering a software reset (not an operating mode; the
/// device lands in its power-on default once the reset completes).
pub const OPMODE_RESET: u8 = 0xF0;

/// First register address *not* covered by the DATA_MISR readback
/// checksum. Reads starting at or beyond this address leave the MISR
/// untouched.
pub const MISR_WINDOW_END: u8 = 0x38;

/// Width of the combined status + data block read in one transaction:
/// DEVICE_STATUS, DATA_AQI, DATA_TVOC, DATA_ECO2.
pub const DATA_BLOCK_LEN: usize = 6;

/// Width of the general-purpose read register block.
pub const GPR_BLOCK_LEN: usize = 8;

/// Register addresses of the ENS160.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    /// Part number, 2 bytes little-endian (RO).
    PartId = 0x00,
    /// Operating mode (RW), datasheet 16.2.2.
    OpMode = 0x10,
    /// Interrupt pin configuration (RW), Table 19.
    Config = 0x11,
    /// Command register (RW); commands execute in Idle mode only.
    Command = 0x12,
    /// Ambient temperature compensation input, 2 bytes LE, Kelvin * 64.
    TempIn = 0x13,
    /// Relative humidity compensation input, 2 bytes LE, percent << 9.
    RhIn = 0x15,
    /// Device status (RO), Table 26.
    DeviceStatus = 0x20,
    /// AQI-UBA index, bits 2:0 (RO).
    DataAqi = 0x21,
    /// TVOC concentration in ppb, 2 bytes LE (RO).
    DataTvoc = 0x22,
    /// Equivalent CO2 concentration in ppm, 2 bytes LE (RO).
    DataEco2 = 0x24,
    /// Temperature used in the device's calculations, 2 bytes LE (RO).
    DataT = 0x30,
    /// Relative humidity used in the device's calculations, 2 bytes LE (RO).
    DataRh = 0x32,
    /// Checksum over the previous read transaction (RO); see
    /// [`crate::common::misr`].
    DataMisr = 0x38,
    /// General-purpose write registers, 8 bytes.
    GprWrite0 = 0x40,
    /// General-purpose read registers, 8 bytes; carry raw resistances and
    /// command results.
    GprRead0 = 0x48,
}

impl Register {
    /// The bus address of this register.
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// Codes accepted by the COMMAND register (datasheet Table 20).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum CommandCode {
    /// No operation.
    Nop = 0x00,
    /// Load the firmware application version into GPR_READ4..6.
    GetAppVersion = 0x0E,
    /// Clear the general-purpose read registers.
    ClearGpr = 0xCC,
}
