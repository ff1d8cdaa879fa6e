// src/common/types.rs

use super::error::DecodeError;
use core::fmt;

/// Operating mode of the sensor, as written to the OPMODE register
/// (datasheet 16.2.2).
///
/// Transitions are explicit and sequential: the device does not accept a
/// direct DeepSleep -> Standard switch, callers pass through Idle first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum OperatingMode {
    /// Low-power standby. Power-on default; the register map stays
    /// readable but no gas sensing happens.
    DeepSleep = 0x00,
    /// Low-power idle. Required for COMMAND register operations.
    Idle = 0x01,
    /// Standard gas sensing mode; produces one result set per
    /// conversion cycle.
    Standard = 0x02,
}

/// Validity classification reported alongside every result set
/// (DEVICE_STATUS bits 3:2, datasheet Table 26).
///
/// The driver surfaces this untouched: a [`Reading`] tagged
/// [`Validity::WarmUp`] or [`Validity::StartUp`] still carries the numeric
/// fields, and it is the consumer's decision to discard or flag them. A
/// reading tagged [`Validity::InvalidOutput`] must not be treated as
/// numerically meaningful.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Validity {
    /// Normal operation; outputs are calibrated and trustworthy.
    Normal = 0b00,
    /// Warm-up phase (first ~3 minutes after entering Standard mode).
    WarmUp = 0b01,
    /// Initial start-up phase (first ~1 hour of first-ever operation).
    StartUp = 0b10,
    /// Output signals are out of range; values carry no meaning.
    InvalidOutput = 0b11,
}

impl Validity {
    /// Decodes the two validity bits. Infallible: all four patterns are
    /// defined.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Validity::Normal,
            0b01 => Validity::WarmUp,
            0b10 => Validity::StartUp,
            _ => Validity::InvalidOutput,
        }
    }
}

/// Air Quality Index according to the UBA, an ordinal from 1 (excellent)
/// to 5 (unhealthy). Reported in DATA_AQI bits 2:0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u8)]
pub enum AirQuality {
    Excellent = 1,
    Good = 2,
    Moderate = 3,
    Poor = 4,
    Unhealthy = 5,
}

impl AirQuality {
    /// The raw UBA ordinal, 1..=5.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AirQuality {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AirQuality::Excellent),
            2 => Ok(AirQuality::Good),
            3 => Ok(AirQuality::Moderate),
            4 => Ok(AirQuality::Poor),
            5 => Ok(AirQuality::Unhealthy),
            other => Err(DecodeError::InvalidAqi(other)),
        }
    }
}

impl From<AirQuality> for u8 {
    fn from(value: AirQuality) -> Self {
        value.ordinal()
    }
}

/// Decoded DEVICE_STATUS register (datasheet Table 26).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceStatus {
    /// STATAS: an operating mode involving gas sensing is running.
    pub running: bool,
    /// STATER: the device reports an error condition.
    pub error: bool,
    /// Validity of the current result set.
    pub validity: Validity,
    /// NEWDAT: a fresh result set is waiting in the DATA_* registers.
    pub new_data: bool,
    /// NEWGPR: fresh data is waiting in the general-purpose read registers.
    pub new_gpr: bool,
}

/// Decoded CONFIG register controlling the INTn pin (datasheet Table 19).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct InterruptConfig {
    /// INTEN: interrupt pin enabled at all.
    pub enabled: bool,
    /// INTDAT: assert on new data in the DATA_* registers.
    pub on_new_data: bool,
    /// INTGPR: assert on new data in the general-purpose read registers.
    pub on_new_gpr: bool,
    /// INT_CFG: output stage of the pin.
    pub drive: PinDrive,
    /// INTPOL: level the pin asserts to.
    pub polarity: PinPolarity,
}

/// INTn pin output stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PinDrive {
    /// Open drain (register default).
    #[default]
    OpenDrain,
    PushPull,
}

/// INTn pin active level.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PinPolarity {
    /// Active low (register default).
    #[default]
    ActiveLow,
    ActiveHigh,
}

/// One complete result set from a measurement cycle.
///
/// Constructed fresh per successful decode and never mutated afterwards.
/// The numeric fields are populated for every validity state, including
/// warm-up and start-up, so downstream consumers can discard or flag those
/// windows themselves.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Reading {
    /// UBA air quality index, 1..=5.
    pub air_quality: AirQuality,
    /// Total Volatile Organic Compounds concentration in ppb.
    pub tvoc_ppb: u16,
    /// Equivalent CO2 concentration estimate in ppm.
    pub eco2_ppm: u16,
    /// Raw hotplate resistance words from the general-purpose read
    /// registers, one per sensing element, little-endian decoded.
    pub raw_resistance: [u16; 4],
    /// Validity classification from the same status snapshot as the data.
    pub validity: Validity,
}

impl Reading {
    /// False when the device flagged the output signals as out of range;
    /// such a reading must not be consumed numerically.
    pub const fn has_valid_output(&self) -> bool {
        !matches!(self.validity, Validity::InvalidOutput)
    }
}

/// Firmware version reported by the GET_APPVER command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub release: u8,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

/// Ambient compensation values echoed back by the device (DATA_T /
/// DATA_RH), decoded to host units.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CompensationInputs {
    /// Ambient temperature the device is compensating with, in
    /// millidegrees Celsius.
    pub temperature_millicelsius: i32,
    /// Relative humidity the device is compensating with, in whole
    /// percent.
    pub relative_humidity_percent: u8,
}
