// src/common/codec.rs

//! Translation between raw register bytes and typed domain values.
//!
//! Every decoder that takes a byte slice checks the width first and fails
//! with [`DecodeError::Length`] on a mismatch; a short or long field is
//! never truncated or zero-padded into shape.

use super::error::DecodeError;
use super::registers::{DATA_BLOCK_LEN, GPR_BLOCK_LEN};
use super::types::{
    AirQuality, CompensationInputs, DeviceStatus, FirmwareVersion, InterruptConfig, OperatingMode,
    PinDrive, PinPolarity, Reading, Validity,
};

// DEVICE_STATUS bit positions (Table 26).
const STATUS_STATAS: u8 = 0x80;
const STATUS_STATER: u8 = 0x40;
const STATUS_NEWDAT: u8 = 0x02;
const STATUS_NEWGPR: u8 = 0x01;
const STATUS_VALIDITY_SHIFT: u8 = 2;

// CONFIG bit positions (Table 19).
const CONFIG_INTEN: u8 = 0x01;
const CONFIG_INTDAT: u8 = 0x02;
const CONFIG_INTGPR: u8 = 0x08;
const CONFIG_INT_CFG: u8 = 0x20;
const CONFIG_INTPOL: u8 = 0x40;

/// Little-endian u16 out of an exactly-two-byte field.
fn take_u16_le(bytes: &[u8]) -> Result<u16, DecodeError> {
    match bytes {
        [lo, hi] => Ok(u16::from_le_bytes([*lo, *hi])),
        _ => Err(DecodeError::Length {
            expected: 2,
            got: bytes.len(),
        }),
    }
}

/// Unpacks the DEVICE_STATUS byte.
pub fn decode_status(byte: u8) -> DeviceStatus {
    DeviceStatus {
        running: byte & STATUS_STATAS != 0,
        error: byte & STATUS_STATER != 0,
        validity: Validity::from_bits(byte >> STATUS_VALIDITY_SHIFT),
        new_data: byte & STATUS_NEWDAT != 0,
        new_gpr: byte & STATUS_NEWGPR != 0,
    }
}

/// Decodes the AQI-UBA ordinal from the DATA_AQI byte (bits 2:0).
pub fn decode_aqi(byte: u8) -> Result<AirQuality, DecodeError> {
    AirQuality::try_from(byte & 0x07)
}

/// Decodes the DATA_TVOC field to a ppb concentration.
pub fn decode_tvoc(bytes: &[u8]) -> Result<u16, DecodeError> {
    take_u16_le(bytes)
}

/// Decodes the DATA_ECO2 field to a ppm concentration.
pub fn decode_eco2(bytes: &[u8]) -> Result<u16, DecodeError> {
    take_u16_le(bytes)
}

/// Decodes the PART_ID field.
pub fn decode_part_id(bytes: &[u8]) -> Result<u16, DecodeError> {
    take_u16_le(bytes)
}

/// The byte written to OPMODE for a target mode.
pub const fn encode_mode(mode: OperatingMode) -> u8 {
    mode as u8
}

/// Interprets an OPMODE byte read back from the device.
pub fn decode_mode(byte: u8) -> Result<OperatingMode, DecodeError> {
    match byte {
        0x00 => Ok(OperatingMode::DeepSleep),
        0x01 => Ok(OperatingMode::Idle),
        0x02 => Ok(OperatingMode::Standard),
        other => Err(DecodeError::InvalidMode(other)),
    }
}

/// The byte written to CONFIG for an interrupt configuration.
pub fn encode_config(config: InterruptConfig) -> u8 {
    let mut byte = 0;
    if config.enabled {
        byte |= CONFIG_INTEN;
    }
    if config.on_new_data {
        byte |= CONFIG_INTDAT;
    }
    if config.on_new_gpr {
        byte |= CONFIG_INTGPR;
    }
    if config.drive == PinDrive::PushPull {
        byte |= CONFIG_INT_CFG;
    }
    if config.polarity == PinPolarity::ActiveHigh {
        byte |= CONFIG_INTPOL;
    }
    byte
}

/// Unpacks the CONFIG byte; reserved bits are ignored.
pub fn decode_config(byte: u8) -> InterruptConfig {
    InterruptConfig {
        enabled: byte & CONFIG_INTEN != 0,
        on_new_data: byte & CONFIG_INTDAT != 0,
        on_new_gpr: byte & CONFIG_INTGPR != 0,
        drive: if byte & CONFIG_INT_CFG != 0 {
            PinDrive::PushPull
        } else {
            PinDrive::OpenDrain
        },
        polarity: if byte & CONFIG_INTPOL != 0 {
            PinPolarity::ActiveHigh
        } else {
            PinPolarity::ActiveLow
        },
    }
}

/// Builds a [`Reading`] from the combined status + data block
/// (DEVICE_STATUS..DATA_ECO2) and the general-purpose read block.
///
/// The validity tag comes from the status byte of the same block, so it
/// describes the exact register-window snapshot the numbers came from.
pub fn decode_reading(data: &[u8], gpr: &[u8]) -> Result<Reading, DecodeError> {
    if data.len() != DATA_BLOCK_LEN {
        return Err(DecodeError::Length {
            expected: DATA_BLOCK_LEN,
            got: data.len(),
        });
    }
    if gpr.len() != GPR_BLOCK_LEN {
        return Err(DecodeError::Length {
            expected: GPR_BLOCK_LEN,
            got: gpr.len(),
        });
    }

    let status = decode_status(data[0]);
    let mut raw_resistance = [0u16; 4];
    for (word, pair) in raw_resistance.iter_mut().zip(gpr.chunks_exact(2)) {
        *word = take_u16_le(pair)?;
    }

    Ok(Reading {
        air_quality: decode_aqi(data[1])?,
        tvoc_ppb: decode_tvoc(&data[2..4])?,
        eco2_ppm: decode_eco2(&data[4..6])?,
        raw_resistance,
        validity: status.validity,
    })
}

/// Extracts the firmware application version from the general-purpose read
/// block after a GET_APPVER command (GPR_READ4..6).
pub fn decode_firmware_version(gpr: &[u8]) -> Result<FirmwareVersion, DecodeError> {
    if gpr.len() != GPR_BLOCK_LEN {
        return Err(DecodeError::Length {
            expected: GPR_BLOCK_LEN,
            got: gpr.len(),
        });
    }
    Ok(FirmwareVersion {
        major: gpr[4],
        minor: gpr[5],
        release: gpr[6],
    })
}

/// Encodes an ambient temperature for TEMP_IN: Kelvin scaled by 64,
/// little-endian. Range validation happens at the driver surface.
pub fn encode_temperature(millicelsius: i32) -> u16 {
    ((273_150 + millicelsius as i64) * 64 / 1000) as u16
}

/// Decodes a DATA_T / TEMP_IN word back to millidegrees Celsius.
pub fn decode_temperature(raw: u16) -> i32 {
    (raw as i64 * 1000 / 64 - 273_150) as i32
}

/// Encodes a relative humidity for RH_IN: percent scaled into the top
/// seven bits.
pub fn encode_humidity(percent: u8) -> u16 {
    (percent as u16) << 9
}

/// Decodes a DATA_RH / RH_IN word back to whole percent.
pub fn decode_humidity(raw: u16) -> u8 {
    (raw >> 9) as u8
}

/// Decodes the DATA_T/DATA_RH block the device echoes its compensation
/// inputs through.
pub fn decode_compensation(bytes: &[u8]) -> Result<CompensationInputs, DecodeError> {
    if bytes.len() != 4 {
        return Err(DecodeError::Length {
            expected: 4,
            got: bytes.len(),
        });
    }
    Ok(CompensationInputs {
        temperature_millicelsius: decode_temperature(take_u16_le(&bytes[0..2])?),
        relative_humidity_percent: decode_humidity(take_u16_le(&bytes[2..4])?),
    })
}
