// src/common/error.rs

use super::types::OperatingMode;

/// Errors produced while translating register bytes to and from typed
/// values.
///
/// Width mismatches are always fatal to the call that produced them: the
/// codec never truncates or zero-pads a field to make it fit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// A register field had an unexpected byte width.
    #[error("unexpected field width: expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },

    /// The AQI field held an ordinal outside the defined 1..=5 range.
    #[error("air quality index out of range: {0}")]
    InvalidAqi(u8),

    /// The OPMODE register held a byte that is not a defined operating mode.
    #[error("unrecognized operating mode byte: {0:#04x}")]
    InvalidMode(u8),
}

/// All failure kinds surfaced by this crate.
///
/// Generic over the bus implementation's error type `E`, so transport
/// failures carry the underlying HAL error through unchanged. Recovery is
/// the caller's decision: the driver never retries a bus operation
/// internally, and every failure kind here is distinguishable so a host
/// application can decide to retry, reset, or alarm.
#[derive(Debug, thiserror::Error)]
pub enum Ens160Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying bus error (NACK, arbitration loss, timeout) from the HAL
    /// implementation. Surfaced immediately, never retried here.
    #[error("bus transport error: {0:?}")]
    Transport(E),

    /// A register field could not be decoded.
    #[error("decode error: {0}")]
    Decode(DecodeError),

    /// The operation requires a different operating mode; the caller must
    /// transition first. No bus traffic has happened.
    #[error("operation requires {required:?} mode, device is in {actual:?}")]
    WrongMode {
        required: OperatingMode,
        actual: OperatingMode,
    },

    /// The requested mode transition is not allowed by the device.
    #[error("invalid mode transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: OperatingMode,
        to: OperatingMode,
    },

    /// A bounded poll-wait exhausted its budget before data became ready.
    #[error("timed out waiting for measurement data")]
    Timeout,

    /// The readback checksum did not match the data returned by the device.
    #[error("readback checksum mismatch: calculated {calculated:#04x}, reported {reported:#04x}")]
    ChecksumMismatch { calculated: u8, reported: u8 },

    /// The part id register did not identify an ENS160.
    #[error("unexpected part id: {found:#06x}")]
    UnknownDevice { found: u16 },

    /// A caller-supplied value was outside the range the device accepts.
    #[error("input value out of range")]
    InvalidInput,
}

// Allow mapping from the underlying HAL error via `?`.
impl<E: core::fmt::Debug> From<E> for Ens160Error<E> {
    fn from(e: E) -> Self {
        Ens160Error::Transport(e)
    }
}

impl<E: core::fmt::Debug> Ens160Error<E> {
    /// True for the failure kinds a caller may meaningfully retry
    /// (transient conditions rather than call-sequence or hardware faults).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Ens160Error::Timeout)
    }
}
