// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Largest write payload the driver hands to a bus implementation (the
/// general-purpose write block). Implementations may size fixed buffers to
/// this.
pub const MAX_WRITE_PAYLOAD: usize = 8;

/// Abstraction for a register-addressed read/write transport (I2C-like).
///
/// One call is one atomic bus transaction against the 7-bit device
/// `address`. No retries belong at this layer; retrying is a policy
/// decision for the caller, and errors surface unchanged through
/// [`crate::common::error::Ens160Error::Transport`].
pub trait Ens160Bus {
    /// Associated error type for bus failures (NACK, timeout, arbitration).
    type Error: Debug;

    /// Reads `buf.len()` bytes starting at `register`, auto-incrementing
    /// on the device side, in a single transaction.
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Writes `bytes` (at most [`MAX_WRITE_PAYLOAD`]) starting at
    /// `register` in a single transaction.
    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}

/// A monotonic point in time produced by an [`Ens160Timer`].
///
/// Blanket-implemented for any copyable type with `Add<Duration>`,
/// instant-difference and ordering, which is all the bounded poll-wait
/// needs.
pub trait Ens160Instant:
    Copy + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> Ens160Instant for T where
    T: Copy + PartialOrd + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the delays and deadline arithmetic the driver needs.
///
/// The only suspension points in this crate are the mode-entry settling
/// delays and the bounded data-ready poll; both go through this trait, so
/// the host environment stays in control of how waiting happens.
pub trait Ens160Timer {
    /// Monotonic instant type used for poll deadlines.
    type Instant: Ens160Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// The current instant.
    fn now(&self) -> Self::Instant;
}
