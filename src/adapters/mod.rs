// src/adapters/mod.rs

//! `embedded-hal` 1.0 integration (requires the `impl-ehal` feature).
//!
//! [`EhalInterface`] bundles an `I2c` bus and a `DelayNs` provider into one
//! value implementing the crate's [`Ens160Bus`] and [`Ens160Timer`] traits,
//! ready to hand to [`crate::Ens160::new`].

use crate::common::hal_traits::{Ens160Bus, Ens160Timer, MAX_WRITE_PAYLOAD};
use core::ops::{Add, Sub};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Adapter from `embedded-hal` I2C + delay to the ENS160 driver traits.
pub struct EhalInterface<I2C, D> {
    i2c: I2C,
    delay: D,
    elapsed_us: u64,
}

impl<I2C, D> EhalInterface<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        EhalInterface {
            i2c,
            delay,
            elapsed_us: 0,
        }
    }

    /// Frees the wrapped peripherals.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Ens160Bus for EhalInterface<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buf)
    }

    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        // Register address plus payload must go out as one transaction;
        // the driver never writes more than MAX_WRITE_PAYLOAD bytes.
        assert!(bytes.len() <= MAX_WRITE_PAYLOAD);
        let mut frame = [0u8; MAX_WRITE_PAYLOAD + 1];
        frame[0] = register;
        frame[1..1 + bytes.len()].copy_from_slice(bytes);
        self.i2c.write(address, &frame[..1 + bytes.len()])
    }
}

/// Instant type of [`EhalInterface`]: a counter of time spent inside this
/// interface's own delays.
///
/// `embedded-hal` offers no clock trait, so poll deadlines are measured
/// against accumulated delay time: a wait budget rather than wall time.
/// Bus transaction time is not counted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DelayInstant(u64);

impl Add<Duration> for DelayInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        DelayInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl Sub<DelayInstant> for DelayInstant {
    type Output = Duration;
    fn sub(self, rhs: DelayInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl<I2C, D> Ens160Timer for EhalInterface<I2C, D>
where
    D: DelayNs,
{
    type Instant = DelayInstant;

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
        self.elapsed_us = self.elapsed_us.saturating_add(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.elapsed_us = self.elapsed_us.saturating_add(ms as u64 * 1000);
    }

    fn now(&self) -> Self::Instant {
        DelayInstant(self.elapsed_us)
    }
}
