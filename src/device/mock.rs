// src/device/mock.rs

//! Register-file mock of an ENS160 behind the crate's bus and timer
//! traits, shared by the device and measurement tests.

use crate::common::hal_traits::{Ens160Bus, Ens160Timer};
use crate::common::misr;
use crate::common::registers::{Register, MISR_WINDOW_END};
use core::ops::{Add, Sub};
use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockBusError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

#[derive(Debug)]
pub struct MockInterface {
    /// Full register file; writes land here, reads serve from here.
    pub regs: [u8; 256],
    /// Every write transaction as (register, payload).
    pub write_log: Vec<(u8, Vec<u8>)>,
    /// Successive DEVICE_STATUS values; each status read consumes one
    /// before serving, falling back to the register file when empty.
    pub status_script: VecDeque<u8>,
    pub read_count: u32,
    pub nack_reads: bool,
    pub nack_writes: bool,
    /// Makes the device-side MISR diverge from the data it returned.
    pub corrupt_misr: bool,
    pub current_time_us: u64,
}

impl MockInterface {
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        // PART_ID little-endian 0x0160.
        regs[0x00] = 0x60;
        regs[0x01] = 0x01;
        MockInterface {
            regs,
            write_log: Vec::new(),
            status_script: VecDeque::new(),
            read_count: 0,
            nack_reads: false,
            nack_writes: false,
            corrupt_misr: false,
            current_time_us: 0,
        }
    }

    /// Stages the data registers with a result set.
    pub fn stage_measurement(&mut self, status: u8, aqi: u8, tvoc: u16, eco2: u16) {
        self.regs[0x20] = status;
        self.regs[0x21] = aqi;
        self.regs[0x22..0x24].copy_from_slice(&tvoc.to_le_bytes());
        self.regs[0x24..0x26].copy_from_slice(&eco2.to_le_bytes());
    }

    /// Stages the general-purpose read block with raw resistance words.
    pub fn stage_raw_resistance(&mut self, words: [u16; 4]) {
        for (i, word) in words.iter().enumerate() {
            let at = 0x48 + 2 * i;
            self.regs[at..at + 2].copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Time spent in delays so far.
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.current_time_us)
    }
}

impl Ens160Bus for MockInterface {
    type Error = MockBusError;

    fn read_register(
        &mut self,
        _address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.read_count += 1;
        if self.nack_reads {
            return Err(MockBusError);
        }
        if register == Register::DeviceStatus.address() {
            if let Some(scripted) = self.status_script.pop_front() {
                self.regs[0x20] = scripted;
            }
        }
        let start = register as usize;
        buf.copy_from_slice(&self.regs[start..start + buf.len()]);
        // The device folds bytes served from the checksummed window into
        // its MISR; reading DATA_MISR itself leaves it alone.
        if register < MISR_WINDOW_END {
            let mut updated = misr::update(self.regs[MISR_WINDOW_END as usize], buf);
            if self.corrupt_misr {
                updated ^= 0x5A;
            }
            self.regs[MISR_WINDOW_END as usize] = updated;
        }
        Ok(())
    }

    fn write_register(
        &mut self,
        _address: u8,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        if self.nack_writes {
            return Err(MockBusError);
        }
        self.write_log.push((register, bytes.to_vec()));
        let start = register as usize;
        self.regs[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Ens160Timer for MockInterface {
    type Instant = MockInstant;

    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.current_time_us = self.current_time_us.saturating_add(ms as u64 * 1000);
    }

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}
