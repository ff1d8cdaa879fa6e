// src/common/misr.rs

//! DATA_MISR readback checksum.
//!
//! The ENS160 maintains a rolling checksum over the bytes it has returned
//! for reads in the 0x00..=0x37 register window, readable at DATA_MISR
//! (0x38). It is not a bit-serial CRC: each data byte advances the state by
//! a single shift, so the recurrence is hand-rolled here rather than
//! expressed through a generic CRC implementation.
//!
//! To verify a read transaction, capture the MISR value before the read,
//! fold the returned bytes into it with [`update`], and compare against the
//! MISR value after. Reading DATA_MISR itself does not advance the state.

const POLY: u8 = 0x1D;

/// Folds `data` into a MISR state previously read from the device.
///
/// Per byte: shift the state left once, XOR the byte in, and XOR the
/// polynomial when the pre-shift state had its top bit set.
pub fn update(seed: u8, data: &[u8]) -> u8 {
    let mut misr = seed;
    for byte in data.iter().copied() {
        let shifted = (misr << 1) ^ byte;
        misr = if misr & 0x80 == 0 {
            shifted
        } else {
            shifted ^ POLY
        };
    }
    misr
}
