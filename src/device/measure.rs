// src/device/measure.rs

//! Measurement acquisition: a non-blocking poll and a bounded blocking
//! wait on top of it.

use super::Ens160;
use crate::common::{
    codec,
    error::Ens160Error,
    hal_traits::{Ens160Bus, Ens160Timer},
    registers::{self, Register},
    timing,
    types::{OperatingMode, Reading},
};
use core::time::Duration;

impl<IF> Ens160<IF>
where
    IF: Ens160Bus + Ens160Timer,
{
    /// Non-blocking measurement poll.
    ///
    /// Requires the device to be in Standard mode; the driver never
    /// auto-transitions, so a `WrongMode` failure here happens before any
    /// bus traffic and means the caller must fix the call sequence.
    ///
    /// Returns `nb::Error::WouldBlock` while no fresh result set is
    /// available; that is the retryable not-ready signal, and callers
    /// compose it with their own scheduling. On fresh data the status and
    /// data registers are read as one block in a single bus transaction,
    /// so the validity tag belongs to the exact snapshot the numbers came
    /// from. A structurally valid result that the device flags as warm-up,
    /// start-up or invalid is returned as-is, never retried; discarding
    /// such readings is the consumer's decision.
    pub fn poll_measurement(&mut self) -> nb::Result<Reading, Ens160Error<IF::Error>> {
        self.require_mode(OperatingMode::Standard)
            .map_err(nb::Error::Other)?;

        let block: [u8; registers::DATA_BLOCK_LEN] = self
            .read_registers(Register::DeviceStatus)
            .map_err(nb::Error::Other)?;
        let status = codec::decode_status(block[0]);
        if !status.new_data {
            return Err(nb::Error::WouldBlock);
        }

        // Raw resistances live outside the checksummed window and are not
        // part of the atomic block; they change per conversion cycle, which
        // we are inside of while NEWDAT is set.
        let gpr: [u8; registers::GPR_BLOCK_LEN] = self
            .read_registers(Register::GprRead0)
            .map_err(nb::Error::Other)?;

        codec::decode_reading(&block, &gpr)
            .map_err(|e| nb::Error::Other(Ens160Error::Decode(e)))
    }

    /// Blocking measurement read with a caller-supplied budget.
    ///
    /// Polls the status register at a fixed interval until a result set is
    /// ready, the budget is exhausted (`Timeout`, which
    /// [`Ens160Error::is_retryable`] reports as retryable), or a
    /// non-transient error surfaces. A zero budget performs exactly one
    /// poll. Never hangs: the deadline is checked against the interface's
    /// clock on every miss.
    pub fn read_measurement(
        &mut self,
        timeout: Duration,
    ) -> Result<Reading, Ens160Error<IF::Error>> {
        self.require_mode(OperatingMode::Standard)?;
        let deadline = self.interface.now() + timeout;
        loop {
            match self.poll_measurement() {
                Ok(reading) => return Ok(reading),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Ens160Error::Timeout);
                    }
                    self.block_for(timing::DATA_READY_POLL_INTERVAL);
                }
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }
}
