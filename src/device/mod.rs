// src/device/mod.rs

mod measure;

#[cfg(test)]
mod mock;

use crate::common::{
    codec,
    error::Ens160Error,
    hal_traits::{Ens160Bus, Ens160Timer},
    misr,
    registers::{self, CommandCode, Register},
    timing,
    types::{
        CompensationInputs, DeviceStatus, FirmwareVersion, InterruptConfig, OperatingMode,
    },
};
use core::time::Duration;

/// Ambient temperature range the device accepts for compensation, in
/// millidegrees Celsius (datasheet operating conditions).
const TEMP_IN_RANGE_MILLICELSIUS: core::ops::RangeInclusive<i32> = -40_000..=85_000;

/// Handle to one ENS160 on the bus.
///
/// Owns the interface (bus transport plus timer) and the last operating
/// mode that was successfully written to the device. The stored mode is
/// never updated speculatively, so after a failed transition it still
/// reflects what the device was last told.
///
/// A handle supports exactly one owner; if the host environment is
/// concurrent, serialize access externally (one owner task per sensor
/// instance). Bus transactions are atomic, but mode-then-read sequences
/// are not.
#[derive(Debug)]
pub struct Ens160<IF>
where
    IF: Ens160Bus + Ens160Timer,
{
    interface: IF,
    address: u8,
    mode: OperatingMode,
    verify_reads: bool,
}

impl<IF> Ens160<IF>
where
    IF: Ens160Bus + Ens160Timer,
{
    /// Creates a handle at the factory-default bus address.
    ///
    /// The stored mode starts at the power-on default (DeepSleep); call
    /// [`Ens160::init`] to bring the device to a known state.
    pub fn new(interface: IF) -> Self {
        Self::with_address(interface, registers::DEFAULT_I2C_ADDRESS)
    }

    /// Creates a handle at an explicit bus address (e.g.
    /// [`crate::common::registers::SECONDARY_I2C_ADDRESS`] when the ADDR
    /// pin is high).
    pub fn with_address(interface: IF, address: u8) -> Self {
        Ens160 {
            interface,
            address,
            mode: OperatingMode::DeepSleep,
            verify_reads: true,
        }
    }

    /// Enables or disables MISR verification of register reads.
    ///
    /// On by default. Verification brackets every read in the checksummed
    /// register window with two extra one-byte MISR reads.
    pub fn set_integrity_check(&mut self, enabled: bool) {
        self.verify_reads = enabled;
    }

    /// Releases the sensor, handing the interface back.
    pub fn release(self) -> IF {
        self.interface
    }

    /// The last operating mode successfully written to the device.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Resets the device, verifies its part id and leaves it in Idle mode
    /// with cleared general-purpose registers.
    pub fn init(&mut self) -> Result<(), Ens160Error<IF::Error>> {
        self.reset()?;
        let id = self.part_id()?;
        if id != registers::ENS160_PART_ID {
            return Err(Ens160Error::UnknownDevice { found: id });
        }
        self.set_mode(OperatingMode::Idle)?;
        self.clear_gpr()?;
        Ok(())
    }

    /// Software reset. After the settling delay the device is back at its
    /// power-on default mode (DeepSleep).
    pub fn reset(&mut self) -> Result<(), Ens160Error<IF::Error>> {
        self.write_register(Register::OpMode, &[registers::OPMODE_RESET])?;
        self.block_for(timing::RESET_DELAY);
        self.mode = OperatingMode::DeepSleep;
        Ok(())
    }

    /// Transitions the device to `target` and blocks for the settling
    /// delay of that entry.
    ///
    /// The stored mode is updated only once the register write has
    /// succeeded; a bus error leaves it untouched. A DeepSleep -> Standard
    /// request is rejected before any bus traffic; step through Idle.
    pub fn set_mode(&mut self, target: OperatingMode) -> Result<(), Ens160Error<IF::Error>> {
        if target == self.mode {
            return Ok(());
        }
        if self.mode == OperatingMode::DeepSleep && target == OperatingMode::Standard {
            return Err(Ens160Error::InvalidTransition {
                from: self.mode,
                to: target,
            });
        }
        self.write_register(Register::OpMode, &[codec::encode_mode(target)])?;
        self.block_for(timing::mode_entry_delay(target));
        self.mode = target;
        Ok(())
    }

    /// Reads the operating mode back from the device.
    ///
    /// A pure query: the stored mode field keeps tracking what was last
    /// written, not what this returns.
    pub fn read_mode(&mut self) -> Result<OperatingMode, Ens160Error<IF::Error>> {
        let buf: [u8; 1] = self.read_registers(Register::OpMode)?;
        codec::decode_mode(buf[0]).map_err(Ens160Error::Decode)
    }

    /// Reads the PART_ID register (0x0160 for an ENS160).
    pub fn part_id(&mut self) -> Result<u16, Ens160Error<IF::Error>> {
        let buf: [u8; 2] = self.read_registers(Register::PartId)?;
        codec::decode_part_id(&buf).map_err(Ens160Error::Decode)
    }

    /// Reads and unpacks the DEVICE_STATUS register.
    pub fn status(&mut self) -> Result<DeviceStatus, Ens160Error<IF::Error>> {
        let buf: [u8; 1] = self.read_registers(Register::DeviceStatus)?;
        Ok(codec::decode_status(buf[0]))
    }

    /// Reads the interrupt pin configuration.
    pub fn interrupt_config(&mut self) -> Result<InterruptConfig, Ens160Error<IF::Error>> {
        let buf: [u8; 1] = self.read_registers(Register::Config)?;
        Ok(codec::decode_config(buf[0]))
    }

    /// Writes the interrupt pin configuration.
    pub fn set_interrupt_config(
        &mut self,
        config: InterruptConfig,
    ) -> Result<(), Ens160Error<IF::Error>> {
        self.write_register(Register::Config, &[codec::encode_config(config)])
    }

    /// Writes the ambient temperature the device should compensate with,
    /// in millidegrees Celsius. The value must come from a real
    /// temperature sensor and lie within the device's operating range.
    pub fn set_ambient_temperature(
        &mut self,
        millicelsius: i32,
    ) -> Result<(), Ens160Error<IF::Error>> {
        if !TEMP_IN_RANGE_MILLICELSIUS.contains(&millicelsius) {
            return Err(Ens160Error::InvalidInput);
        }
        let raw = codec::encode_temperature(millicelsius);
        self.write_register(Register::TempIn, &raw.to_le_bytes())
    }

    /// Writes the relative humidity the device should compensate with, in
    /// whole percent (0..=100).
    pub fn set_relative_humidity(&mut self, percent: u8) -> Result<(), Ens160Error<IF::Error>> {
        if percent > 100 {
            return Err(Ens160Error::InvalidInput);
        }
        let raw = codec::encode_humidity(percent);
        self.write_register(Register::RhIn, &raw.to_le_bytes())
    }

    /// Reads back the compensation inputs the device is currently using.
    pub fn compensation_inputs(
        &mut self,
    ) -> Result<CompensationInputs, Ens160Error<IF::Error>> {
        let buf: [u8; 4] = self.read_registers(Register::DataT)?;
        codec::decode_compensation(&buf).map_err(Ens160Error::Decode)
    }

    /// Queries the firmware application version. The COMMAND register only
    /// executes in Idle mode; anywhere else this fails with `WrongMode`
    /// before touching the bus.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, Ens160Error<IF::Error>> {
        self.command(CommandCode::GetAppVersion)?;
        let gpr: [u8; registers::GPR_BLOCK_LEN] = self.read_registers(Register::GprRead0)?;
        codec::decode_firmware_version(&gpr).map_err(Ens160Error::Decode)
    }

    /// Clears the general-purpose read registers. Idle mode only.
    pub fn clear_gpr(&mut self) -> Result<(), Ens160Error<IF::Error>> {
        self.command(CommandCode::ClearGpr)
    }

    fn command(&mut self, code: CommandCode) -> Result<(), Ens160Error<IF::Error>> {
        self.require_mode(OperatingMode::Idle)?;
        self.write_register(Register::Command, &[code as u8])
    }

    pub(crate) fn require_mode(
        &self,
        required: OperatingMode,
    ) -> Result<(), Ens160Error<IF::Error>> {
        if self.mode == required {
            Ok(())
        } else {
            Err(Ens160Error::WrongMode {
                required,
                actual: self.mode,
            })
        }
    }

    /// Reads `N` bytes starting at `register` in one bus transaction.
    ///
    /// When the integrity check is enabled and the whole read falls inside
    /// the MISR window, the transaction is bracketed by checksum reads and
    /// verified; a mismatch fails with `ChecksumMismatch` (the data is not
    /// returned).
    pub(crate) fn read_registers<const N: usize>(
        &mut self,
        register: Register,
    ) -> Result<[u8; N], Ens160Error<IF::Error>> {
        let mut buf = [0u8; N];
        let start = register.address();
        let covered = self.verify_reads && (start as usize + N) <= registers::MISR_WINDOW_END as usize;
        if covered {
            let seed = self.read_misr()?;
            self.interface
                .read_register(self.address, start, &mut buf)?;
            let calculated = misr::update(seed, &buf);
            let reported = self.read_misr()?;
            if calculated != reported {
                return Err(Ens160Error::ChecksumMismatch {
                    calculated,
                    reported,
                });
            }
        } else {
            self.interface
                .read_register(self.address, start, &mut buf)?;
        }
        Ok(buf)
    }

    fn read_misr(&mut self) -> Result<u8, Ens160Error<IF::Error>> {
        let mut buf = [0u8; 1];
        self.interface
            .read_register(self.address, Register::DataMisr.address(), &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(
        &mut self,
        register: Register,
        bytes: &[u8],
    ) -> Result<(), Ens160Error<IF::Error>> {
        self.interface
            .write_register(self.address, register.address(), bytes)?;
        Ok(())
    }

    pub(crate) fn block_for(&mut self, duration: Duration) {
        self.interface.delay_ms(duration.as_millis() as u32);
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::mock::{MockBusError, MockInterface};
    use super::*;
    use crate::common::types::{PinDrive, PinPolarity};
    use std::vec;

    fn device() -> Ens160<MockInterface> {
        Ens160::new(MockInterface::new())
    }

    #[test]
    fn handle_starts_at_power_on_defaults() {
        let dev = device();
        assert_eq!(dev.mode(), OperatingMode::DeepSleep);
        assert_eq!(dev.address, registers::DEFAULT_I2C_ADDRESS);
        assert!(dev.verify_reads);
    }

    #[test]
    fn set_mode_writes_opmode_then_stores() {
        let mut dev = device();
        dev.set_mode(OperatingMode::Idle).unwrap();
        assert_eq!(dev.mode(), OperatingMode::Idle);
        assert_eq!(dev.interface.write_log, vec![(0x10, vec![0x01])]);
        // The settling delay ran after the write.
        assert!(dev.interface.elapsed() >= timing::IDLE_ENTRY_DELAY);
    }

    #[test]
    fn set_mode_on_bus_error_leaves_stored_mode_unchanged() {
        let mut dev = device();
        dev.interface.nack_writes = true;
        let result = dev.set_mode(OperatingMode::Idle);
        assert!(matches!(result, Err(Ens160Error::Transport(MockBusError))));
        assert_eq!(dev.mode(), OperatingMode::DeepSleep);
    }

    #[test]
    fn deep_sleep_to_standard_is_rejected_without_bus_traffic() {
        let mut dev = device();
        let result = dev.set_mode(OperatingMode::Standard);
        assert!(matches!(
            result,
            Err(Ens160Error::InvalidTransition {
                from: OperatingMode::DeepSleep,
                to: OperatingMode::Standard,
            })
        ));
        assert!(dev.interface.write_log.is_empty());
        assert_eq!(dev.interface.read_count, 0);
    }

    #[test]
    fn set_mode_to_current_mode_is_a_no_op() {
        let mut dev = device();
        dev.set_mode(OperatingMode::DeepSleep).unwrap();
        assert!(dev.interface.write_log.is_empty());
    }

    #[test]
    fn standard_entry_goes_through_idle() {
        let mut dev = device();
        dev.set_mode(OperatingMode::Idle).unwrap();
        dev.set_mode(OperatingMode::Standard).unwrap();
        assert_eq!(dev.mode(), OperatingMode::Standard);
        assert_eq!(
            dev.interface.write_log,
            vec![(0x10, vec![0x01]), (0x10, vec![0x02])]
        );
    }

    #[test]
    fn reset_writes_the_reset_code_and_reverts_to_deep_sleep() {
        let mut dev = device();
        dev.set_mode(OperatingMode::Idle).unwrap();
        dev.reset().unwrap();
        assert_eq!(dev.mode(), OperatingMode::DeepSleep);
        assert_eq!(dev.interface.write_log.last(), Some(&(0x10, vec![0xF0])));
    }

    #[test]
    fn init_brings_the_device_to_idle_and_clears_gpr() {
        let mut dev = device();
        dev.init().unwrap();
        assert_eq!(dev.mode(), OperatingMode::Idle);
        assert_eq!(
            dev.interface.write_log,
            vec![
                (0x10, vec![0xF0]), // reset
                (0x10, vec![0x01]), // idle
                (0x12, vec![0xCC]), // clear gpr
            ]
        );
    }

    #[test]
    fn init_rejects_a_foreign_part_id() {
        let mut dev = device();
        dev.interface.regs[0x00] = 0x55;
        dev.interface.regs[0x01] = 0x01;
        let result = dev.init();
        assert!(matches!(
            result,
            Err(Ens160Error::UnknownDevice { found: 0x0155 })
        ));
        // Init stopped before any mode change away from the reset default.
        assert_eq!(dev.mode(), OperatingMode::DeepSleep);
    }

    #[test]
    fn part_id_read_is_misr_verified() {
        let mut dev = device();
        assert_eq!(dev.part_id().unwrap(), registers::ENS160_PART_ID);
        // Bracketing MISR reads: seed, data, check.
        assert_eq!(dev.interface.read_count, 3);
    }

    #[test]
    fn corrupted_readback_fails_the_integrity_check() {
        let mut dev = device();
        dev.interface.corrupt_misr = true;
        let result = dev.part_id();
        assert!(matches!(
            result,
            Err(Ens160Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn integrity_check_can_be_disabled() {
        let mut dev = device();
        dev.set_integrity_check(false);
        dev.interface.corrupt_misr = true;
        assert_eq!(dev.part_id().unwrap(), registers::ENS160_PART_ID);
        assert_eq!(dev.interface.read_count, 1);
    }

    #[test]
    fn read_mode_queries_without_touching_the_cache() {
        let mut dev = device();
        dev.interface.regs[0x10] = 0x02;
        assert_eq!(dev.read_mode().unwrap(), OperatingMode::Standard);
        assert_eq!(dev.mode(), OperatingMode::DeepSleep);
    }

    #[test]
    fn status_decodes_the_device_status_register() {
        let mut dev = device();
        dev.interface.regs[0x20] = 0x82;
        let status = dev.status().unwrap();
        assert!(status.running);
        assert!(status.new_data);
    }

    #[test]
    fn interrupt_config_round_trips_through_the_device() {
        let mut dev = device();
        let config = InterruptConfig {
            enabled: true,
            on_new_data: true,
            on_new_gpr: false,
            drive: PinDrive::PushPull,
            polarity: PinPolarity::ActiveHigh,
        };
        dev.set_interrupt_config(config).unwrap();
        assert_eq!(dev.interface.write_log, vec![(0x11, vec![0x63])]);
        assert_eq!(dev.interrupt_config().unwrap(), config);
    }

    #[test]
    fn compensation_writes_use_the_documented_scaling() {
        let mut dev = device();
        dev.set_ambient_temperature(25_000).unwrap();
        dev.set_relative_humidity(50).unwrap();
        assert_eq!(
            dev.interface.write_log,
            vec![
                (0x13, vec![0x89, 0x4A]), // 298.15 K * 64 = 19081
                (0x15, vec![0x00, 0x64]), // 50 % << 9 = 0x6400
            ]
        );
    }

    #[test]
    fn compensation_inputs_reads_back_what_was_written() {
        let mut dev = device();
        dev.set_ambient_temperature(25_000).unwrap();
        dev.set_relative_humidity(50).unwrap();
        // The device echoes TEMP_IN/RH_IN through DATA_T/DATA_RH.
        let (t, rh) = (dev.interface.regs[0x13], dev.interface.regs[0x14]);
        dev.interface.regs[0x30] = t;
        dev.interface.regs[0x31] = rh;
        let (h_lo, h_hi) = (dev.interface.regs[0x15], dev.interface.regs[0x16]);
        dev.interface.regs[0x32] = h_lo;
        dev.interface.regs[0x33] = h_hi;
        let inputs = dev.compensation_inputs().unwrap();
        assert_eq!(inputs.relative_humidity_percent, 50);
        assert!((inputs.temperature_millicelsius - 25_000).abs() < 16);
    }

    #[test]
    fn out_of_range_compensation_values_are_rejected() {
        let mut dev = device();
        assert!(matches!(
            dev.set_relative_humidity(101),
            Err(Ens160Error::InvalidInput)
        ));
        assert!(matches!(
            dev.set_ambient_temperature(90_000),
            Err(Ens160Error::InvalidInput)
        ));
        assert!(dev.interface.write_log.is_empty());
    }

    #[test]
    fn firmware_version_requires_idle_mode() {
        let mut dev = device();
        let result = dev.firmware_version();
        assert!(matches!(
            result,
            Err(Ens160Error::WrongMode {
                required: OperatingMode::Idle,
                actual: OperatingMode::DeepSleep,
            })
        ));
        assert!(dev.interface.write_log.is_empty());
    }

    #[test]
    fn firmware_version_issues_the_command_and_reads_gpr() {
        let mut dev = device();
        dev.set_mode(OperatingMode::Idle).unwrap();
        dev.interface.regs[0x4C] = 7;
        dev.interface.regs[0x4D] = 2;
        dev.interface.regs[0x4E] = 1;
        let version = dev.firmware_version().unwrap();
        assert_eq!(
            version,
            FirmwareVersion {
                major: 7,
                minor: 2,
                release: 1
            }
        );
        assert!(dev.interface.write_log.contains(&(0x12, vec![0x0E])));
    }
}
