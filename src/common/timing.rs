// src/common/timing.rs

use super::types::OperatingMode;
use core::time::Duration;

// Settling minimums are datasheet facts, not tunables. The distinct Idle
// and Standard entry delays matter: the first register traffic after a mode
// write is only trustworthy once the corresponding delay has elapsed.

// === Reset / Mode Entry ===

/// Minimum wait after writing the RESET code to OPMODE before the device
/// responds to bus traffic again.
pub const RESET_DELAY: Duration = Duration::from_millis(10);
/// Minimum wait after commanding DeepSleep entry.
pub const DEEP_SLEEP_ENTRY_DELAY: Duration = Duration::from_millis(10);
/// Minimum wait after commanding Idle entry.
pub const IDLE_ENTRY_DELAY: Duration = Duration::from_millis(20);
/// Minimum wait after commanding Standard entry before the first status
/// poll is meaningful.
pub const STANDARD_ENTRY_DELAY: Duration = Duration::from_millis(50);

// === Measurement Cadence ===

/// Nominal time between result sets in Standard mode.
pub const CONVERSION_CYCLE_TIME: Duration = Duration::from_secs(1);
/// Interval between status polls inside the bounded blocking wait.
pub const DATA_READY_POLL_INTERVAL: Duration = Duration::from_millis(10);

// === Output Conditioning Windows (informational) ===

/// Window after entering Standard mode during which results are tagged
/// [`crate::common::types::Validity::WarmUp`].
pub const WARM_UP_PERIOD: Duration = Duration::from_secs(180);
/// Window after first-ever power-on during which results are tagged
/// [`crate::common::types::Validity::StartUp`].
pub const INITIAL_STARTUP_PERIOD: Duration = Duration::from_secs(3600);

/// Settling delay required after entering `mode`.
pub const fn mode_entry_delay(mode: OperatingMode) -> Duration {
    match mode {
        OperatingMode::DeepSleep => DEEP_SLEEP_ENTRY_DELAY,
        OperatingMode::Idle => IDLE_ENTRY_DELAY,
        OperatingMode::Standard => STANDARD_ENTRY_DELAY,
    }
}
