// # Output Sink Trait
//
// The raw binary output behind the LED. A sink knows nothing about
// polarity: it writes the physical value it is given.
//
// The production implementation is [`SysfsLed`](crate::device::SysfsLed),
// which writes to `/sys/class/leds/<name>/brightness` and `.../trigger`.

use async_trait::async_trait;
use std::fmt;

/// Physical value written to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalLevel {
    /// ASCII `"0"`
    Low,
    /// ASCII `"1"`
    High,
}

impl SignalLevel {
    /// The ASCII value written to the sink
    pub fn as_str(self) -> &'static str {
        match self {
            SignalLevel::Low => "0",
            SignalLevel::High => "1",
        }
    }
}

impl fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for binary output implementations
///
/// The sink is exclusively owned by one [`PulseDevice`](crate::device::PulseDevice)
/// for the whole run.
#[async_trait]
pub trait OutputSink: Send {
    /// Write `level` and force it to take effect immediately
    async fn write_level(&mut self, level: SignalLevel) -> Result<(), crate::Error>;

    /// Return the output to its automatic trigger mode (e.g. `"mmc0"`)
    async fn hand_off_trigger(&mut self, mode: &str) -> Result<(), crate::Error>;
}
