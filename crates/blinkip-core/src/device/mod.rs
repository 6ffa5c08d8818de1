//! Polarity-aware LED control
//!
//! [`PulseDevice`] turns logical [`DeviceState`]s into physical
//! [`SignalLevel`]s for an [`OutputSink`] and implements timed pulses.
//!
//! ## Polarity
//!
//! On boards with a second LED (`led1`) the activity LED is lit by `"1"`.
//! Without it (Pi Zero) the single LED doubles as the power indicator and
//! is lit by `"0"`. The polarity is detected once, at construction.

pub mod sysfs;

pub use sysfs::SysfsLed;

use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::LedConfig;
use crate::error::Result;
use crate::traits::{OutputSink, SignalLevel};

/// Pause after every pulse so consecutive pulses stay distinguishable
pub const SETTLE_GAP: Duration = Duration::from_millis(200);

/// Logical LED state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// LED lit
    Active,
    /// LED dark
    Inactive,
}

/// Mapping from logical state to physical value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// `"1"` lights the LED
    Normal,
    /// `"0"` lights the LED
    Inverted,
}

impl Polarity {
    /// Detect the polarity from the presence of a sibling LED
    pub fn detect(sibling: &Path) -> Self {
        if sibling.exists() {
            Polarity::Normal
        } else {
            Polarity::Inverted
        }
    }

    /// Physical level for `state`
    pub fn level(self, state: DeviceState) -> SignalLevel {
        match (self, state) {
            (Polarity::Normal, DeviceState::Active) => SignalLevel::High,
            (Polarity::Normal, DeviceState::Inactive) => SignalLevel::Low,
            (Polarity::Inverted, DeviceState::Active) => SignalLevel::Low,
            (Polarity::Inverted, DeviceState::Inactive) => SignalLevel::High,
        }
    }
}

/// The LED for one run
///
/// ## Lifecycle
///
/// 1. Create with [`PulseDevice::open()`] (or [`PulseDevice::new()`] over any sink)
/// 2. Drive it with [`set()`](PulseDevice::set) and [`pulse()`](PulseDevice::pulse)
/// 3. Finish with [`release()`](PulseDevice::release), which consumes the device
///
/// Because `release` takes `self`, the trigger handoff can happen at most
/// once per device.
pub struct PulseDevice {
    sink: Box<dyn OutputSink>,
    polarity: Polarity,
    trigger_mode: String,
    state: DeviceState,
}

impl PulseDevice {
    /// Wrap an already opened sink
    ///
    /// The device starts out assumed inactive; nothing is written until the
    /// first [`set()`](Self::set).
    pub fn new(
        sink: Box<dyn OutputSink>,
        polarity: Polarity,
        trigger_mode: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            polarity,
            trigger_mode: trigger_mode.into(),
            state: DeviceState::Inactive,
        }
    }

    /// Open the sysfs LED described by `config` and detect its polarity
    ///
    /// # Errors
    ///
    /// [`Error::DeviceUnavailable`](crate::Error::DeviceUnavailable) when the
    /// brightness attribute cannot be opened.
    pub async fn open(config: &LedConfig) -> Result<Self> {
        let sink = SysfsLed::open(&config.brightness_path, &config.trigger_path).await?;
        let polarity = Polarity::detect(&config.sibling_path);
        if polarity == Polarity::Inverted {
            info!(
                "No LED at {}, assuming shared power/activity LED (inverted polarity)",
                config.sibling_path.display()
            );
        }

        Ok(Self::new(Box::new(sink), polarity, config.trigger_mode.clone()))
    }

    /// Polarity detected at construction
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Last state written
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Write the polarity-correct value for `state` and flush it
    pub async fn set(&mut self, state: DeviceState) -> Result<()> {
        let level = self.polarity.level(state);
        debug!("Setting LED {:?} ({})", state, level);
        self.sink.write_level(level).await?;
        self.state = state;
        Ok(())
    }

    /// Light the LED for `duration`, then keep it dark for [`SETTLE_GAP`]
    pub async fn pulse(&mut self, duration: Duration) -> Result<()> {
        debug!("Pulsing LED for {:.1}s", duration.as_secs_f64());
        self.set(DeviceState::Active).await?;
        tokio::time::sleep(duration).await;
        self.set(DeviceState::Inactive).await?;
        tokio::time::sleep(SETTLE_GAP).await;
        Ok(())
    }

    /// Turn the LED off and restore its automatic trigger
    ///
    /// The handoff is attempted even if turning the LED off fails; the first
    /// error is returned.
    pub async fn release(mut self) -> Result<()> {
        let off = self.set(DeviceState::Inactive).await;
        debug!("Restoring LED trigger {}", self.trigger_mode);
        let handoff = self.sink.hand_off_trigger(&self.trigger_mode).await;
        off.and(handoff)
    }
}

impl std::fmt::Debug for PulseDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseDevice")
            .field("polarity", &self.polarity)
            .field("trigger_mode", &self.trigger_mode)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn led_dir(with_sibling: bool) -> (tempfile::TempDir, LedConfig) {
        let dir = tempfile::tempdir().unwrap();
        let led0 = dir.path().join("led0");
        std::fs::create_dir(&led0).unwrap();
        std::fs::write(led0.join("brightness"), "").unwrap();
        std::fs::write(led0.join("trigger"), "none").unwrap();
        if with_sibling {
            std::fs::create_dir(dir.path().join("led1")).unwrap();
        }

        let config = LedConfig {
            brightness_path: led0.join("brightness"),
            sibling_path: dir.path().join("led1"),
            trigger_path: led0.join("trigger"),
            trigger_mode: "mmc0".to_string(),
        };
        (dir, config)
    }

    #[test]
    fn test_polarity_levels() {
        assert_eq!(Polarity::Normal.level(DeviceState::Active), SignalLevel::High);
        assert_eq!(Polarity::Normal.level(DeviceState::Inactive), SignalLevel::Low);
        assert_eq!(Polarity::Inverted.level(DeviceState::Active), SignalLevel::Low);
        assert_eq!(Polarity::Inverted.level(DeviceState::Inactive), SignalLevel::High);
    }

    #[tokio::test]
    async fn test_sibling_present_active_writes_one() {
        let (_dir, config) = led_dir(true);
        let mut device = PulseDevice::open(&config).await.unwrap();
        assert_eq!(device.polarity(), Polarity::Normal);

        device.set(DeviceState::Active).await.unwrap();
        assert_eq!(std::fs::read_to_string(&config.brightness_path).unwrap(), "1");
    }

    #[tokio::test]
    async fn test_sibling_absent_active_writes_zero() {
        let (_dir, config) = led_dir(false);
        let mut device = PulseDevice::open(&config).await.unwrap();
        assert_eq!(device.polarity(), Polarity::Inverted);

        device.set(DeviceState::Active).await.unwrap();
        assert_eq!(std::fs::read_to_string(&config.brightness_path).unwrap(), "0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pulse_then_release() {
        let (_dir, config) = led_dir(true);
        let mut device = PulseDevice::open(&config).await.unwrap();

        let start = tokio::time::Instant::now();
        device.pulse(Duration::from_millis(400)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(600));
        assert_eq!(device.state(), DeviceState::Inactive);

        device.release().await.unwrap();
        assert_eq!(std::fs::read_to_string(&config.brightness_path).unwrap(), "100");
        assert_eq!(std::fs::read_to_string(&config.trigger_path).unwrap(), "mmc0");
    }
}
