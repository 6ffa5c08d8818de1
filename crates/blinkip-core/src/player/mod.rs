//! Blink playback
//!
//! The [`BlinkPlayer`] drives a [`PulseDevice`] through a [`DigitString`]:
//!
//! ```text
//! off ──► 10 × [ pause 3.0s ──► per character ] ──► release
//!                                │
//!               digit:  one pulse per symbol, then pause 1.0s
//!               '.':    pause 1.0s
//! ```
//!
//! Each pulse is followed by the device's 0.2s settle gap.

use std::time::Duration;
use tracing::{debug, error, info};

use crate::device::{DeviceState, PulseDevice};
use crate::digits::{DigitString, SEPARATOR};
use crate::error::{Error, Result};
use crate::numeral::{encode_digit, symbol_duration};

/// Number of times the digits are played
pub const REPETITIONS: usize = 10;

/// Pause before each repetition, including the first
pub const REPETITION_GAP: Duration = Duration::from_secs(3);

/// Pause after the last symbol of each digit
pub const DIGIT_GAP: Duration = Duration::from_secs(1);

/// Pause standing in for a `.` separator
pub const SEPARATOR_GAP: Duration = Duration::from_secs(1);

/// One step of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// LED dark for the duration
    Pause(Duration),
    /// LED lit for the duration, then dark for the settle gap
    Pulse(Duration),
}

/// Steps making up one repetition of `digits`
///
/// Fails with [`Error::InvalidDigit`] if a character is neither a decimal
/// digit nor the separator.
pub fn repetition_steps(digits: &DigitString) -> Result<Vec<Step>> {
    let mut steps = vec![Step::Pause(REPETITION_GAP)];

    for c in digits.chars() {
        if c == SEPARATOR {
            steps.push(Step::Pause(SEPARATOR_GAP));
            continue;
        }

        let digit = c.to_digit(10).ok_or_else(|| Error::invalid_digit(c))?;
        let numeral = encode_digit(digit)?;
        steps.extend(numeral.symbols().map(|s| Step::Pulse(symbol_duration(s))));
        steps.push(Step::Pause(DIGIT_GAP));
    }

    Ok(steps)
}

/// Plays a digit string on a device and releases it afterwards
#[derive(Debug)]
pub struct BlinkPlayer {
    device: PulseDevice,
}

impl BlinkPlayer {
    /// Take ownership of `device` for the rest of the run
    pub fn new(device: PulseDevice) -> Self {
        Self { device }
    }

    /// Play `digits` [`REPETITIONS`] times, then release the device
    ///
    /// The device is released on every path. If playback fails, that error
    /// is returned and a release failure is only logged.
    pub async fn play(self, digits: &DigitString) -> Result<()> {
        let mut device = self.device;

        let played = Self::play_sequence(&mut device, digits).await;
        let released = device.release().await;

        match (played, released) {
            (Ok(()), Ok(())) => {
                info!("Finished blinking {}", digits);
                Ok(())
            }
            (Ok(()), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(release_err)) => {
                error!("Releasing LED after failed playback also failed: {}", release_err);
                Err(e)
            }
        }
    }

    async fn play_sequence(device: &mut PulseDevice, digits: &DigitString) -> Result<()> {
        let steps = repetition_steps(digits)?;

        device.set(DeviceState::Inactive).await?;

        for round in 1..=REPETITIONS {
            debug!("Repetition {}/{} of {}", round, REPETITIONS, digits);
            for step in &steps {
                match *step {
                    Step::Pause(duration) => tokio::time::sleep(duration).await,
                    Step::Pulse(duration) => device.pulse(duration).await?,
                }
            }
        }

        Ok(())
    }
}
