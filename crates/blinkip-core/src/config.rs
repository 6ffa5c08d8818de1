//! Configuration types for blinkip
//!
//! Every field has a default matching a Raspberry Pi activity LED, so an
//! empty configuration document is valid.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

/// Main blinkip configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// LED paths and trigger handoff
    #[serde(default)]
    pub led: LedConfig,

    /// Address resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl BlinkConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.led.validate()?;
        self.resolver.validate()?;
        Ok(())
    }
}

/// LED configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedConfig {
    /// Brightness attribute written with `"0"`/`"1"`
    #[serde(default = "default_brightness_path")]
    pub brightness_path: PathBuf,

    /// Second LED whose presence means normal polarity
    ///
    /// Boards without it (Pi Zero) share the LED with the power indicator,
    /// which inverts it.
    #[serde(default = "default_sibling_path")]
    pub sibling_path: PathBuf,

    /// Trigger attribute written once at the end of the run
    #[serde(default = "default_trigger_path")]
    pub trigger_path: PathBuf,

    /// Trigger restored at the end of the run
    #[serde(default = "default_trigger_mode")]
    pub trigger_mode: String,
}

impl LedConfig {
    /// Validate the LED configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.brightness_path.as_os_str().is_empty() {
            return Err(crate::Error::config("LED brightness path cannot be empty"));
        }
        if self.trigger_path.as_os_str().is_empty() {
            return Err(crate::Error::config("LED trigger path cannot be empty"));
        }
        let mode = self.trigger_mode.trim();
        if mode.is_empty() {
            return Err(crate::Error::config("LED trigger mode cannot be empty"));
        }
        if mode.chars().any(char::is_whitespace) {
            return Err(crate::Error::config(format!(
                "LED trigger mode must be a single identifier, got {:?}",
                self.trigger_mode
            )));
        }
        Ok(())
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            brightness_path: default_brightness_path(),
            sibling_path: default_sibling_path(),
            trigger_path: default_trigger_path(),
            trigger_mode: default_trigger_mode(),
        }
    }
}

/// Address resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Number of one-second samples before giving up
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,

    /// Remote endpoint used only to force route selection
    ///
    /// It does not need to be reachable; no packet is sent.
    #[serde(default = "default_probe_target")]
    pub probe_target: SocketAddr,
}

impl ResolverConfig {
    /// Validate the resolver configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(crate::Error::config(format!(
                "Resolver timeout must be between 1 and 3600 seconds, got {}",
                self.timeout_secs
            )));
        }

        match self.probe_target {
            SocketAddr::V4(target) => {
                let ip = target.ip();
                if ip.is_loopback() || ip.is_unspecified() {
                    return Err(crate::Error::config(format!(
                        "Probe target must be a routable IPv4 address, got {}",
                        target
                    )));
                }
            }
            SocketAddr::V6(target) => {
                return Err(crate::Error::config(format!(
                    "Probe target must be IPv4, got {}",
                    target
                )));
            }
        }

        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            probe_target: default_probe_target(),
        }
    }
}

fn default_brightness_path() -> PathBuf {
    PathBuf::from("/sys/class/leds/led0/brightness")
}

fn default_sibling_path() -> PathBuf {
    PathBuf::from("/sys/class/leds/led1")
}

fn default_trigger_path() -> PathBuf {
    PathBuf::from("/sys/class/leds/led0/trigger")
}

fn default_trigger_mode() -> String {
    "mmc0".to_string()
}

fn default_timeout_secs() -> u32 {
    30
}

fn default_probe_target() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(1, 2, 3, 4), 1))
}
