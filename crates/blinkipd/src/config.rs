// Configuration loading for blinkipd
//
// Sources, later ones winning:
// 1. Built-in defaults (`BlinkConfig::default()`)
// 2. Optional JSON file (`--config` / `BLINKIP_CONFIG`)
// 3. Environment variables:
//    - `BLINKIP_LED_BRIGHTNESS`: brightness attribute path
//    - `BLINKIP_LED_SIBLING`: sibling LED path used for polarity detection
//    - `BLINKIP_LED_TRIGGER`: trigger attribute path
//    - `BLINKIP_TRIGGER_MODE`: trigger restored at the end of the run
//    - `BLINKIP_RESOLVE_TIMEOUT_SECS`: number of one-second address samples
//    - `BLINKIP_PROBE_TARGET`: `ip:port` used to force route selection

use anyhow::{Context, Result};
use blinkip_core::BlinkConfig;
use std::path::{Path, PathBuf};

/// Load the configuration from an optional file plus the process environment
pub fn load(path: Option<&Path>) -> Result<BlinkConfig> {
    let mut config = match path {
        Some(path) => from_file(path)?,
        None => BlinkConfig::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn from_file(path: &Path) -> Result<BlinkConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Override `config` with any variables `lookup` knows about
pub fn apply_env<F>(config: &mut BlinkConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("BLINKIP_LED_BRIGHTNESS") {
        config.led.brightness_path = PathBuf::from(path);
    }
    if let Some(path) = lookup("BLINKIP_LED_SIBLING") {
        config.led.sibling_path = PathBuf::from(path);
    }
    if let Some(path) = lookup("BLINKIP_LED_TRIGGER") {
        config.led.trigger_path = PathBuf::from(path);
    }
    if let Some(mode) = lookup("BLINKIP_TRIGGER_MODE") {
        config.led.trigger_mode = mode;
    }
    if let Some(secs) = lookup("BLINKIP_RESOLVE_TIMEOUT_SECS") {
        config.resolver.timeout_secs = secs.trim().parse().with_context(|| {
            format!("BLINKIP_RESOLVE_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}")
        })?;
    }
    if let Some(target) = lookup("BLINKIP_PROBE_TARGET") {
        config.resolver.probe_target = target.trim().parse().with_context(|| {
            format!("BLINKIP_PROBE_TARGET must look like 1.2.3.4:1, got {target:?}")
        })?;
    }
    Ok(())
}
