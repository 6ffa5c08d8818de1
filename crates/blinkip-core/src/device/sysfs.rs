// # Sysfs LED Sink
//
// `OutputSink` backed by the Linux LED class interface.
//
// ## Files
//
// - `/sys/class/leds/<led>/brightness`: held open for the whole run and
//   written with `"0"` / `"1"`
// - `/sys/class/leds/<led>/trigger`: written once with the trigger name
//   (e.g. `mmc0`) when the device is released
//
// Writing either file usually requires root.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::traits::{OutputSink, SignalLevel};

/// LED exposed under `/sys/class/leds`
#[derive(Debug)]
pub struct SysfsLed {
    brightness: File,
    brightness_path: PathBuf,
    trigger_path: PathBuf,
}

impl SysfsLed {
    /// Open the brightness attribute for writing
    ///
    /// Fails with [`Error::DeviceUnavailable`] if it cannot be opened, before
    /// anything is written.
    pub async fn open<P, Q>(brightness_path: P, trigger_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let brightness_path = brightness_path.as_ref().to_path_buf();
        let brightness = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&brightness_path)
            .await
            .map_err(|e| Error::device_unavailable(&brightness_path, e))?;

        debug!("Opened LED brightness at {}", brightness_path.display());

        Ok(Self {
            brightness,
            brightness_path,
            trigger_path: trigger_path.as_ref().to_path_buf(),
        })
    }

}

#[async_trait]
impl OutputSink for SysfsLed {
    async fn write_level(&mut self, level: SignalLevel) -> Result<()> {
        trace!("Writing {} to {}", level, self.brightness_path.display());
        self.brightness.write_all(level.as_str().as_bytes()).await?;
        // tokio buffers writes in a background task until flushed
        self.brightness.flush().await?;
        Ok(())
    }

    async fn hand_off_trigger(&mut self, mode: &str) -> Result<()> {
        debug!("Writing trigger {} to {}", mode, self.trigger_path.display());
        fs::write(&self.trigger_path, mode).await?;
        Ok(())
    }
}
