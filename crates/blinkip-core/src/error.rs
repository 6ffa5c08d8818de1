//! Error types for blinkip
//!
//! This module defines all error types used throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for blinkip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for blinkip
#[derive(Error, Debug)]
pub enum Error {
    /// The LED output could not be opened (missing hardware, no privilege)
    #[error("Device unavailable at {}: {source}", .path.display())]
    DeviceUnavailable {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No route could be selected for the address probe
    #[error("Routing unavailable: {0}")]
    RoutingUnavailable(String),

    /// A value outside 0..=9 reached the numeral encoder
    #[error("Invalid digit: {0}")]
    InvalidDigit(String),

    /// Text that is not made of decimal digits and '.' separators
    #[error("Invalid digit string: {0:?}")]
    InvalidDigitString(String),

    /// Writing to the LED failed mid-run
    #[error("Device write failed: {0}")]
    DeviceWrite(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a device-unavailable error for `path`
    pub fn device_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DeviceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a routing error
    pub fn routing(msg: impl Into<String>) -> Self {
        Self::RoutingUnavailable(msg.into())
    }

    /// Create an invalid digit error
    pub fn invalid_digit(digit: impl ToString) -> Self {
        Self::InvalidDigit(digit.to_string())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
