//! Core traits for blinkip
//!
//! This module defines the seams between the blink engine and the host.
//!
//! - [`AddressProbe`]: Sample the primary outbound IPv4 address
//! - [`OutputSink`]: Raw binary output behind the LED

pub mod address_probe;
pub mod output_sink;

pub use address_probe::AddressProbe;
pub use output_sink::{OutputSink, SignalLevel};
