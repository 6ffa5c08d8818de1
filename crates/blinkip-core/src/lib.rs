// # blinkip-core
//
// Core library for signalling a device's IPv4 address on a single LED.
//
// ## Architecture Overview
//
// - **AddressProbe**: Trait for sampling the primary outbound IPv4 address
// - **OutputSink**: Trait for the raw binary output behind the LED
// - **AddressResolver**: Samples the probe until the address stabilizes and
//   reduces it to a [`DigitString`]
// - **numeral**: Fixed digit → numeral table and symbol durations
// - **PulseDevice**: Polarity-aware on/off/pulse control over an `OutputSink`
// - **BlinkPlayer**: Plays a `DigitString` ten times, then releases the device
//
// ## Flow
//
// ```text
// AddressProbe ──► AddressResolver ──► DigitString ──► BlinkPlayer ──► PulseDevice ──► OutputSink
// ```
//
// Everything runs on a single task. Pauses are sequential timer awaits.

pub mod config;
pub mod device;
pub mod digits;
pub mod error;
pub mod numeral;
pub mod player;
pub mod resolver;
pub mod traits;

// Re-export core types for convenience
pub use config::{BlinkConfig, LedConfig, ResolverConfig};
pub use device::{DeviceState, Polarity, PulseDevice, SysfsLed};
pub use digits::{DigitString, SENTINEL_ADDRESS};
pub use error::{Error, Result};
pub use numeral::{Numeral, Symbol, encode_digit, symbol_duration};
pub use player::{BlinkPlayer, Step};
pub use resolver::AddressResolver;
pub use traits::{AddressProbe, OutputSink, SignalLevel};
