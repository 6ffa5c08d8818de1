//! Address resolution
//!
//! The [`AddressResolver`] samples an [`AddressProbe`] once per second until
//! the same address is seen on two consecutive samples, or until the sample
//! budget runs out.
//!
//! ## Why two samples
//!
//! Right after boot some network stacks briefly report a bogus address
//! before DHCP settles. Requiring a repeat filters it out. The tolerance
//! (two matches, one sample per second, 30 samples by default) is what
//! operators are used to, so it is fixed.
//!
//! ## Failure policy
//!
//! A failed sample is never an error. It counts as the sentinel address
//! [`SENTINEL_ADDRESS`] and breaks any streak in progress. If the budget
//! runs out, the latest observation is used, which may be the sentinel.

use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::digits::{DigitString, SENTINEL_ADDRESS};
use crate::traits::AddressProbe;

/// Consecutive identical samples needed to accept an address
pub const REQUIRED_REPEATS: u32 = 2;

/// Delay before each sample
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Tracks the previous sample and how many times in a row it was seen
#[derive(Debug, Default, Clone)]
struct StabilityTracker {
    last: Option<Ipv4Addr>,
    repeats: u32,
}

impl StabilityTracker {
    /// Record a successful sample; returns true once it is stable
    fn observe(&mut self, addr: Ipv4Addr) -> bool {
        if self.last == Some(addr) {
            self.repeats += 1;
        } else {
            self.last = Some(addr);
            self.repeats = 1;
        }
        self.repeats >= REQUIRED_REPEATS
    }

    fn reset(&mut self) {
        self.last = None;
        self.repeats = 0;
    }
}

/// Resolves the digits to blink for this machine
pub struct AddressResolver {
    probe: Box<dyn AddressProbe>,
    timeout_secs: u32,
}

impl AddressResolver {
    /// Create a resolver taking at most `timeout_secs` samples
    pub fn new(probe: Box<dyn AddressProbe>, timeout_secs: u32) -> Self {
        Self {
            probe,
            timeout_secs,
        }
    }

    /// Create a resolver from configuration
    pub fn from_config(probe: Box<dyn AddressProbe>, config: &ResolverConfig) -> Self {
        Self::new(probe, config.timeout_secs)
    }

    /// Sample until stable and return the dotted address
    ///
    /// Blocks for up to `timeout_secs` seconds. Never fails.
    pub async fn resolve_address(&self) -> String {
        let mut tracker = StabilityTracker::default();
        let mut latest = SENTINEL_ADDRESS.to_string();

        for attempt in 1..=self.timeout_secs {
            tokio::time::sleep(SAMPLE_INTERVAL).await;

            match self.probe.local_address().await {
                Ok(addr) => {
                    debug!("Sample {}: ip = {}", attempt, addr);
                    latest = addr.to_string();
                    if tracker.observe(addr) {
                        info!("Address {} stable after {} sample(s)", addr, attempt);
                        return latest;
                    }
                }
                Err(e) => {
                    debug!("Sample {}: {}", attempt, e);
                    tracker.reset();
                    latest = SENTINEL_ADDRESS.to_string();
                }
            }
        }

        warn!(
            "Address did not stabilize within {} sample(s), using {}",
            self.timeout_secs, latest
        );
        latest
    }

    /// Sample until stable and reduce the address to its digit string
    pub async fn resolve(&self) -> DigitString {
        let address = self.resolve_address().await;
        // Every value resolve_address produces is a dotted IPv4 address or
        // the sentinel, both of which reduce cleanly.
        DigitString::from_address(&address).unwrap_or_else(|e| {
            warn!("Could not reduce {}: {}", address, e);
            DigitString::sentinel()
        })
    }
}
