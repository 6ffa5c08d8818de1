// # Address Probe Trait
//
// Defines the interface for sampling the machine's primary outbound IPv4
// address.
//
// ## Implementations
//
// - UDP route selection: `blinkip-ip-udp` crate
//
// ## Usage
//
// ```rust,ignore
// use blinkip_core::AddressProbe;
//
// async fn show(probe: &dyn AddressProbe) {
//     match probe.local_address().await {
//         Ok(addr) => println!("primary address: {addr}"),
//         Err(e) => println!("no route yet: {e}"),
//     }
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for address probe implementations
///
/// A probe takes exactly one sample per call. It must not retry, sleep or
/// cache: the stability policy lives in
/// [`AddressResolver`](crate::resolver::AddressResolver).
#[async_trait]
pub trait AddressProbe: Send + Sync {
    /// Sample the primary outbound IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The locally bound address the OS would route from
    /// - `Err(Error::RoutingUnavailable)`: No route could be selected
    async fn local_address(&self) -> Result<Ipv4Addr, crate::Error>;
}
