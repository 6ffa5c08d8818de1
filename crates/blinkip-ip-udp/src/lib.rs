// # UDP Address Probe
//
// This crate provides the route-selection address probe for blinkip.
//
// ## How it works
//
// 1. Bind a UDP socket to `0.0.0.0:0`
// 2. `connect()` it to a fixed remote endpoint. For a datagram socket this
//    only asks the kernel to pick a route and a source address; nothing is
//    sent, so the endpoint does not need to be reachable.
// 3. Read back the locally bound address with `local_addr()`
// 4. Drop the socket
//
// If no route exists yet (e.g. early boot, before DHCP), `connect()` fails
// with "network is unreachable" and the probe reports
// `Error::RoutingUnavailable`.

use blinkip_core::config::ResolverConfig;
use blinkip_core::traits::AddressProbe;
use blinkip_core::{Error, Result};

use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::trace;

/// Probe that asks the kernel which address it would send from
#[derive(Debug, Clone)]
pub struct UdpRouteProbe {
    target: SocketAddr,
}

impl UdpRouteProbe {
    /// Create a probe routing towards `target`
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    /// Create a probe from resolver configuration
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.probe_target)
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait::async_trait]
impl AddressProbe for UdpRouteProbe {
    async fn local_address(&self) -> Result<Ipv4Addr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
            .await
            .map_err(|e| Error::routing(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(self.target)
            .await
            .map_err(|e| Error::routing(format!("No route to {}: {}", self.target, e)))?;

        let local = socket
            .local_addr()
            .map_err(|e| Error::routing(format!("Failed to read local address: {}", e)))?;
        trace!("Route to {} selected source {}", self.target, local);

        match local {
            SocketAddr::V4(addr) if !addr.ip().is_unspecified() => Ok(*addr.ip()),
            other => Err(Error::routing(format!(
                "Kernel selected no usable IPv4 source (got {})",
                other
            ))),
        }
    }
}
