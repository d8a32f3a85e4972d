//! Local address discovery module
//!
//! Finds a non-loopback address so the startup banner can print a URL
//! reachable from other devices on the same network.

use std::net::{IpAddr, UdpSocket};

/// Discover the outbound interface address, best effort.
///
/// "Connecting" a UDP socket to a public address selects the interface the
/// OS would route through; no packet is actually sent. Any failure (no
/// network, no route) returns `None` and callers degrade to `localhost`.
#[must_use]
pub fn discover_local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    let addr = socket.local_addr().ok()?;

    if addr.ip().is_loopback() {
        None
    } else {
        Some(addr.ip())
    }
}
