use std::net::{Ipv4Addr, SocketAddr};

/// Peer address as reported to producers and observers: IPv4-mapped IPv6
/// is unwrapped and the IPv6 loopback reads as `127.0.0.1`.
pub fn remote_address(addr: SocketAddr) -> String {
    match addr.ip().to_canonical() {
        ip if ip.is_ipv6() && ip.is_loopback() => Ipv4Addr::LOCALHOST.to_string(),
        ip => ip.to_string(),
    }
}
