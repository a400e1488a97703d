use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use anyhow::anyhow;

/// Convert a raw network-order address (4 bytes for IPv4, 16 for IPv6) to an [`IpAddr`].
///
/// The textual form is the `Display` of the result: dotted quad or RFC 5952 notation.
pub(crate) fn ip_ntop(addr: &[u8]) -> Result<IpAddr, anyhow::Error> {
    if let Ok(octets) = <[u8; 4]>::try_from(addr) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }

    if let Ok(octets) = <[u8; 16]>::try_from(addr) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }

    Err(anyhow!(
        "Invalid IP address encoding: expected 4 or 16 bytes, got {}",
        addr.len()
    ))
}
