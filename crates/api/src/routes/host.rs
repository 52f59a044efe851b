//! Host Routes
//!
//! Dashboards use the reported address to check that each room's device
//! is reachable.

use axum::Json;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::ptr;
use tracing::warn;

/// Reported when the host has no external IPv4 address
pub const IP_NOT_FOUND: &str = "IP address not found";

/// One IPv4 address bound to a local interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub ip: Ipv4Addr,
    pub loopback: bool,
}

#[derive(Debug, Serialize)]
pub struct HostIpResponse {
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
}

/// Address of the first non-loopback IPv4 interface
pub async fn get_ip() -> Json<HostIpResponse> {
    let ip_address = first_external_ipv4(&interface_ipv4s())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| IP_NOT_FOUND.to_string());
    Json(HostIpResponse { ip_address })
}

/// First address not on a loopback interface, in enumeration order
pub fn first_external_ipv4(addrs: &[InterfaceAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find(|addr| !addr.loopback).map(|addr| addr.ip)
}

/// IPv4 addresses of all local interfaces, via `getifaddrs(3)`
pub fn interface_ipv4s() -> Vec<InterfaceAddr> {
    let mut head: *mut libc::ifaddrs = ptr::null_mut();
    // SAFETY: `head` is a valid out-pointer; freed below on success
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        warn!("getifaddrs failed: {}", std::io::Error::last_os_error());
        return Vec::new();
    }

    let mut addrs = Vec::new();
    let mut cursor = head;
    while !cursor.is_null() {
        // SAFETY: non-null entries of the list returned by getifaddrs
        let entry = unsafe { &*cursor };
        if !entry.ifa_addr.is_null() {
            // SAFETY: ifa_addr points to a sockaddr whose family selects its layout
            let family = unsafe { (*entry.ifa_addr).sa_family } as libc::c_int;
            if family == libc::AF_INET {
                let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
                addrs.push(InterfaceAddr {
                    ip: Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)),
                    loopback: entry.ifa_flags & libc::IFF_LOOPBACK as libc::c_uint != 0,
                });
            }
        }
        cursor = entry.ifa_next;
    }

    // SAFETY: `head` came from a successful getifaddrs and is freed once
    unsafe { libc::freeifaddrs(head) };
    addrs
}
