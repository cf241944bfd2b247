//! Network identity: local hostname and the address it resolves to

use std::net::{IpAddr, ToSocketAddrs};
use sysinfo::System;

use super::CollectError;

/// Hostname plus resolved address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkIdentity {
    pub hostname: String,
    pub ip_address: IpAddr,
}

impl NetworkIdentity {
    /// Read the hostname and resolve it through the system resolver
    pub fn detect() -> Result<Self, CollectError> {
        let hostname = System::host_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CollectError::Hostname("the OS reported no hostname".to_string()))?;

        let ip_address = resolve_host(&hostname)?;
        tracing::debug!(%hostname, %ip_address, "hostname resolved");

        Ok(NetworkIdentity {
            hostname,
            ip_address,
        })
    }
}

/// Resolve `hostname`, preferring an IPv4 address
pub fn resolve_host(hostname: &str) -> Result<IpAddr, CollectError> {
    let addrs = (hostname, 0)
        .to_socket_addrs()
        .map_err(|source| CollectError::Resolve {
            host: hostname.to_string(),
            source,
        })?;

    preferred_address(addrs.map(|addr| addr.ip()))
        .ok_or_else(|| CollectError::NoAddress(hostname.to_string()))
}

/// First IPv4 address, or the first address of any family
pub fn preferred_address(addrs: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}
