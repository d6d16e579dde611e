//! Local address resolution.
//!
//! Enumerates the host's network interfaces and picks one IPv4 address
//! to stamp on every sample. Resolution never fails: when no usable
//! address exists the loopback fallback is returned with a warning.

use std::net::{IpAddr, Ipv4Addr};

use sysinfo::Networks;
use tracing::{debug, info, warn};

/// Subnet favored when several candidate addresses exist.
const PREFERRED_PREFIX: [u8; 3] = [192, 168, 1];

/// Returned when enumeration yields no usable address.
const FALLBACK_ADDRESS: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Resolve the address the agent reports itself under.
///
/// Interfaces are walked in sorted-name order so the selection is
/// stable across runs. Loopback and administratively-down interfaces
/// contribute no candidate addresses and drop out via the per-address
/// filter.
pub fn resolve_local_address() -> Ipv4Addr {
    let networks = Networks::new_with_refreshed_list();

    let mut interfaces: Vec<_> = networks.list().iter().collect();
    interfaces.sort_by(|a, b| a.0.cmp(b.0));

    let mut candidates = Vec::new();
    for (name, data) in interfaces {
        for network in data.ip_networks() {
            match candidate(network.addr) {
                Some(addr) => {
                    info!(interface = %name, address = %addr, "found candidate address");
                    candidates.push(addr);
                }
                None => {
                    debug!(interface = %name, address = %network.addr, "skipping address");
                }
            }
        }
    }

    if candidates.is_empty() {
        warn!(
            fallback = %FALLBACK_ADDRESS,
            "no usable address found on any interface, using fallback"
        );
    }

    let selected = select_address(&candidates);
    info!(address = %selected, "resolved local address");
    selected
}

/// Keep only IPv4 addresses that are neither loopback nor link-local.
fn candidate(addr: IpAddr) -> Option<Ipv4Addr> {
    match addr {
        IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_link_local() => Some(v4),
        _ => None,
    }
}

/// Selection policy over the candidates, in enumeration order:
/// first address on the preferred subnet, else the first candidate,
/// else the loopback fallback.
fn select_address(candidates: &[Ipv4Addr]) -> Ipv4Addr {
    candidates
        .iter()
        .find(|addr| addr.octets()[..3] == PREFERRED_PREFIX)
        .or_else(|| candidates.first())
        .copied()
        .unwrap_or(FALLBACK_ADDRESS)
}
