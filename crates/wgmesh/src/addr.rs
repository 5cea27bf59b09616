//! Address-with-prefix and route network parsing.
//!
//! Two kinds of strings appear in the manifest: `wg_ips` entries are
//! an address plus the prefix it was declared with (`10.0.0.1/24`),
//! while `routes` entries are whole CIDR networks (`192.168.1.0/24`).

use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::{MeshError, Result};

fn malformed(value: &str, reason: impl Into<String>) -> MeshError {
    MeshError::MalformedAddress {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// One IP address assigned to a peer's tunnel interface, together with
/// the prefix length it was declared with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressAssignment {
    addr: IpAddr,
    prefix_len: u8,
}

impl AddressAssignment {
    /// Parses an `address/prefix` string.
    ///
    /// The input must contain exactly one `/`, a syntactically valid
    /// IPv4 or IPv6 literal on the left and a prefix length that fits
    /// the address family on the right.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        let (Some(addr_part), Some(prefix_part), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed(
                s,
                "expected exactly one '/' separating address and prefix",
            ));
        };

        let addr: IpAddr = addr_part
            .parse()
            .map_err(|e: std::net::AddrParseError| malformed(s, e.to_string()))?;
        let prefix_len: u8 = prefix_part
            .parse()
            .map_err(|_| malformed(s, "prefix length is not a non-negative integer"))?;

        let max = host_prefix_for(addr);
        if prefix_len > max {
            return Err(malformed(
                s,
                format!("prefix length {prefix_len} exceeds /{max} for this address family"),
            ));
        }

        Ok(Self { addr, prefix_len })
    }

    /// The assigned address.
    #[must_use]
    pub const fn addr(&self) -> IpAddr {
        self.addr
    }

    /// The prefix length the address was declared with.
    #[must_use]
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The host-only prefix length for this address family: 32 for
    /// IPv4, 128 for IPv6.
    #[must_use]
    pub const fn host_prefix(&self) -> u8 {
        host_prefix_for(self.addr)
    }

    /// Renders the address at its declared prefix length.
    #[must_use]
    pub fn as_declared(&self) -> String {
        format!("{}/{}", self.addr, self.prefix_len)
    }

    /// Renders the address as a host-only entry (`/32` or `/128`).
    #[must_use]
    pub fn as_host(&self) -> String {
        format!("{}/{}", self.addr, self.host_prefix())
    }
}

impl fmt::Display for AddressAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

const fn host_prefix_for(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// A CIDR network a peer can carry traffic for. Appears only in other
/// peers' `AllowedIPs` lists, never in a peer's own interface block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteNetwork(IpNet);

impl RouteNetwork {
    /// Parses a CIDR network literal.
    ///
    /// Host bits must be zero: `10.0.0.1/24` is rejected, the network
    /// form `10.0.0.0/24` is not.
    pub fn parse(s: &str) -> Result<Self> {
        let net = s.parse::<IpNet>().map_err(|e| MeshError::InvalidRoute {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        if net.addr() != net.network() {
            return Err(MeshError::InvalidRoute {
                value: s.to_string(),
                reason: "host bits set".to_string(),
            });
        }
        Ok(Self(net))
    }

    /// The underlying network.
    #[must_use]
    pub const fn network(&self) -> &IpNet {
        &self.0
    }
}

impl fmt::Display for RouteNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
