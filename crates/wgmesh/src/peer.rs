//! Peer entity construction and validation.

use serde::Deserialize;

use crate::addr::{AddressAssignment, RouteNetwork};
use crate::error::{MeshError, Result};

/// A peer record exactly as it appears in the manifest, before any
/// validation. All fields are optional here so that missing-field
/// errors can name the field instead of surfacing as opaque
/// deserialization failures.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPeerRecord {
    /// Hostname or IP the peer's tunnel endpoint listens on.
    pub endpoint_host: Option<String>,
    /// UDP port of the tunnel endpoint.
    pub endpoint_port: Option<u64>,
    /// The peer's WireGuard private key (opaque, never validated
    /// structurally beyond presence).
    pub private_key: Option<String>,
    /// Addresses assigned to the peer's interface, as
    /// `address/prefix` strings.
    pub wg_ips: Option<Vec<String>>,
    /// CIDR networks this peer carries traffic for.
    pub routes: Option<Vec<String>>,
}

/// One validated node in the mesh. Read-only after construction; the
/// public key is derived on demand through a
/// [`PublicKeyDeriver`](crate::keys::PublicKeyDeriver), not stored.
#[derive(Clone, Debug)]
pub struct Peer {
    name: String,
    endpoint_host: String,
    endpoint_port: u16,
    private_key: String,
    addresses: Vec<AddressAssignment>,
    routes: Vec<RouteNetwork>,
}

impl Peer {
    /// Builds a peer from a raw manifest record.
    ///
    /// Pure construction: no I/O, no key derivation. Address and route
    /// order is preserved from the record.
    pub fn from_record(name: impl Into<String>, record: RawPeerRecord) -> Result<Self> {
        let endpoint_host = record
            .endpoint_host
            .ok_or(MeshError::MissingField("endpoint_host"))?;
        let port = record
            .endpoint_port
            .ok_or(MeshError::MissingField("endpoint_port"))?;
        let endpoint_port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or(MeshError::InvalidPort(port))?;
        let private_key = record
            .private_key
            .ok_or(MeshError::MissingField("private_key"))?;

        let ips = record.wg_ips.unwrap_or_default();
        if ips.is_empty() {
            return Err(MeshError::MissingAddresses);
        }

        let mut addresses = Vec::with_capacity(ips.len());
        for ip in &ips {
            let assignment = AddressAssignment::parse(ip).map_err(|e| match e {
                MeshError::MalformedAddress { value, reason } => {
                    MeshError::InvalidAddress { value, reason }
                }
                other => other,
            })?;
            addresses.push(assignment);
        }

        let mut routes = Vec::new();
        for route in record.routes.unwrap_or_default() {
            routes.push(RouteNetwork::parse(&route)?);
        }

        Ok(Self {
            name: name.into(),
            endpoint_host,
            endpoint_port,
            private_key,
            addresses,
            routes,
        })
    }

    /// The peer's mesh-wide unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hostname or IP of the peer's endpoint.
    #[must_use]
    pub fn endpoint_host(&self) -> &str {
        &self.endpoint_host
    }

    /// UDP port of the peer's endpoint.
    #[must_use]
    pub const fn endpoint_port(&self) -> u16 {
        self.endpoint_port
    }

    /// The peer's private key, verbatim from the manifest.
    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Addresses assigned to the peer's interface, in manifest order.
    #[must_use]
    pub fn addresses(&self) -> &[AddressAssignment] {
        &self.addresses
    }

    /// Networks routed through this peer, in manifest order.
    #[must_use]
    pub fn routes(&self) -> &[RouteNetwork] {
        &self.routes
    }
}
