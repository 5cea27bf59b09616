//! Manifest loading: the YAML document describing every peer.
//!
//! The manifest has one top-level key, `peers`, mapping peer names to
//! records:
//!
//! ```yaml
//! peers:
//!   alpha:
//!     endpoint_host: a.example.com
//!     endpoint_port: 51820
//!     private_key: "..."
//!     wg_ips: ["10.0.0.1/24"]
//!     routes: ["192.168.1.0/24"]
//! ```
//!
//! Declaration order is significant: generated documents list peers in
//! the order they appear here. Duplicate names fail loudly instead of
//! silently collapsing to the last entry.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::peer::{Peer, RawPeerRecord};

/// Parses a manifest document into validated peers, in declaration
/// order.
pub fn parse_manifest(input: &str) -> Result<Vec<Peer>> {
    let doc: Value = serde_yaml::from_str(input)?;

    let peers_value = doc.get("peers").ok_or_else(|| {
        MeshError::ConfigParse("manifest missing 'peers' top-level key".to_string())
    })?;
    let mapping = peers_value.as_mapping().ok_or_else(|| {
        MeshError::ConfigParse("'peers' must be a mapping of name to record".to_string())
    })?;
    if mapping.is_empty() {
        return Err(MeshError::ConfigParse(
            "no peers defined in manifest".to_string(),
        ));
    }

    let mut peers: Vec<Peer> = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| MeshError::ConfigParse("peer names must be strings".to_string()))?;
        if peers.iter().any(|p| p.name() == name) {
            return Err(MeshError::DuplicatePeer(name.to_string()));
        }

        let record: RawPeerRecord = serde_yaml::from_value(value.clone())
            .map_err(|e| wrap_for(name, MeshError::Yaml(e)))?;
        let peer = Peer::from_record(name, record).map_err(|e| wrap_for(name, e))?;
        debug!(peer = name, "parsed peer record");
        peers.push(peer);
    }

    Ok(peers)
}

/// Reads and parses a manifest file from disk.
pub fn load_manifest(path: &Path) -> Result<Vec<Peer>> {
    let input = fs::read_to_string(path)?;
    parse_manifest(&input)
}

fn wrap_for(name: &str, source: MeshError) -> MeshError {
    MeshError::Peer {
        name: name.to_string(),
        source: Box::new(source),
    }
}
