//! Full-mesh generation.
//!
//! For each peer, in manifest declaration order, the generated
//! document is that peer's own interface block followed by one
//! connection block per other peer, also in declaration order. The
//! mesh is O(n^2) in peer pairs; mesh sizes are tens of nodes, not a
//! scalability concern.

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::keys::PublicKeyDeriver;
use crate::peer::Peer;
use crate::render;

/// The ordered collection of peers declared in one manifest. Exists
/// only for the duration of one generation run.
#[derive(Clone, Debug)]
pub struct Mesh {
    peers: Vec<Peer>,
}

impl Mesh {
    /// Creates a mesh from an ordered peer list.
    pub fn new(peers: Vec<Peer>) -> Result<Self> {
        if peers.is_empty() {
            return Err(MeshError::ConfigParse(
                "no peers defined in manifest".to_string(),
            ));
        }
        Ok(Self { peers })
    }

    /// The peers in declaration order.
    #[must_use]
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    /// Number of peers in the mesh.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Whether the mesh has no peers. Always false for a constructed
    /// mesh, present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Generates the rendered configuration document for every peer.
    ///
    /// Returns `(peer_name, document)` pairs in declaration order.
    /// Public keys are derived through `deriver` as each block is
    /// rendered; the first derivation failure aborts the whole run.
    pub fn generate(&self, deriver: &dyn PublicKeyDeriver) -> Result<Vec<(String, String)>> {
        let mut docs = Vec::with_capacity(self.peers.len());
        for peer in &self.peers {
            docs.push((peer.name().to_string(), self.document_for(peer, deriver)?));
        }
        Ok(docs)
    }

    fn document_for(&self, peer: &Peer, deriver: &dyn PublicKeyDeriver) -> Result<String> {
        debug!(peer = peer.name(), "generating configuration document");
        let mut doc = render::interface_block(peer, deriver)?;
        for other in self.peers.iter().filter(|p| p.name() != peer.name()) {
            doc.push_str(&render::connection_block(other, deriver)?);
        }
        Ok(doc)
    }
}
