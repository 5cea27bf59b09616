//! WireGuard full-mesh configuration generation.
//!
//! This crate turns a single YAML manifest describing every node of a
//! WireGuard mesh into one configuration document per node: the node's
//! own `[Interface]` block followed by a `[Peer]` block for every other
//! node in the mesh, in declaration order.
//!
//! Public key derivation happens behind the [`PublicKeyDeriver`] trait
//! so that callers can use the external `wg` tool, an in-process
//! Curve25519 implementation, or a mock in tests.

pub mod addr;
pub mod error;
pub mod keys;
pub mod manifest;
pub mod mesh;
pub mod output;
pub mod peer;
pub mod render;

pub use addr::{AddressAssignment, RouteNetwork};
pub use error::{MeshError, Result};
pub use keys::{CachedDeriver, LocalDeriver, PublicKeyDeriver, WgCommandDeriver};
pub use manifest::{load_manifest, parse_manifest};
pub use mesh::Mesh;
pub use peer::{Peer, RawPeerRecord};
