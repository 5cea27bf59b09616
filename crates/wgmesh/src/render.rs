//! Rendering of interface and connection blocks.
//!
//! Pure text production: identical input yields byte-identical output
//! across runs, so generated files diff cleanly in version control.
//! Interface `Address` entries and `AllowedIPs` address entries are
//! both rendered host-only (`/32` or `/128`); a peer's declared
//! routes keep their own prefix lengths and are appended after the
//! addresses, in manifest order, without deduplication.

use std::fmt::Write as _;

use crate::addr::AddressAssignment;
use crate::error::Result;
use crate::keys::PublicKeyDeriver;
use crate::peer::Peer;

/// Keepalive interval in seconds written into every connection block.
pub const PERSISTENT_KEEPALIVE_SECS: u16 = 60;

/// Renders a peer's own `[Interface]` block, terminated by a blank
/// line.
pub fn interface_block(peer: &Peer, deriver: &dyn PublicKeyDeriver) -> Result<String> {
    let addresses: Vec<String> = peer.addresses().iter().map(AddressAssignment::as_host).collect();

    let mut block = String::from("[Interface]\n");
    let _ = writeln!(block, "Address = {}", addresses.join(","));
    let _ = writeln!(block, "PrivateKey = {}", peer.private_key());
    let _ = writeln!(block, "# Public Key is {}", deriver.derive(peer.private_key())?);
    let _ = writeln!(block, "ListenPort = {}", peer.endpoint_port());
    block.push('\n');
    Ok(block)
}

/// Renders the `[Peer]` block describing how to reach `peer` from
/// elsewhere in the mesh, terminated by a blank line.
pub fn connection_block(peer: &Peer, deriver: &dyn PublicKeyDeriver) -> Result<String> {
    let mut allowed: Vec<String> = peer.addresses().iter().map(AddressAssignment::as_host).collect();
    allowed.extend(peer.routes().iter().map(ToString::to_string));

    let mut block = String::from("[Peer]\n");
    let _ = writeln!(block, "# {} #", peer.name());
    let _ = writeln!(block, "PublicKey = {}", deriver.derive(peer.private_key())?);
    let _ = writeln!(block, "Endpoint = {}:{}", peer.endpoint_host(), peer.endpoint_port());
    let _ = writeln!(block, "AllowedIPs = {}", allowed.join(","));
    let _ = writeln!(block, "PersistentKeepalive = {PERSISTENT_KEEPALIVE_SECS}");
    block.push('\n');
    Ok(block)
}
