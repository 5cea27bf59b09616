//! End-to-end generation: manifest text in, rendered documents and
//! files out.

use std::fs;

use wgmesh::{Mesh, PublicKeyDeriver, Result, output, parse_manifest};

struct MockDeriver;

impl PublicKeyDeriver for MockDeriver {
    fn derive(&self, private_key: &str) -> Result<String> {
        Ok(format!("PUB[{private_key}]"))
    }
}

const TWO_PEER_MANIFEST: &str = "\
peers:
  A:
    endpoint_host: a.example.com
    endpoint_port: 51820
    private_key: privA
    wg_ips:
      - 10.0.0.1/24
  B:
    endpoint_host: b.example.com
    endpoint_port: 51821
    private_key: privB
    wg_ips:
      - 10.0.0.2/24
    routes:
      - 192.168.1.0/24
";

#[test]
fn two_peer_mesh_matches_expected_documents() {
    let peers = parse_manifest(TWO_PEER_MANIFEST).expect("valid manifest");
    let mesh = Mesh::new(peers).expect("mesh");
    let docs = mesh.generate(&MockDeriver).expect("generates");

    assert_eq!(docs.len(), 2);

    let (name_a, doc_a) = &docs[0];
    assert_eq!(name_a, "A");
    assert_eq!(
        doc_a,
        "[Interface]\n\
         Address = 10.0.0.1/32\n\
         PrivateKey = privA\n\
         # Public Key is PUB[privA]\n\
         ListenPort = 51820\n\
         \n\
         [Peer]\n\
         # B #\n\
         PublicKey = PUB[privB]\n\
         Endpoint = b.example.com:51821\n\
         AllowedIPs = 10.0.0.2/32,192.168.1.0/24\n\
         PersistentKeepalive = 60\n\
         \n"
    );

    let (name_b, doc_b) = &docs[1];
    assert_eq!(name_b, "B");
    assert_eq!(
        doc_b,
        "[Interface]\n\
         Address = 10.0.0.2/32\n\
         PrivateKey = privB\n\
         # Public Key is PUB[privB]\n\
         ListenPort = 51821\n\
         \n\
         [Peer]\n\
         # A #\n\
         PublicKey = PUB[privA]\n\
         Endpoint = a.example.com:51820\n\
         AllowedIPs = 10.0.0.1/32\n\
         PersistentKeepalive = 60\n\
         \n"
    );
}

#[test]
fn generated_documents_land_in_named_files() {
    let peers = parse_manifest(TWO_PEER_MANIFEST).expect("valid manifest");
    let mesh = Mesh::new(peers).expect("mesh");
    let docs = mesh.generate(&MockDeriver).expect("generates");

    let dir = tempfile::tempdir().expect("tempdir");
    let written = output::write_configs(dir.path(), &docs).expect("writes");

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("A.conf").is_file());
    assert!(dir.path().join("B.conf").is_file());

    let on_disk = fs::read_to_string(dir.path().join("A.conf")).expect("read");
    assert_eq!(&on_disk, &docs[0].1);
}

#[test]
fn regeneration_is_byte_identical() {
    let peers = parse_manifest(TWO_PEER_MANIFEST).expect("valid manifest");
    let mesh = Mesh::new(peers).expect("mesh");

    let first = mesh.generate(&MockDeriver).expect("generates");
    let second = mesh.generate(&MockDeriver).expect("generates");
    assert_eq!(first, second);
}
