//! Error types for mesh configuration generation.

use thiserror::Error;

/// Convenience result alias for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while loading a manifest, validating peers,
/// deriving keys, or writing configuration files.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Document-level failure: missing or empty `peers` key, or a
    /// top-level shape that is not a mapping of names to records.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Two peers share the same name. Later entries do not silently
    /// overwrite earlier ones.
    #[error("duplicate peer name '{0}'")]
    DuplicatePeer(String),

    /// A peer-level failure, wrapped with the peer's name.
    #[error("failed to parse peer '{name}': {source}")]
    Peer {
        /// Name of the offending peer.
        name: String,
        /// The underlying validation failure.
        #[source]
        source: Box<MeshError>,
    },

    /// A required field is absent from a peer record.
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    /// `wg_ips` is absent or empty. Every peer needs at least one
    /// address.
    #[error("no addresses specified in wg_ips")]
    MissingAddresses,

    /// The endpoint port is outside 1-65535.
    #[error("endpoint port {0} is out of range (1-65535)")]
    InvalidPort(u64),

    /// An address-with-prefix string could not be parsed.
    #[error("address '{value}' is malformed: {reason}")]
    MalformedAddress {
        /// The offending input string.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `wg_ips` entry was rejected during peer construction.
    #[error("address '{value}' is invalid: {reason}")]
    InvalidAddress {
        /// The offending input string.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `routes` entry is not a valid CIDR network.
    #[error("route '{value}' is invalid: {reason}")]
    InvalidRoute {
        /// The offending input string.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The key-derivation utility could not be located or executed.
    #[error("'wg' utility unavailable: {0}")]
    KeyToolUnavailable(String),

    /// The key-derivation utility ran but rejected the private key.
    #[error("public key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// File or directory I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The manifest is not valid YAML.
    #[error("invalid manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
