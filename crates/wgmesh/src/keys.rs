//! Public key derivation.
//!
//! Derivation sits behind the [`PublicKeyDeriver`] trait so that the
//! rendering path never talks to an external process directly. The
//! default implementation shells out to `wg pubkey`; [`LocalDeriver`]
//! performs the Curve25519 computation in-process, and
//! [`CachedDeriver`] memoizes whichever deriver it wraps.
//!
//! Derivation is invoked fresh on every public-key access by design.
//! Callers that derive the same key in a loop should wrap their
//! deriver in [`CachedDeriver`].

use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::Mutex;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use crate::error::{MeshError, Result};

/// Derives a WireGuard public key from a private key string.
pub trait PublicKeyDeriver {
    /// Returns the base64 public key corresponding to `private_key`.
    fn derive(&self, private_key: &str) -> Result<String>;
}

/// Derives public keys by spawning the external `wg pubkey` utility,
/// feeding the private key on stdin.
#[derive(Clone, Copy, Debug, Default)]
pub struct WgCommandDeriver;

impl PublicKeyDeriver for WgCommandDeriver {
    fn derive(&self, private_key: &str) -> Result<String> {
        let mut child = Command::new("wg")
            .arg("pubkey")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MeshError::KeyToolUnavailable(e.to_string()))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            MeshError::KeyDerivationFailed("could not open stdin of 'wg pubkey'".to_string())
        })?;
        stdin.write_all(private_key.as_bytes())?;
        drop(stdin);

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(MeshError::KeyDerivationFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Derives public keys in-process with `x25519-dalek`, for
/// environments where the `wg` tool is not installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalDeriver;

impl PublicKeyDeriver for LocalDeriver {
    fn derive(&self, private_key: &str) -> Result<String> {
        let bytes = BASE64.decode(private_key.trim()).map_err(|e| {
            MeshError::KeyDerivationFailed(format!("private key is not valid base64: {e}"))
        })?;
        let raw: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            MeshError::KeyDerivationFailed(format!(
                "private key must decode to 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        let secret = StaticSecret::from(raw);
        let public = X25519PublicKey::from(&secret);
        Ok(BASE64.encode(public.as_bytes()))
    }
}

/// Wraps another deriver and memoizes results per private key.
#[derive(Debug)]
pub struct CachedDeriver<D> {
    inner: D,
    cache: Mutex<HashMap<String, String>>,
}

impl<D> CachedDeriver<D> {
    /// Creates a caching wrapper around `inner`.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<D: PublicKeyDeriver> PublicKeyDeriver for CachedDeriver<D> {
    fn derive(&self, private_key: &str) -> Result<String> {
        if let Some(hit) = self.cache.lock().get(private_key) {
            return Ok(hit.clone());
        }
        let public = self.inner.derive(private_key)?;
        self.cache
            .lock()
            .insert(private_key.to_string(), public.clone());
        Ok(public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7748 section 6.1: Alice's private scalar and the public key
    // X25519(a, 9).
    const RFC7748_PRIVATE: &str = "dwdtCnMYpX08FsFyUbJmRd9ML4frwJkqsXf7pR25LCo=";
    const RFC7748_PUBLIC: &str = "hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo=";

    #[test]
    fn local_deriver_matches_rfc7748_vector() {
        let public = LocalDeriver.derive(RFC7748_PRIVATE).expect("derives");
        assert_eq!(public, RFC7748_PUBLIC);
    }

    #[test]
    fn local_deriver_is_deterministic() {
        let a = LocalDeriver.derive(RFC7748_PRIVATE).expect("derives");
        let b = LocalDeriver.derive(RFC7748_PRIVATE).expect("derives");
        assert_eq!(a, b);
    }

    #[test]
    fn local_deriver_trims_whitespace() {
        let padded = format!("  {RFC7748_PRIVATE}\n");
        let public = LocalDeriver.derive(&padded).expect("derives");
        assert_eq!(public, RFC7748_PUBLIC);
    }

    #[test]
    fn local_deriver_rejects_non_base64() {
        let err = LocalDeriver.derive("not base64!!!").expect_err("must fail");
        assert!(matches!(err, MeshError::KeyDerivationFailed(_)));
    }

    #[test]
    fn local_deriver_rejects_wrong_length() {
        // "AAAA" decodes to 3 bytes.
        let err = LocalDeriver.derive("AAAA").expect_err("must fail");
        assert!(matches!(err, MeshError::KeyDerivationFailed(_)));
        assert!(err.to_string().contains("32 bytes"));
    }

    struct CountingDeriver {
        calls: Mutex<u32>,
    }

    impl PublicKeyDeriver for CountingDeriver {
        fn derive(&self, private_key: &str) -> Result<String> {
            *self.calls.lock() += 1;
            Ok(format!("PUB[{private_key}]"))
        }
    }

    #[test]
    fn cached_deriver_calls_inner_once_per_key() {
        let deriver = CachedDeriver::new(CountingDeriver {
            calls: Mutex::new(0),
        });

        assert_eq!(deriver.derive("k1").expect("derives"), "PUB[k1]");
        assert_eq!(deriver.derive("k1").expect("derives"), "PUB[k1]");
        assert_eq!(deriver.derive("k2").expect("derives"), "PUB[k2]");
        assert_eq!(*deriver.inner.calls.lock(), 2);
    }
}
