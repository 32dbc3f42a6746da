//! Athlete name anonymization
//!
//! Names are replaced by a 16-byte salted BLAKE2b digest. The run-wide
//! [`Salt`] goes into BLAKE2b's salt parameter (no key): the same name hashes
//! identically within a run, while a different secret yields unrelated
//! digests.

use blake2::Blake2bVarCore;
use blake2::digest::Output;
use blake2::digest::core_api::{Buffer, UpdateCore, VariableOutputCore};
use serde::{Deserialize, Deserializer};

/// Length of the salt, in bytes
pub const SALT_LEN: usize = 16;

/// Length of the name digest, in bytes
pub const DIGEST_LEN: usize = 16;

/// Run-wide secret used to key the name hash
///
/// Built from the first [`SALT_LEN`] bytes of a secret string; shorter
/// secrets are zero-padded.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Derive a salt from a secret string
    ///
    /// Returns `None` for an empty secret.
    pub fn from_secret(secret: &str) -> Option<Self> {
        if secret.is_empty() {
            return None;
        }
        let mut bytes = [0u8; SALT_LEN];
        let src = secret.as_bytes();
        let n = src.len().min(SALT_LEN);
        bytes[..n].copy_from_slice(&src[..n]);
        Some(Self(bytes))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secret = String::deserialize(deserializer)?;
        Salt::from_secret(&secret).ok_or_else(|| serde::de::Error::custom("salt must not be empty"))
    }
}

/// Hashes athlete names with a fixed salt
#[derive(Clone, Debug)]
pub struct NameHasher {
    salt: Salt,
}

impl NameHasher {
    /// Create a hasher salted with `salt`
    pub fn new(salt: Salt) -> Self {
        Self { salt }
    }

    /// Hex-encoded 16-byte digest of `name`
    ///
    /// Unkeyed BLAKE2b with `digest_size = 16` and the salt in the parameter
    /// block, as produced by Python's `hashlib.blake2b(name, digest_size=16,
    /// salt=salt)`.
    pub fn hash(&self, name: &str) -> String {
        let mut core =
            Blake2bVarCore::new_with_params(self.salt.as_bytes(), &[], 0, DIGEST_LEN);
        let mut buffer = Buffer::<Blake2bVarCore>::default();
        buffer.digest_blocks(name.as_bytes(), |blocks| core.update_blocks(blocks));

        let mut full = Output::<Blake2bVarCore>::default();
        core.finalize_variable_core(&mut buffer, &mut full);
        full[..DIGEST_LEN]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
