//! Content hashes identifying images.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PodError;

/// The only supported hash algorithm.
pub const HASH_ALGORITHM: &str = "sha512";

/// Digest size of [`HASH_ALGORITHM`] in bytes.
pub const HASH_DIGEST_BYTES: usize = 64;

/// Length of a canonical full hash string: `sha512-` plus the hex digest.
pub const FULL_HASH_LEN: usize = HASH_ALGORITHM.len() + 1 + 2 * HASH_DIGEST_BYTES;

/// An algorithm-tagged digest, `sha512-<hex>`.
///
/// The digest is stored lower-case. A digest shorter than the full
/// length is still a valid hash string and is treated by resolvers as a
/// prefix query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash {
    digest: String,
}

impl ContentHash {
    /// Hex digest without the algorithm tag.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// True when the digest has the full length for the algorithm.
    pub fn is_full(&self) -> bool {
        self.digest.len() == 2 * HASH_DIGEST_BYTES
    }
}

impl FromStr for ContentHash {
    type Err = PodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, digest) = s
            .split_once('-')
            .ok_or_else(|| PodError::InvalidReference(format!("badly formatted hash string: {s}")))?;

        if !algorithm.eq_ignore_ascii_case(HASH_ALGORITHM) {
            return Err(PodError::InvalidReference(format!(
                "unrecognized hash type: {algorithm}"
            )));
        }
        if digest.is_empty() {
            return Err(PodError::InvalidReference(
                "unexpected empty hash value".to_string(),
            ));
        }
        if digest.len() > 2 * HASH_DIGEST_BYTES || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PodError::InvalidReference(format!(
                "invalid {HASH_ALGORITHM} digest: {digest}"
            )));
        }

        Ok(Self {
            digest: digest.to_ascii_lowercase(),
        })
    }
}

impl TryFrom<String> for ContentHash {
    type Error = PodError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", HASH_ALGORITHM, self.digest)
    }
}
