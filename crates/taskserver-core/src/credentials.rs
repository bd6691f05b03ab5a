//! Credential verification for mutating operations.
//!
//! The gate holds a username table seeded once at startup and immutable
//! afterwards. Secrets are never stored: each entry keeps a per-user random
//! salt and the SHA-256 digest of salt-then-secret, and verification
//! compares digests in constant time. Unknown usernames and wrong secrets
//! are indistinguishable to the caller.

use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Number of random salt bytes drawn for a freshly derived entry.
const SALT_LEN: usize = 16;

/// Errors raised while building a [`CredentialGate`] from a file.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to parse credentials file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field} for user '{username}': not valid base64")]
    InvalidEncoding {
        username: String,
        field: &'static str,
    },

    #[error("digest for user '{username}' must be {expected} bytes")]
    InvalidDigestLength { username: String, expected: usize },
}

/// A salted one-way digest of a secret. The secret itself is never kept.
#[derive(Debug, Clone)]
pub struct StoredSecret {
    salt: Vec<u8>,
    hash: [u8; 32],
}

impl StoredSecret {
    /// Derive a new entry from a secret, drawing a fresh random salt.
    pub fn derive(secret: &str) -> Self {
        use rand::Rng as _;

        let mut salt = vec![0u8; SALT_LEN];
        rand::rng().fill(&mut salt[..]);
        Self::with_salt(salt, secret)
    }

    fn with_salt(salt: Vec<u8>, secret: &str) -> Self {
        let hash = Self::digest(&salt, secret);
        Self { salt, hash }
    }

    /// Rebuild an entry from its base64 file representation.
    pub fn from_base64(
        username: &str,
        salt: &str,
        hash: &str,
    ) -> Result<Self, CredentialError> {
        let salt = STANDARD
            .decode(salt)
            .map_err(|_| CredentialError::InvalidEncoding {
                username: username.to_string(),
                field: "salt",
            })?;
        let hash_bytes =
            STANDARD
                .decode(hash)
                .map_err(|_| CredentialError::InvalidEncoding {
                    username: username.to_string(),
                    field: "hash",
                })?;
        let hash: [u8; 32] =
            hash_bytes
                .try_into()
                .map_err(|_| CredentialError::InvalidDigestLength {
                    username: username.to_string(),
                    expected: 32,
                })?;
        Ok(Self { salt, hash })
    }

    /// Base64 form of the salt, for writing credential files.
    pub fn salt_base64(&self) -> String {
        STANDARD.encode(&self.salt)
    }

    /// Base64 form of the digest, for writing credential files.
    pub fn hash_base64(&self) -> String {
        STANDARD.encode(self.hash)
    }

    fn digest(salt: &[u8], secret: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        hasher.finalize().into()
    }

    /// Constant-time check of a candidate secret against this entry.
    fn matches(&self, secret: &str) -> bool {
        let candidate = Self::digest(&self.salt, secret);
        bool::from(candidate[..].ct_eq(&self.hash[..]))
    }
}

/// Read-only table answering "is (username, secret) a valid pair?".
///
/// Construct once at startup and share by reference; verification takes no
/// locks and is safe to call from any number of threads.
pub struct CredentialGate {
    users: HashMap<String, StoredSecret>,
    /// Hashed when the username is unknown, so lookup misses cost the same
    /// digest work as mismatches.
    decoy: StoredSecret,
}

#[derive(Debug, Deserialize)]
struct CredentialFile {
    #[serde(default)]
    users: Vec<UserEntry>,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    username: String,
    salt: String,
    hash: String,
}

impl CredentialGate {
    /// Build a gate from pre-derived entries.
    pub fn new(entries: impl IntoIterator<Item = (String, StoredSecret)>) -> Self {
        Self {
            users: entries.into_iter().collect(),
            decoy: StoredSecret::derive("decoy"),
        }
    }

    /// Build a gate from the TOML credential-file format:
    ///
    /// ```toml
    /// [[users]]
    /// username = "alice"
    /// salt = "<base64>"
    /// hash = "<base64>"
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self, CredentialError> {
        let file: CredentialFile = toml::from_str(raw)?;
        let mut users = HashMap::with_capacity(file.users.len());
        for entry in file.users {
            let secret = StoredSecret::from_base64(&entry.username, &entry.salt, &entry.hash)?;
            users.insert(entry.username, secret);
        }
        tracing::debug!(users = users.len(), "credential table parsed");
        Ok(Self {
            users,
            decoy: StoredSecret::derive("decoy"),
        })
    }

    /// Number of seeded users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the table is empty (every verification will fail).
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Verify a username/secret pair. Total: every input yields `true` or
    /// `false`, never an error, and the caller cannot tell an unknown
    /// username from a wrong secret.
    pub fn verify(&self, username: &str, secret: &str) -> bool {
        let (entry, known) = match self.users.get(username) {
            Some(entry) => (entry, true),
            None => (&self.decoy, false),
        };
        // Non-short-circuiting `&`: the digest comparison runs for unknown
        // usernames too.
        entry.matches(secret) & known
    }
}
