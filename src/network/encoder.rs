//! Credential hashing for the image API.
//!
//! The image endpoint authenticates with a hex-encoded SHA-1 digest of the
//! password in the `authorization` header. Hashing sits behind a trait so the
//! API client can be exercised with a transparent encoder in tests.

use sha1::{Digest, Sha1};

/// Hashes a plaintext credential into its wire form.
pub trait PasswordEncoder: Send + Sync {
    /// Encode a plaintext password for the `authorization` header.
    fn encode(&self, plain: &str) -> String;
}

/// SHA-1 encoder used by the production API client.
///
/// Hashes the UTF-8 bytes of the input and hex-encodes the digest: always
/// exactly 40 lowercase hex characters. Leading zero bytes of the digest
/// encode as `00`, so the width never varies with the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1PasswordEncoder;

impl Sha1PasswordEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncoder for Sha1PasswordEncoder {
    fn encode(&self, plain: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(plain.as_bytes());
        hex::encode(hasher.finalize())
    }
}
