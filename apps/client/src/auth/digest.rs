use sha2::{Digest, Sha256};

/// SHA-256 of the secret, rendered as lowercase hex.
///
/// Deterministic by construction; stored records hold the same encoding, so
/// verification is an exact string comparison and the secret itself is never
/// kept anywhere.
pub fn digest_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
