//! Credential verification against the external user-record store.
//!
//! Verification is fail-closed: a store fault, a missing record, or an
//! ambiguous (multi-record) lookup all produce `Rejected`, indistinguishable
//! from a wrong secret. Nothing here logs or persists the identifier, the
//! secret, or its digest.

pub mod digest;

pub use digest::digest_secret;

use tracing::warn;

use crate::store::UserStore;

/// Outcome of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Authenticated,
    Rejected,
}

/// Verifies a credential pair: digests the secret, looks up the identifier,
/// and compares digests byte-for-byte. Empty inputs are rejected without
/// touching the store.
pub async fn verify(store: &dyn UserStore, identifier: &str, secret: &str) -> Verdict {
    if identifier.is_empty() || secret.is_empty() {
        return Verdict::Rejected;
    }

    let digest = digest_secret(secret);

    let records = match store.find_by_identifier(identifier).await {
        Ok(records) => records,
        Err(e) => {
            warn!("user store lookup failed: {e}");
            return Verdict::Rejected;
        }
    };

    // Exactly one record must match; zero or several are both rejections.
    let record = match records.as_slice() {
        [record] => record,
        _ => return Verdict::Rejected,
    };

    if record.digested_secret == digest {
        Verdict::Authenticated
    } else {
        Verdict::Rejected
    }
}
