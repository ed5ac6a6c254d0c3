//! Seam to the external user-record store.
//!
//! The store is an external collaborator: the core only ever runs an
//! equality lookup on the identifier field and never mutates records.

use anyhow::Result;
use async_trait::async_trait;

use crate::auth::digest_secret;
use crate::models::user::UserRecord;

/// Read-only query interface over the user-record collection.
///
/// `find_by_identifier` must return every record whose identifier field
/// equals `identifier` exactly (case-sensitive); the verifier treats anything
/// other than a single match as a rejection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Vec<UserRecord>>;
}

/// In-process store backed by a plain `Vec`. Used by tests and local
/// development; production wires a real store behind the same trait.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: Vec<UserRecord>,
}

impl MemoryUserStore {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }

    /// Adds a record for `identifier`, storing the digest of `secret` the way
    /// the real store does.
    pub fn seed(mut self, identifier: &str, secret: &str) -> Self {
        self.records.push(UserRecord {
            identifier: identifier.to_string(),
            digested_secret: digest_secret(secret),
        });
        self
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Vec<UserRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.identifier == identifier)
            .cloned()
            .collect())
    }
}
