use serde::{Deserialize, Serialize};

/// A credential pair captured by the entry surface. Lives only for the
/// duration of one verification attempt; never persisted, never logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub identifier: String,
    pub digested_secret: String,
}
