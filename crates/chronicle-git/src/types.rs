//! Git types

use serde::{Deserialize, Serialize};

/// One commit as read from the commit log, before message parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Abbreviated commit hash
    pub hash: String,
    /// Commit time as Unix seconds
    pub timestamp: i64,
    /// Full commit message (subject, body and trailers)
    pub message: String,
}

impl CommitRecord {
    /// Create a new CommitRecord
    pub fn new(hash: impl Into<String>, timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            timestamp,
            message: message.into(),
        }
    }
}
