//! Commit parsing

mod conventional;

pub use conventional::ConventionalParser;

use crate::types::Commit;
use chronicle_git::CommitRecord;

/// Trait for commit message parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit record into a structured commit.
    ///
    /// Messages that do not follow the parser's convention still produce a
    /// commit; its type, scope and subject are left empty.
    fn parse(&self, record: &CommitRecord) -> Commit;
}
