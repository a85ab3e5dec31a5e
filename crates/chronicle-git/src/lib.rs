//! Chronicle Git - Git operations for changelog generation
//!
//! This crate reads commit history and answers "which release contains this
//! commit" by running the `git` executable, and uses libgit2 to locate the
//! repository and its remotes.

mod cli;
mod commits;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use cli::GitCli;
pub use commits::{parse_log, LOG_DELIMITER};
pub use remote::normalize_remote_url;
pub use repository::{GitRepo, Result};
pub use tags::{classify_describe, parse_describe_output, TagResolver};
pub use types::CommitRecord;
