//! Exit codes for the CLI

/// General error
pub const ERROR: i32 = 1;

/// Git error
pub const GIT_ERROR: i32 = 3;
