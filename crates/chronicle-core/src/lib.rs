//! Chronicle Core - Core library for changelog generation
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the Chronicle git, changelog and CLI crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChronicleError, Result};
pub use types::{ReleaseTag, UNRELEASED};
