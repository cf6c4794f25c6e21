//! crates/sr_io/src/lib.rs
//! Single I/O crate for the workspace.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Reports and override files are read from local paths only.
//! - Public surface kept small; details live in submodules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for sr_io (loader/schema/canonical_json/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or shape errors with a JSON Pointer to the offending value.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures.
    #[error("schema error at {pointer}: {msg}")]
    Schema { pointer: String, msg: String },

    /// Structural checks the schema cannot express (duplicate ids, non-finite weights).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Input larger than the loader accepts.
    #[error("limit: {0}")]
    Limit(String),

    /// Hashing unavailable or failed.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column but not a pointer; callers enrich when they can.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod schema;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_json_bytes, write_canonical_file};
    pub use crate::loader::{load_overrides, load_report, LoadedReport};
}
