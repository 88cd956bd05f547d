//! Error taxonomy for the scan pipeline.
//!
//! A typed `thiserror` enum rather than an opaque `anyhow::Error` string, so
//! callers can match on a specific variant or call `exit_code()` instead of
//! parsing a message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // ── CLI / configuration — exit code 2 ──────────────────────────────
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("--min-len must be >= 2, got {min_len}")]
    MinLenTooSmall { min_len: usize },

    #[error("at least one encoding must be enabled")]
    NoEncodingsSelected,

    #[error("--cap-run-bytes must be >= 1, got {cap_run_bytes}")]
    InvalidCap { cap_run_bytes: usize },

    // ── Input acquisition — exit code 1 ────────────────────────────────
    #[error("{path} is not a regular file")]
    NotARegularFile { path: String },

    #[error("{path} is too large to map on this platform ({size} bytes)")]
    FileTooLarge { path: String, size: u64 },

    #[error("failed to open {path}: {source}")]
    IoOpen { path: String, #[source] source: std::io::Error },

    #[error("failed to read {path}: {source}")]
    IoRead { path: String, #[source] source: std::io::Error },

    #[error("failed to memory-map {path}: {source}")]
    MmapFailed { path: String, #[source] source: std::io::Error },

    // ── Output — exit code 1, recoverable per-worker ───────────────────
    #[error("sink write failed: {0}")]
    SinkWrite(#[source] std::io::Error),
}

impl Error {
    /// Process exit code this error should produce when it halts `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgs(_)
            | Error::MinLenTooSmall { .. }
            | Error::NoEncodingsSelected
            | Error::InvalidCap { .. } => 2,
            _ => 1,
        }
    }
}
