//! `stringer` — parallel batch string extractor for binary files.
//!
//! Given a contiguous byte buffer, locates maximal runs of printable ASCII
//! bytes and maximal runs of ASCII-range UTF-16 code units, and emits one
//! record per run with its absolute offset, kind, length, and rendered text.
//!
//! The library mirrors the pipeline it implements: [`config`] validates scan
//! settings, [`loader`] acquires the input buffer, [`plan`] partitions it
//! into overlapping tiles, [`detect`] scans each tile, [`emit`] serialises
//! records through a [`emit::Sink`], and [`dispatch`] drives detectors
//! across tiles on a pool of workers.

pub mod cli;
pub mod config;
pub mod detect;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod loader;
pub mod plan;
pub mod util;

pub use config::{Config, Encodings, OutputFormat};
pub use error::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
