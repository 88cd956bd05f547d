//! Immutable scan configuration, validated once and shared read-only across
//! every worker thread for the lifetime of a scan.
//!
//! A small, `Copy`-friendly struct built once from parsed CLI flags, never
//! mutated after validation.

use crate::error::Error;

/// Output record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<offset:16-hex> <kind> len=<chars> "<escaped>"`
    Text,
    /// One JSON object per line.
    Json,
}

/// Which encodings a scan should look for. At least one must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encodings {
    pub ascii: bool,
    pub utf16le: bool,
    pub utf16be: bool,
}

impl Encodings {
    pub const fn none() -> Self {
        Encodings { ascii: false, utf16le: false, utf16be: false }
    }

    pub const fn any(self) -> bool {
        self.ascii || self.utf16le || self.utf16be
    }

    pub const fn any_utf16(self) -> bool {
        self.utf16le || self.utf16be
    }
}

/// Validated, immutable scan configuration.
///
/// Constructed only via [`Config::new`], which enforces every invariant up
/// front. Once built, every field is safe to copy into worker closures
/// without further checks.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub min_len: usize,
    pub encodings: Encodings,
    pub threads: usize,
    pub format: OutputFormat,
    pub null_only: bool,
    pub cap_run_bytes: usize,
}

impl Config {
    /// Validates and constructs a [`Config`].
    ///
    /// `threads == 0` means "auto" (probe CPU count at dispatch time); it is
    /// not resolved here since the planner also needs the raw hint to decide
    /// tile sizing.
    pub fn new(
        min_len: usize,
        encodings: Encodings,
        threads: usize,
        format: OutputFormat,
        null_only: bool,
        cap_run_bytes: usize,
    ) -> Result<Self, Error> {
        if min_len < 2 {
            return Err(Error::MinLenTooSmall { min_len });
        }
        if !encodings.any() {
            return Err(Error::NoEncodingsSelected);
        }
        if cap_run_bytes < 1 {
            return Err(Error::InvalidCap { cap_run_bytes });
        }
        Ok(Config { min_len, encodings, threads, format, null_only, cap_run_bytes })
    }

    /// Required terminator length in bytes for ASCII runs: one NUL byte when
    /// `null_only`, otherwise zero.
    pub fn ascii_terminator_len(&self) -> usize {
        if self.null_only { 1 } else { 0 }
    }

    /// Required terminator length in bytes for UTF-16 runs: two NUL bytes
    /// (one code unit) when `null_only`, otherwise zero.
    pub fn utf16_terminator_len(&self) -> usize {
        if self.null_only { 2 } else { 0 }
    }

    /// Left/right halo width derived from this config:
    ///
    /// ```text
    /// ov_ascii  = enc_ascii  ? (min_len - 1)     + (null_only ? 1 : 0) : 0
    /// ov_utf16  = enc_utf16  ? 2*(min_len - 1) + (null_only ? 2 : 0) : 0
    /// ov        = max(ov_ascii, ov_utf16)
    /// ```
    pub fn overlap(&self) -> usize {
        let ov_ascii = if self.encodings.ascii {
            (self.min_len - 1) + self.ascii_terminator_len()
        } else {
            0
        };
        let ov_utf16 = if self.encodings.any_utf16() {
            2 * (self.min_len - 1) + self.utf16_terminator_len()
        } else {
            0
        };
        ov_ascii.max(ov_utf16)
    }
}
