//! ASCII-printable run detector.
//!
//! State machine over bytes: `Idle -> Run(start) -> Idle`. A run is any
//! maximal contiguous sequence of bytes in `0x20..=0x7E` or `{0x09,0x0A,0x0D}`,
//! capped at `cap_run_bytes` units.

use crate::config::Config;
use crate::detect::is_printable;
use crate::emit::{Emitter, Sink};
use crate::error::Error;

/// Scans `slice` for ASCII runs, emitting every qualifying run whose start
/// lies in `[core_start, core_end)`.
///
/// `base_offset` is the absolute file offset of `slice[0]`; `core_start` /
/// `core_end` are expressed relative to `slice`, as produced by the
/// dispatcher from a [`crate::plan::Tile`].
pub fn scan<S: Sink>(
    cfg: &Config,
    base_offset: u64,
    core_start: usize,
    core_end: usize,
    slice: &[u8],
    emitter: &Emitter<S>,
) -> Result<(), Error> {
    let len = slice.len();
    let cap = cfg.cap_run_bytes;
    let mut i = 0usize;

    while i < len {
        if !is_printable(slice[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < len && is_printable(slice[i]) && i - start < cap {
            i += 1;
        }
        let run = i - start;
        // The physical printable block continues past the cap iff more
        // printable bytes immediately follow the truncation point.
        let cap_truncated = i < len && is_printable(slice[i]) && run == cap;

        if run >= cfg.min_len {
            let terminator_ok = if cfg.null_only {
                i < len && slice[i] == 0
            } else {
                true
            };
            let start_in_core = start >= core_start && start < core_end;

            if terminator_ok && start_in_core {
                emitter.emit_ascii(base_offset + start as u64, run, &slice[start..start + run])?;
            }
        }

        // A run longer than the cap produces exactly one bounded emission
        // at its start: swallow the rest of this printable
        // block without starting further runs inside it.
        if cap_truncated {
            while i < len && is_printable(slice[i]) {
                i += 1;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Encodings, OutputFormat};
    use crate::emit::BufSink;

    fn cfg(min_len: usize, null_only: bool, cap: usize) -> Config {
        Config::new(
            min_len,
            Encodings { ascii: true, utf16le: false, utf16be: false },
            0,
            OutputFormat::Json,
            null_only,
            cap,
        )
        .unwrap()
    }

    fn run_scan(cfg: &Config, slice: &[u8]) -> String {
        let e = Emitter::new(BufSink::default(), cfg);
        scan(cfg, 0, 0, slice.len(), slice, &e).unwrap();
        String::from_utf8(e.into_inner().0).unwrap()
    }

    #[test]
    fn s1_two_runs_separated_by_junk() {
        let c = cfg(3, false, 4096);
        let out = run_scan(&c, b"Hell\x01lehoo");
        assert_eq!(
            out,
            "{\"offset\":0,\"kind\":\"ascii\",\"len\":4,\"text\":\"Hell\"}\n\
             {\"offset\":5,\"kind\":\"ascii\",\"len\":5,\"text\":\"lehoo\"}\n"
        );
    }

    #[test]
    fn s2_null_only_drops_unterminated_run() {
        let c = cfg(2, true, 4096);
        assert_eq!(run_scan(&c, b"CraK"), "");
    }

    #[test]
    fn s2_null_only_emits_terminated_run() {
        let c = cfg(2, true, 4096);
        let out = run_scan(&c, b"CraK\0");
        assert_eq!(out, "{\"offset\":0,\"kind\":\"ascii\",\"len\":4,\"text\":\"CraK\"}\n");
    }

    #[test]
    fn s5_cap_truncation_reports_detector_observed_chars() {
        let c = cfg(2, false, 5);
        let out = run_scan(&c, b"AAAAAAAAAAAA");
        // Exactly one bounded record for the whole 12-byte physical run,
        // per the cap-truncation edge rule above.
        assert_eq!(out, "{\"offset\":0,\"kind\":\"ascii\",\"len\":5,\"text\":\"AAAAA\"}\n");
    }

    #[test]
    fn run_resumes_after_swallowed_cap_overflow() {
        let c = cfg(2, false, 5);
        // 12 printable bytes, then junk, then a fresh qualifying run.
        let out = run_scan(&c, b"AAAAAAAAAAAA\x01hi");
        assert_eq!(
            out,
            "{\"offset\":0,\"kind\":\"ascii\",\"len\":5,\"text\":\"AAAAA\"}\n\
             {\"offset\":13,\"kind\":\"ascii\",\"len\":2,\"text\":\"hi\"}\n"
        );
    }

    #[test]
    fn run_shorter_than_min_len_is_not_emitted() {
        let c = cfg(5, false, 4096);
        assert_eq!(run_scan(&c, b"abcd"), "");
    }

    #[test]
    fn start_outside_core_is_suppressed() {
        let c = cfg(2, false, 4096);
        let e = Emitter::new(BufSink::default(), &c);
        // Run starts at index 0, but the core window is [2, 4): suppressed.
        scan(&c, 0, 2, 4, b"abcd", &e).unwrap();
        assert_eq!(e.into_inner().0, Vec::<u8>::new());
    }
}
