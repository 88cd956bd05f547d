//! UTF-16 ASCII-range run detector.
//!
//! Scans 16-bit code units at even byte offsets only; a single unaligned
//! junk byte preceding an otherwise-valid sequence suppresses detection
//! (the detector never resynchronises to odd offsets).

use crate::config::Config;
use crate::detect::is_printable;
use crate::emit::{Emitter, Sink};
use crate::error::Error;

/// Byte order of the 16-bit code units being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Accepts a unit `(lo, hi)` (or `(hi, lo)` for big-endian) iff
/// `hi == 0 && is_printable(lo)`.
#[inline]
fn accept(a: u8, b: u8, endian: Endian) -> bool {
    match endian {
        Endian::Little => b == 0 && is_printable(a),
        Endian::Big => a == 0 && is_printable(b),
    }
}

/// Scans `slice` for UTF-16 ASCII-range runs at even offsets, emitting every
/// qualifying run whose start byte lies in `[core_start, core_end)`.
pub fn scan<S: Sink>(
    cfg: &Config,
    endian: Endian,
    base_offset: u64,
    core_start: usize,
    core_end: usize,
    slice: &[u8],
    emitter: &Emitter<S>,
) -> Result<(), Error> {
    let len = slice.len();
    let cap_units = cfg.cap_run_bytes.div_ceil(2).max(1);
    let mut i = 0usize; // always even
    let mut run_start: Option<usize> = None;
    let mut chars = 0usize;

    while i + 1 < len {
        let accepted = accept(slice[i], slice[i + 1], endian);

        if accepted {
            if run_start.is_none() {
                run_start = Some(i);
                chars = 0;
            }
            chars += 1;
            i += 2;

            // The cap chunks an oversize run rather than stopping
            // consumption: reset and let the very next unit open a fresh
            // run, so a run longer than the cap produces several
            // consecutive bounded records instead of one.
            if chars >= cap_units {
                let start = run_start.take().unwrap();
                emit_if_qualifying(cfg, endian, base_offset, core_start, core_end, slice, start, i, chars, emitter)?;
                chars = 0;
            }
        } else if let Some(start) = run_start.take() {
            emit_if_qualifying(cfg, endian, base_offset, core_start, core_end, slice, start, i, chars, emitter)?;
            chars = 0;
            i += 2;
        } else {
            i += 2;
        }
    }

    // Trailing open run at end of slice: same close rules as a mid-scan
    // close, with `i` possibly pointing at a final unpaired byte (ignored).
    if let Some(start) = run_start.take() {
        emit_if_qualifying(cfg, endian, base_offset, core_start, core_end, slice, start, i, chars, emitter)?;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn emit_if_qualifying<S: Sink>(
    cfg: &Config,
    endian: Endian,
    base_offset: u64,
    core_start: usize,
    core_end: usize,
    slice: &[u8],
    start: usize,
    end: usize,
    chars: usize,
    emitter: &Emitter<S>,
) -> Result<(), Error> {
    if chars < cfg.min_len {
        return Ok(());
    }
    let terminator_ok = if cfg.null_only {
        end + 1 < slice.len() && slice[end] == 0 && slice[end + 1] == 0
    } else {
        true
    };
    let start_in_core = start >= core_start && start < core_end;
    if !terminator_ok || !start_in_core {
        return Ok(());
    }
    let region = &slice[start..end];
    match endian {
        Endian::Little => emitter.emit_utf16le(base_offset + start as u64, chars, region),
        Endian::Big => emitter.emit_utf16be(base_offset + start as u64, chars, region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Encodings, OutputFormat};
    use crate::emit::BufSink;

    fn cfg(min_len: usize, null_only: bool, cap: usize) -> Config {
        Config::new(
            min_len,
            Encodings { ascii: false, utf16le: true, utf16be: false },
            0,
            OutputFormat::Json,
            null_only,
            cap,
        )
        .unwrap()
    }

    fn run_scan(cfg: &Config, slice: &[u8]) -> String {
        let e = Emitter::new(BufSink::default(), cfg);
        scan(cfg, Endian::Little, 0, 0, slice.len(), slice, &e).unwrap();
        String::from_utf8(e.into_inner().0).unwrap()
    }

    #[test]
    fn s3_simple_utf16le_run() {
        let c = cfg(6, false, 4096);
        let out = run_scan(&c, b"S\0e\0r\0v\0e\0r\0");
        assert_eq!(out, "{\"offset\":0,\"kind\":\"utf16le\",\"len\":6,\"text\":\"Server\"}\n");
    }

    #[test]
    fn s4_misaligned_prefix_suppresses_detection() {
        let c = cfg(6, false, 4096);
        let mut input = vec![0xAA];
        input.extend_from_slice(b"S\0e\0r\0v\0e\0r\0");
        assert_eq!(run_scan(&c, &input), "");
    }

    #[test]
    fn null_only_requires_trailing_zero_unit() {
        let c = cfg(3, true, 4096);
        assert_eq!(run_scan(&c, b"a\0b\0c\0"), "");
        let out = run_scan(&c, b"a\0b\0c\0\0\0");
        assert_eq!(out, "{\"offset\":0,\"kind\":\"utf16le\",\"len\":3,\"text\":\"abc\"}\n");
    }

    #[test]
    fn cap_chunks_oversize_run_into_several_bounded_records() {
        let c = cfg(2, false, 6); // cap_units = 3
        let mut input = Vec::new();
        for ch in b'a'..=b'h' {
            input.push(ch);
            input.push(0);
        }
        // Unlike the ASCII detector's cap-truncation rule, the UTF-16 cap
        // chunks an oversize run into consecutive bounded records instead of
        // emitting one and swallowing the rest: 8 accepted units with
        // cap_units=3 yields "abc", "def", then a final "gh" (only 2 units,
        // still >= min_len).
        let out = run_scan(&c, &input);
        assert_eq!(
            out,
            "{\"offset\":0,\"kind\":\"utf16le\",\"len\":3,\"text\":\"abc\"}\n\
             {\"offset\":6,\"kind\":\"utf16le\",\"len\":3,\"text\":\"def\"}\n\
             {\"offset\":12,\"kind\":\"utf16le\",\"len\":2,\"text\":\"gh\"}\n"
        );
    }

    #[test]
    fn cap_trigger_uses_ceiling_division_for_odd_byte_caps() {
        // cap_run_bytes=5 -> cap_units = ceil(5/2) = 3, so the cap should not
        // fire at chars=2 (2*2=4 is not >= 5).
        let c = cfg(2, false, 5);
        let mut input = Vec::new();
        for ch in b'a'..=b'f' {
            input.push(ch);
            input.push(0);
        }
        let out = run_scan(&c, &input);
        assert_eq!(
            out,
            "{\"offset\":0,\"kind\":\"utf16le\",\"len\":3,\"text\":\"abc\"}\n\
             {\"offset\":6,\"kind\":\"utf16le\",\"len\":3,\"text\":\"def\"}\n"
        );
    }

    #[test]
    fn run_below_min_len_is_dropped() {
        let c = cfg(4, false, 4096);
        assert_eq!(run_scan(&c, b"a\0b\0c\0"), "");
    }
}
