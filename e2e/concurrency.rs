//! End-to-end concurrency property: for any input and any worker count, the
//! multiset of emitted `(offset, kind, chars)` triples matches the
//! single-threaded reference result.

use std::collections::BTreeSet;

use stringer::config::{Config, Encodings, OutputFormat};
use stringer::dispatch;
use stringer::emit::{BufSink, Emitter};
use stringer::plan;

fn synthetic_input(len: usize) -> Vec<u8> {
    // A mix of printable ASCII runs, UTF-16LE runs, and non-printable
    // separators, repeated to fill `len` bytes.
    let unit: &[u8] = b"The quick brown fox\x01\x02\x03S\0e\0r\0v\0e\0r\0\xffjumps over\x00a lazy dog\x07\x07";
    let mut buf = Vec::with_capacity(len);
    while buf.len() < len {
        buf.extend_from_slice(unit);
    }
    buf.truncate(len);
    buf
}

fn scan_with_threads(cfg: &Config, input: &[u8], threads: usize, tile_hint: usize) -> BTreeSet<(u64, &'static str, usize)> {
    let plan = plan::build_plan(cfg, input.len(), threads.max(1), tile_hint);
    let emitter = Emitter::new(BufSink::default(), cfg);
    dispatch::run_scan(cfg, input, &plan, threads, &emitter);
    let bytes = emitter.into_inner().0;
    let text = String::from_utf8(bytes).unwrap();
    text.lines()
        .map(|line| {
            let offset = line.split("\"offset\":").nth(1).unwrap().split(',').next().unwrap().parse::<u64>().unwrap();
            let kind = if line.contains("\"kind\":\"ascii\"") {
                "ascii"
            } else if line.contains("\"kind\":\"utf16le\"") {
                "utf16le"
            } else {
                "utf16be"
            };
            let len = line.split("\"len\":").nth(1).unwrap().split(',').next().unwrap().parse::<usize>().unwrap();
            (offset, kind, len)
        })
        .collect()
}

#[test]
fn exactly_one_emission_across_thread_counts() {
    let cfg = Config::new(
        4,
        Encodings { ascii: true, utf16le: true, utf16be: false },
        0,
        OutputFormat::Json,
        false,
        4096,
    )
    .unwrap();
    let input = synthetic_input(600_000);

    // Small tile hint forces many tiles so boundary-crossing runs are
    // actually exercised at every thread count below.
    let reference = scan_with_threads(&cfg, &input, 1, 32 * 1024);
    assert!(!reference.is_empty());

    for threads in [1usize, 2, 4, 8] {
        let result = scan_with_threads(&cfg, &input, threads, 32 * 1024);
        assert_eq!(result, reference, "thread count {threads} disagreed with the single-threaded reference");
    }
}

#[test]
fn exactly_one_emission_with_null_only_and_utf16be() {
    let cfg = Config::new(
        3,
        Encodings { ascii: true, utf16le: true, utf16be: true },
        0,
        OutputFormat::Json,
        true,
        256,
    )
    .unwrap();

    let mut input = Vec::new();
    for i in 0..200u32 {
        input.extend_from_slice(format!("item{i:04}\0").as_bytes());
        input.push(0xAB);
    }

    let reference = scan_with_threads(&cfg, &input, 1, 16 * 1024);
    let multi = scan_with_threads(&cfg, &input, 4, 16 * 1024);
    assert_eq!(multi, reference);
}
