#![no_main]
use libfuzzer_sys::fuzz_target;

use stringer::config::{Config, Encodings, OutputFormat};
use stringer::dispatch;
use stringer::emit::{BufSink, Emitter};
use stringer::plan;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Derive a small config from the first few bytes, then scan the rest.
    let min_len = 2 + (data[0] as usize % 6);
    let enc_byte = data[1];
    let encodings = Encodings {
        ascii: enc_byte & 0b001 != 0,
        utf16le: enc_byte & 0b010 != 0,
        utf16be: enc_byte & 0b100 != 0,
    };
    if !encodings.any() {
        return;
    }
    let null_only = data[2] & 1 != 0;
    let cap_run_bytes = 1 + (data[3] as usize) * 16;
    let body = &data[4..];

    let Ok(cfg) = Config::new(min_len, encodings, 0, OutputFormat::Json, null_only, cap_run_bytes) else {
        return;
    };

    // Single-threaded reference, then a handful of worker counts over a
    // small tile size so boundary-crossing runs are exercised. Neither call
    // may panic; the resulting record sets must agree (property: exactly-one
    // emission regardless of thread count).
    let reference = scan(&cfg, body, 1, 4096);
    for threads in [2usize, 4] {
        let result = scan(&cfg, body, threads, 4096);
        assert_eq!(result, reference);
    }
});

fn scan(cfg: &Config, input: &[u8], threads: usize, tile_hint: usize) -> Vec<u8> {
    let plan = plan::build_plan(cfg, input.len(), threads.max(1), tile_hint);
    let emitter = Emitter::new(BufSink::default(), cfg);
    dispatch::run_scan(cfg, input, &plan, threads, &emitter);
    let mut lines: Vec<&str> = std::str::from_utf8(&emitter.into_inner().0)
        .unwrap_or("")
        .lines()
        .collect();
    lines.sort_unstable();
    lines.join("\n").into_bytes()
}
