//! Scan throughput across thread counts on a synthetic buffer.
//!
//! Run with:
//!   cargo bench --bench scan

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stringer::config::{Config, Encodings, OutputFormat};
use stringer::dispatch;
use stringer::emit::{BufSink, Emitter};
use stringer::plan;

fn synthetic_input(len: usize) -> Vec<u8> {
    let unit: &[u8] = b"The quick brown fox\x01\x02\x03S\0e\0r\0v\0e\0r\0\xffjumps over\x00a lazy dog\x07\x07";
    let mut buf = Vec::with_capacity(len);
    while buf.len() < len {
        buf.extend_from_slice(unit);
    }
    buf.truncate(len);
    buf
}

fn bench_scan_by_thread_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_threads");
    let input = synthetic_input(8 * 1024 * 1024);
    let cfg = Config::new(
        4,
        Encodings { ascii: true, utf16le: true, utf16be: false },
        0,
        OutputFormat::Json,
        false,
        4096,
    )
    .unwrap();

    group.throughput(Throughput::Bytes(input.len() as u64));
    for &threads in &[1usize, 2, 4, 8] {
        let plan = plan::build_plan(&cfg, input.len(), threads, 0);
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &threads| {
            b.iter(|| {
                let emitter = Emitter::new(BufSink::default(), &cfg);
                dispatch::run_scan(&cfg, &input, &plan, threads, &emitter);
                emitter.into_inner()
            })
        });
    }
    group.finish();
}

fn bench_scan_by_min_len(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_min_len");
    let input = synthetic_input(4 * 1024 * 1024);

    group.throughput(Throughput::Bytes(input.len() as u64));
    for &min_len in &[2usize, 8, 32] {
        let cfg = Config::new(
            min_len,
            Encodings { ascii: true, utf16le: false, utf16be: false },
            1,
            OutputFormat::Json,
            false,
            4096,
        )
        .unwrap();
        let plan = plan::build_plan(&cfg, input.len(), 1, 0);
        group.bench_with_input(BenchmarkId::new("min_len", min_len), &cfg, |b, cfg| {
            b.iter(|| {
                let emitter = Emitter::new(BufSink::default(), cfg);
                dispatch::run_scan(cfg, &input, &plan, 1, &emitter);
                emitter.into_inner()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan_by_thread_count, bench_scan_by_min_len);
criterion_main!(benches);
