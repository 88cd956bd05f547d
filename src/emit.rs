//! Thread-safe line emitter: renders one record per detector call into a
//! private scratch buffer, then serialises the final `write_all` through a
//! single mutex.
//!
//! The sink is a small trait rather than a concrete `Write` type, so tests
//! can substitute an in-memory sink without touching the filesystem.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::sync::Mutex;

use crate::config::{Config, OutputFormat};
use crate::error::Error;

/// Which detector produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Ascii,
    Utf16Le,
    Utf16Be,
}

impl Kind {
    fn text_column(self) -> &'static str {
        match self {
            Kind::Ascii => "ascii   ",
            Kind::Utf16Le => "utf16le ",
            Kind::Utf16Be => "utf16be ",
        }
    }

    fn json_name(self) -> &'static str {
        match self {
            Kind::Ascii => "ascii",
            Kind::Utf16Le => "utf16le",
            Kind::Utf16Be => "utf16be",
        }
    }
}

/// An opaque write-all destination. Implementors need not be internally
/// synchronised — [`Emitter`] wraps every sink in its own mutex.
pub trait Sink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Buffered stdout or file sink, used by the production binary.
pub struct StdoutSink(BufWriter<Box<dyn Write + Send>>);

impl StdoutSink {
    pub fn stdout() -> Self {
        let stdout: Stdout = io::stdout();
        StdoutSink(BufWriter::new(Box::new(stdout)))
    }

    pub fn file(file: File) -> Self {
        StdoutSink(BufWriter::new(Box::new(file)))
    }
}

impl Sink for StdoutSink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.write_all(bytes)?;
        self.0.flush()
    }
}

/// In-memory sink for tests: collects every written byte verbatim.
#[derive(Default)]
pub struct BufSink(pub Vec<u8>);

impl Sink for BufSink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

/// Serialises and writes one record per call. Rendering runs lock-free in a
/// private scratch buffer; the mutex covers only the final sink write, so
/// many workers can render concurrently.
pub struct Emitter<S: Sink> {
    sink: Mutex<S>,
    format: OutputFormat,
    cap_run_bytes: usize,
}

impl<S: Sink> Emitter<S> {
    pub fn new(sink: S, cfg: &Config) -> Self {
        Emitter { sink: Mutex::new(sink), format: cfg.format, cap_run_bytes: cfg.cap_run_bytes }
    }

    /// Consumes the emitter, returning the wrapped sink. Used by tests and
    /// by `main` to flush/close the sink after the dispatcher has joined.
    pub fn into_inner(self) -> S {
        self.sink.into_inner().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Emits an ASCII run. `bytes` is the run's raw (already-validated)
    /// printable bytes; `chars` is the detector-observed run length, which
    /// may exceed `bytes.len()` only never does here (ASCII units are bytes)
    /// but is kept distinct from the render length (two independent caps:
    /// a detector cap and a render cap).
    pub fn emit_ascii(&self, offset: u64, chars: usize, bytes: &[u8]) -> Result<(), Error> {
        self.emit(offset, Kind::Ascii, chars, bytes)
    }

    /// Emits a UTF-16LE run. `region` is the raw little-endian byte pairs
    /// covering the run (`2 * chars` bytes, barring a render-side cap).
    pub fn emit_utf16le(&self, offset: u64, chars: usize, region: &[u8]) -> Result<(), Error> {
        self.emit(offset, Kind::Utf16Le, chars, region)
    }

    /// Emits a UTF-16BE run (reserved, mirrors [`Self::emit_utf16le`]).
    pub fn emit_utf16be(&self, offset: u64, chars: usize, region: &[u8]) -> Result<(), Error> {
        self.emit(offset, Kind::Utf16Be, chars, region)
    }

    fn emit(&self, offset: u64, kind: Kind, chars: usize, raw: &[u8]) -> Result<(), Error> {
        let capped = if raw.len() > self.cap_run_bytes { &raw[..self.cap_run_bytes] } else { raw };
        let rendered = match kind {
            Kind::Ascii => capped.to_vec(),
            // Every accepted UTF-16 unit has hi == 0, so
            // decoding is the projection unit -> lo byte; no multibyte
            // UTF-8 expansion is needed.
            Kind::Utf16Le | Kind::Utf16Be => project_utf16(capped, kind),
        };

        let mut line = Vec::with_capacity(rendered.len() + 32);
        match self.format {
            OutputFormat::Text => render_text(&mut line, offset, kind, chars, &rendered),
            OutputFormat::Json => render_json(&mut line, offset, kind, chars, &rendered),
        }
        line.push(b'\n');

        let mut sink = self.sink.lock().unwrap_or_else(|poison| poison.into_inner());
        sink.write_all(&line).map_err(Error::SinkWrite)
    }
}

/// Projects raw UTF-16 byte pairs to their ASCII low bytes.
/// For UTF-16LE, each pair is `(lo, hi)`; for UTF-16BE, `(hi, lo)`.
fn project_utf16(region: &[u8], kind: Kind) -> Vec<u8> {
    let low_index = match kind {
        Kind::Utf16Le => 0,
        _ => 1,
    };
    region.chunks_exact(2).map(|pair| pair[low_index]).collect()
}

fn render_text(out: &mut Vec<u8>, offset: u64, kind: Kind, chars: usize, text: &[u8]) {
    out.extend_from_slice(format!("{:016x}", offset).as_bytes());
    out.push(b' ');
    out.extend_from_slice(kind.text_column().as_bytes());
    out.extend_from_slice(format!(" len={} \"", chars).as_bytes());
    escape_text(out, text);
    out.push(b'"');
}

fn render_json(out: &mut Vec<u8>, offset: u64, kind: Kind, chars: usize, text: &[u8]) {
    out.extend_from_slice(format!("{{\"offset\":{},\"kind\":\"{}\",\"len\":{},\"text\":\"", offset, kind.json_name(), chars).as_bytes());
    escape_json(out, text);
    out.extend_from_slice(b"\"}");
}

fn escape_text(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        match b {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            _ => out.push(b),
        }
    }
}

fn escape_json(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b if b < 0x20 => out.extend_from_slice(format!("\\u{:04x}", b).as_bytes()),
            _ => out.push(b),
        }
    }
}
