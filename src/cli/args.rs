//! Typed CLI surface via `clap`'s derive API.
//!
//! A flat struct of `#[arg(...)]` fields, parsed with `Cli::parse()` in
//! `main`, then converted into the library's own validated types so the
//! rest of the crate never has to think about `clap`.

use clap::Parser;

use crate::config::{Config, Encodings, OutputFormat};
use crate::error::Error;

/// `stringer` — batch string extractor for binary files.
///
/// Locates maximal runs of printable ASCII bytes and ASCII-range UTF-16LE
/// code units in a file (or standard input) and emits one record per run.
#[derive(Parser, Debug)]
#[command(name = "stringer", version, about, long_about = None)]
pub struct Cli {
    /// Input file, or `-` to read standard input.
    pub input: String,

    /// Minimum run length in units (bytes for ascii, 16-bit units for utf16).
    #[arg(short = 'm', long = "min-len", default_value_t = 2, value_name = "N")]
    pub min_len: usize,

    /// Comma-separated encodings to scan: ascii, utf16le, utf16be, all.
    #[arg(short = 'e', long = "enc", default_value = "ascii,utf16le", value_name = "LIST")]
    pub enc: String,

    /// Worker thread count, or `auto` to probe the CPU count.
    #[arg(short = 't', long = "threads", default_value = "auto", value_name = "N|auto")]
    pub threads: String,

    /// Emit JSON Lines instead of the text format.
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Require a NUL terminator immediately after each run.
    #[arg(short = 'n', long = "null-only")]
    pub null_only: bool,

    /// Per-run byte cap applied by both the detectors and the renderer.
    #[arg(short = 'c', long = "cap-run-bytes", default_value_t = 4096, value_name = "N")]
    pub cap_run_bytes: usize,

    /// Write records to this path instead of standard output (`-` also
    /// means stdout, for symmetry with the input sentinel).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<String>,

    /// Raise the log level by one step; repeat for more (`-vv`). `clap`'s
    /// auto-generated `--version` flag uses `-V`, leaving `-v` free here.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Where records should be written, resolved from `--output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    Stdout,
    File(String),
}

/// The fully validated result of parsing and checking a [`Cli`]: a
/// [`Config`], the input path (or `-` for stdin, per `loader::STDIN_MARK`),
/// and where to send output.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    pub config: Config,
    pub input: String,
    pub output: OutputDest,
    pub verbose: u8,
}

impl Cli {
    /// Validates the parsed flags into a [`ParsedArgs`], covering every
    /// configuration invariant via [`Config::new`].
    pub fn into_parsed(self) -> Result<ParsedArgs, Error> {
        let encodings = parse_encodings(&self.enc)?;
        let threads = parse_threads(&self.threads)?;
        let format = if self.json { OutputFormat::Json } else { OutputFormat::Text };

        let config =
            Config::new(self.min_len, encodings, threads, format, self.null_only, self.cap_run_bytes)?;

        let output = match self.output.as_deref() {
            None | Some("-") => OutputDest::Stdout,
            Some(path) => OutputDest::File(path.to_owned()),
        };

        Ok(ParsedArgs { config, input: self.input, output, verbose: self.verbose })
    }
}

/// Parses the `--enc` comma list, expanding the `all` shorthand.
fn parse_encodings(raw: &str) -> Result<Encodings, Error> {
    let mut enc = Encodings::none();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token {
            "ascii" => enc.ascii = true,
            "utf16le" => enc.utf16le = true,
            "utf16be" => enc.utf16be = true,
            "all" => {
                enc.ascii = true;
                enc.utf16le = true;
                enc.utf16be = true;
            }
            other => {
                return Err(Error::InvalidArgs(format!(
                    "unknown encoding '{other}' (expected ascii, utf16le, utf16be, or all)"
                )))
            }
        }
    }
    Ok(enc)
}

/// Parses `--threads`: `auto` (or an empty string) resolves to `0`, meaning
/// "probe the CPU count at dispatch time"; any other value
/// must be a valid `usize`.
fn parse_threads(raw: &str) -> Result<usize, Error> {
    if raw.eq_ignore_ascii_case("auto") {
        return Ok(0);
    }
    raw.parse::<usize>()
        .map_err(|_| Error::InvalidArgs(format!("invalid --threads value '{raw}' (expected a number or 'auto')")))
}
