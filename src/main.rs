//! Binary entry point for the `stringer` command-line tool.
//!
//! Parses `argv` with [`stringer::cli::Cli`], validates it into a
//! [`stringer::Config`], loads the input into a buffer, builds a tile plan,
//! dispatches the scan across workers, and joins.

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use stringer::cli::Cli;
use stringer::dispatch;
use stringer::emit::{Emitter, StdoutSink};
use stringer::error::Error;
use stringer::loader;
use stringer::plan;
use stringer::util::count_cores;
use stringer::cli::args::OutputDest;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str())).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parsed = match cli.into_parsed() {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    match run(parsed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &Error) -> ExitCode {
    log::error!("{e}");
    eprintln!("stringer: {e}");
    ExitCode::from(e.exit_code() as u8)
}

fn run(parsed: stringer::cli::args::ParsedArgs) -> Result<(), Error> {
    let cfg = parsed.config;

    log::info!("loading input from {}", parsed.input);
    let buf = loader::load(&parsed.input)?;

    let configured_threads = if cfg.threads == 0 { count_cores() } else { cfg.threads };
    let tiles = plan::build_plan(&cfg, buf.len(), configured_threads, 0);
    log::debug!(
        "plan: {} tile(s), overlap={} bytes, {} byte input",
        tiles.len(),
        cfg.overlap(),
        buf.len()
    );

    let sink = match parsed.output {
        OutputDest::Stdout => StdoutSink::stdout(),
        OutputDest::File(path) => {
            let file = File::create(&path).map_err(|source| Error::IoOpen { path, source })?;
            StdoutSink::file(file)
        }
    };
    let emitter = Emitter::new(sink, &cfg);

    dispatch::run_scan(&cfg, &buf, &tiles, cfg.threads, &emitter);

    // Each emitted line is already flushed as it is written; dropping the
    // sink here just releases its BufWriter.
    drop(emitter.into_inner());
    Ok(())
}
