//! Exercises `Cli::parse`'s `clap` surface directly (short/long flags,
//! repeated `-v`, positional input), as opposed to `cli::args`'s own unit
//! tests, which construct a [`Cli`] by hand and test `into_parsed` alone.

use clap::Parser;
use stringer::cli::Cli;
use stringer::config::OutputFormat;

fn parse(args: &[&str]) -> Cli {
    let mut full = vec!["stringer"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).expect("argv should parse")
}

#[test]
fn defaults_match_the_documented_flag_table() {
    let cli = parse(&["input.bin"]);
    assert_eq!(cli.input, "input.bin");
    assert_eq!(cli.min_len, 2);
    assert_eq!(cli.enc, "ascii,utf16le");
    assert_eq!(cli.threads, "auto");
    assert!(!cli.json);
    assert!(!cli.null_only);
    assert_eq!(cli.cap_run_bytes, 4096);
    assert_eq!(cli.output, None);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn short_flags_are_accepted() {
    let cli = parse(&["-m", "5", "-e", "all", "-t", "3", "-j", "-n", "-c", "256", "-o", "out.txt", "file"]);
    assert_eq!(cli.min_len, 5);
    assert_eq!(cli.enc, "all");
    assert_eq!(cli.threads, "3");
    assert!(cli.json);
    assert!(cli.null_only);
    assert_eq!(cli.cap_run_bytes, 256);
    assert_eq!(cli.output.as_deref(), Some("out.txt"));
}

#[test]
fn repeated_verbose_flag_accumulates() {
    let cli = parse(&["-vvv", "file"]);
    assert_eq!(cli.verbose, 3);
}

#[test]
fn long_flags_mirror_short_flags() {
    let cli = parse(&[
        "--min-len",
        "7",
        "--enc",
        "utf16be",
        "--threads",
        "auto",
        "--json",
        "--null-only",
        "--cap-run-bytes",
        "128",
        "file",
    ]);
    assert_eq!(cli.min_len, 7);
    assert_eq!(cli.enc, "utf16be");
    assert!(cli.json);
    assert!(cli.null_only);
    assert_eq!(cli.cap_run_bytes, 128);
}

#[test]
fn missing_positional_input_is_a_parse_error() {
    assert!(Cli::try_parse_from(["stringer"]).is_err());
}

#[test]
fn dash_for_input_means_stdin_and_is_left_to_the_loader() {
    let cli = parse(&["-"]);
    assert_eq!(cli.input, "-");
}

#[test]
fn json_flag_round_trips_through_into_parsed() {
    let cli = parse(&["--json", "file"]);
    let parsed = cli.into_parsed().unwrap();
    assert_eq!(parsed.config.format, OutputFormat::Json);
}
